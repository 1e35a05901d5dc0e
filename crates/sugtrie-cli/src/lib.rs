// sugtrie-cli: shared utilities for CLI tools.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use sugtrie_core::character::lowercase;
use sugtrie_engine::options::DEFAULT_MAX_SUGGESTIONS;
use sugtrie_engine::{
    BuildOptions, CorrectionScope, PruneMode, QueryEngine, SearchOptions, Vocabulary,
    VocabularyFormat, rank_candidates,
};
use tracing_subscriber::EnvFilter;

/// Environment variable naming the vocabulary file.
const VOCAB_ENV: &str = "SUGTRIE_VOCAB";

/// Environment variable holding the log filter.
const LOG_ENV: &str = "SUGTRIE_LOG";

/// Vocabulary file names tried in the current directory.
const DEFAULT_VOCAB_FILES: &[&str] = &["dictionary.txt", "counts.json"];

/// Help text for the options every query tool accepts.
pub const COMMON_OPTIONS_HELP: &str = "\
  -v, --vocab PATH           Word list or word-count JSON file
  -n, --max-suggestions N    Suggestions to show (default: 50)
      --decay X              Completion decay per level (default: 0.6)
      --penalty X            Substitution penalty (default: 0.1)
      --threshold X          Pruning threshold (default: 1.0)
      --max-substitutions N  Upper bound on substituted characters
      --timeout-ms N         Wall-clock budget per query
      --stop-siblings        Stop trying alternates at a position after one is pruned
      --deepest-match        Also search when only part of the prefix exists
      --probabilities        Weight words by probability instead of count
      --verbose              Log vocabulary loading progress
  -h, --help                 Print this help";

/// Options shared by the query tools, parsed from the command line.
#[derive(Debug, Clone)]
pub struct CliOptions {
    pub vocab_path: Option<String>,
    pub build: BuildOptions,
    pub search: SearchOptions,
    pub max_suggestions: usize,
    pub verbose: bool,
    /// Arguments that were not recognized as options.
    pub rest: Vec<String>,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            vocab_path: None,
            build: BuildOptions::default(),
            search: SearchOptions::default(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            verbose: false,
            rest: Vec::new(),
        }
    }
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn number<T: std::str::FromStr>(raw: &str, flag: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("invalid number for {flag}: {raw}"))
}

/// Parse the common options. Unknown arguments are collected in
/// [`CliOptions::rest`].
pub fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut skip_next = false;

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        if let Some(val) = arg.strip_prefix("--vocab=") {
            options.vocab_path = Some(val.to_string());
            continue;
        }
        match arg.as_str() {
            "-v" | "--vocab" => {
                options.vocab_path = Some(value(args, i, arg)?.to_string());
                skip_next = true;
            }
            "-n" | "--max-suggestions" => {
                options.max_suggestions = number(value(args, i, arg)?, arg)?;
                skip_next = true;
            }
            "--decay" => {
                options.search.decay = number(value(args, i, arg)?, arg)?;
                skip_next = true;
            }
            "--penalty" => {
                options.search.substitution_penalty = number(value(args, i, arg)?, arg)?;
                skip_next = true;
            }
            "--threshold" => {
                options.search.prune_threshold = number(value(args, i, arg)?, arg)?;
                skip_next = true;
            }
            "--max-substitutions" => {
                options.search.max_substitutions = Some(number(value(args, i, arg)?, arg)?);
                skip_next = true;
            }
            "--timeout-ms" => {
                let ms: u64 = number(value(args, i, arg)?, arg)?;
                options.search.timeout = Some(Duration::from_millis(ms));
                skip_next = true;
            }
            "--stop-siblings" => options.search.prune_mode = PruneMode::StopSiblings,
            "--deepest-match" => options.search.scope = CorrectionScope::DeepestMatch,
            "--probabilities" => {
                options.build.weight_source = sugtrie_engine::WeightSource::Probabilities;
            }
            "--verbose" => {
                options.verbose = true;
                options.build.verbose = true;
            }
            _ => options.rest.push(arg.clone()),
        }
    }

    Ok(options)
}

/// Find the vocabulary file and build an engine from it.
///
/// Search order:
/// 1. `vocab_path` argument (if provided)
/// 2. `SUGTRIE_VOCAB` environment variable
/// 3. `dictionary.txt`, then `counts.json`, in the current directory
pub fn load_engine(
    vocab_path: Option<&str>,
    build: &BuildOptions,
    search: SearchOptions,
) -> Result<QueryEngine, String> {
    let search_paths = build_search_paths(vocab_path);

    for path in &search_paths {
        if path.is_file() {
            let vocabulary = Vocabulary::load(path, VocabularyFormat::Auto, build)
                .map_err(|e| e.to_string())?;
            return QueryEngine::from_vocabulary(&vocabulary, build, search)
                .map_err(|e| format!("failed to build engine from {}: {e}", path.display()));
        }
    }

    Err(format!(
        "could not find a vocabulary in any of the search paths:\n{}",
        search_paths
            .iter()
            .map(|p| format!("  - {}", p.display()))
            .collect::<Vec<_>>()
            .join("\n")
    ))
}

/// Build the list of files to try as vocabulary.
fn build_search_paths(vocab_path: Option<&str>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(p) = vocab_path {
        paths.push(PathBuf::from(p));
    }

    if let Ok(env_path) = std::env::var(VOCAB_ENV) {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in DEFAULT_VOCAB_FILES {
            paths.push(cwd.join(name));
        }
    }

    paths
}

/// Install the stderr log subscriber. `SUGTRIE_LOG` overrides the default
/// level (`warn`, or `info` when `verbose`).
pub fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    // A second install (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Write the interactive answer for `prefix`: how many distinct words
/// matched, a rule, then the best `limit` of them. Returns the match count.
pub fn write_matches(
    engine: &QueryEngine,
    prefix: &str,
    limit: usize,
    out: &mut impl Write,
) -> io::Result<usize> {
    let ranked = rank_candidates(engine.query(&lowercase(prefix)), usize::MAX);
    writeln!(out, "Found {} suggestions:", ranked.len())?;
    writeln!(out, "===============")?;
    for candidate in ranked.iter().take(limit) {
        writeln!(out, "{}", candidate.word)?;
    }
    Ok(ranked.len())
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}
