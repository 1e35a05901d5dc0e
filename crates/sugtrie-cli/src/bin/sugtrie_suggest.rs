// sugtrie-suggest: Print ranked suggestions for prefixes.
//
// Prefixes come from the command line or, if none are given, from stdin
// (one per line). Each suggestion is printed as `word<TAB>score`, or as one
// JSON array per prefix with --json.
//
// Usage:
//   sugtrie-suggest [-v VOCAB] [OPTIONS] [PREFIX...]

use std::io::{self, BufRead, Write};

use sugtrie_core::character::lowercase;
use sugtrie_engine::QueryEngine;

fn print_suggestions(
    engine: &QueryEngine,
    prefix: &str,
    limit: usize,
    json: bool,
    out: &mut impl Write,
) -> io::Result<()> {
    let suggestions = engine.suggest(&lowercase(prefix), limit);
    if json {
        let line = serde_json::to_string(&suggestions).map_err(io::Error::other)?;
        return writeln!(out, "{line}");
    }
    if suggestions.is_empty() {
        return writeln!(out, "{prefix}: (no suggestions)");
    }
    writeln!(out, "{prefix}:")?;
    for s in &suggestions {
        writeln!(out, "  {}\t{:.6}", s.word, s.score)?;
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if sugtrie_cli::wants_help(&args) {
        println!("sugtrie-suggest: Print ranked completions and corrections.");
        println!();
        println!("Usage: sugtrie-suggest [-v VOCAB] [OPTIONS] [PREFIX...]");
        println!();
        println!("If PREFIX arguments are given, suggests for each prefix.");
        println!("Otherwise reads prefixes from stdin (one per line).");
        println!();
        println!("Options:");
        println!("      --json                 Print one JSON array per prefix");
        println!("{}", sugtrie_cli::COMMON_OPTIONS_HELP);
        return;
    }

    let options = sugtrie_cli::parse_args(&args).unwrap_or_else(|e| sugtrie_cli::fatal(&e));
    sugtrie_cli::init_logging(options.verbose);

    let mut json = false;
    let mut prefixes: Vec<String> = Vec::new();
    for arg in &options.rest {
        if arg == "--json" {
            json = true;
        } else if arg.starts_with('-') {
            sugtrie_cli::fatal(&format!("unknown option: {arg}"));
        } else {
            prefixes.push(arg.clone());
        }
    }

    let engine =
        sugtrie_cli::load_engine(options.vocab_path.as_deref(), &options.build, options.search)
            .unwrap_or_else(|e| sugtrie_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let limit = options.max_suggestions;

    let result = if prefixes.is_empty() {
        let stdin = io::stdin();
        let mut result = Ok(());
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            let prefix = line.trim();
            if prefix.is_empty() {
                continue;
            }
            result = print_suggestions(&engine, prefix, limit, json, &mut out);
            if result.is_err() {
                break;
            }
        }
        result
    } else {
        prefixes
            .iter()
            .try_for_each(|p| print_suggestions(&engine, p, limit, json, &mut out))
    };

    if let Err(e) = result.and_then(|()| out.flush()) {
        sugtrie_cli::fatal(&format!("failed to write output: {e}"));
    }
}
