// sugtrie-repl: Interactive prefix completion and correction.
//
// Loads a vocabulary, then repeatedly prompts for a prefix and prints the
// best-ranked suggestions. An empty line or end of input exits.
//
// Usage:
//   sugtrie-repl [-v VOCAB] [OPTIONS]

use std::io::{self, BufRead, Write};

use tracing::info;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if sugtrie_cli::wants_help(&args) {
        println!("sugtrie-repl: Interactive word completion and correction.");
        println!();
        println!("Usage: sugtrie-repl [-v VOCAB] [OPTIONS]");
        println!();
        println!("Prompts for a prefix and prints ranked suggestions.");
        println!("An empty line or end of input exits.");
        println!();
        println!("Options:");
        println!("{}", sugtrie_cli::COMMON_OPTIONS_HELP);
        return;
    }

    let options = sugtrie_cli::parse_args(&args).unwrap_or_else(|e| sugtrie_cli::fatal(&e));
    sugtrie_cli::init_logging(options.verbose);

    let engine =
        sugtrie_cli::load_engine(options.vocab_path.as_deref(), &options.build, options.search)
            .unwrap_or_else(|e| sugtrie_cli::fatal(&e));
    info!(
        words = engine.tree().word_count(),
        nodes = engine.tree().node_count(),
        "vocabulary ready"
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut line = String::new();

    loop {
        if let Err(e) = write!(out, "\nEnter text: ").and_then(|()| out.flush()) {
            sugtrie_cli::fatal(&format!("failed to write output: {e}"));
        }

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        }
        let prefix = line.trim();
        if prefix.is_empty() {
            break;
        }

        if let Err(e) =
            sugtrie_cli::write_matches(&engine, prefix, options.max_suggestions, &mut out)
        {
            sugtrie_cli::fatal(&format!("failed to write output: {e}"));
        }
    }
}
