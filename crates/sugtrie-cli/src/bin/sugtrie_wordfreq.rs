// sugtrie-wordfreq: Count word frequencies in text read from stdin.
//
// Prints `{"counts": {...}, "probabilities": {...}}`, which sugtrie-repl and
// sugtrie-suggest accept as a vocabulary file.
//
// Usage:
//   sugtrie-wordfreq [--pretty] < corpus.txt > counts.json

use std::io::{self, Read};

use sugtrie_engine::WordCounts;
use tracing::info;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if sugtrie_cli::wants_help(&args) {
        println!("sugtrie-wordfreq: Count lowercase word frequencies.");
        println!();
        println!("Usage: sugtrie-wordfreq [--pretty] < TEXT > counts.json");
        println!();
        println!("Options:");
        println!("      --pretty   Indent the JSON output");
        println!("      --verbose  Log a summary to stderr");
        println!("  -h, --help     Print this help");
        return;
    }

    let pretty = args.iter().any(|a| a == "--pretty");
    sugtrie_cli::init_logging(args.iter().any(|a| a == "--verbose"));

    let mut text = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut text) {
        sugtrie_cli::fatal(&format!("error reading stdin: {e}"));
    }

    let counts = WordCounts::from_text(&text);
    info!(words = counts.len(), occurrences = counts.total(), "counted words");

    match counts.to_json(pretty) {
        Ok(json) => println!("{json}"),
        Err(e) => sugtrie_cli::fatal(&e.to_string()),
    }
}
