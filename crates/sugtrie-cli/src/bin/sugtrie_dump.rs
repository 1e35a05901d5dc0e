// sugtrie-dump: Print the weighted prefix tree built from a vocabulary.
//
// One node per line, indented by depth; word ends are marked with `$`.
// Optionally restricted to the subtree below a prefix.
//
// Usage:
//   sugtrie-dump [-v VOCAB] [--verify] [PREFIX]

use std::io::{self, Write};

use sugtrie_core::character::lowercase;
use sugtrie_engine::WeightedTree;
use sugtrie_trie::{Node, Walk};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if sugtrie_cli::wants_help(&args) {
        println!("sugtrie-dump: Print the weighted prefix tree.");
        println!();
        println!("Usage: sugtrie-dump [-v VOCAB] [--verify] [PREFIX]");
        println!();
        println!("Options:");
        println!("      --verify               Check branch weights before printing");
        println!("{}", sugtrie_cli::COMMON_OPTIONS_HELP);
        return;
    }

    let options = sugtrie_cli::parse_args(&args).unwrap_or_else(|e| sugtrie_cli::fatal(&e));
    sugtrie_cli::init_logging(options.verbose);

    let verify = options.rest.iter().any(|a| a == "--verify");
    let prefix = options
        .rest
        .iter()
        .find(|a| !a.starts_with('-'))
        .map(|p| lowercase(p));

    let engine =
        sugtrie_cli::load_engine(options.vocab_path.as_deref(), &options.build, options.search)
            .unwrap_or_else(|e| sugtrie_cli::fatal(&e));
    let tree: &WeightedTree = engine.tree();

    if verify {
        if let Err(e) = tree.verify_branch_weights() {
            sugtrie_cli::fatal(&e.to_string());
        }
    }

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let written = match prefix {
        None => write!(out, "{tree}"),
        Some(prefix) => match tree.lookup_prefix_node(&prefix) {
            None => sugtrie_cli::fatal(&format!("prefix {prefix:?} not found")),
            Some(node) => dump_subtree(node, &prefix, &mut out),
        },
    };
    if let Err(e) = written.and_then(|()| out.flush()) {
        sugtrie_cli::fatal(&format!("failed to write output: {e}"));
    }
}

/// Print the subtree below `start`, whose path from the root is `prefix`.
fn dump_subtree(start: &Node, prefix: &str, out: &mut impl Write) -> io::Result<()> {
    let stem: String = {
        let mut chars: Vec<char> = prefix.chars().collect();
        chars.pop();
        chars.into_iter().collect()
    };
    for entry in Walk::new(start) {
        let node = entry.node;
        let indent = "  ".repeat(entry.depth);
        let marker = if node.is_word_end() { "$" } else { "" };
        writeln!(
            out,
            "{indent}{stem}{}{marker} word={} branch={}",
            entry.prefix,
            node.word_weight(),
            node.branch_weight()
        )?;
    }
    Ok(())
}
