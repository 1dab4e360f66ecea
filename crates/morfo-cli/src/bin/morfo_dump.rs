// morfo-dump: Print every sequence stored in a dictionary's automaton.
//
// Sequences are printed in automaton order, decoded with the dictionary's
// character encoding (invalid bytes are replaced).
//
// Usage:
//   morfo-dump [-d DICT] [--limit N]
//
// Options:
//   -d, --dict PATH   Dictionary base path (PATH.info + PATH.dict)
//   --limit N         Stop after N sequences
//   -h, --help        Print help

use std::io::{self, Write};

use morfo_fsa::Fsa;

fn parse_limit(args: &[String]) -> Option<usize> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let value = if let Some(v) = arg.strip_prefix("--limit=") {
            v
        } else if arg == "--limit" {
            match iter.next() {
                Some(v) => v.as_str(),
                None => morfo_cli::fatal("--limit requires a value"),
            }
        } else {
            continue;
        };
        return match value.parse() {
            Ok(n) => Some(n),
            Err(_) => morfo_cli::fatal(&format!("invalid --limit value: {value}")),
        };
    }
    None
}

fn main() {
    morfo_cli::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = morfo_cli::parse_dict_path(&args);

    if morfo_cli::wants_help(&args) {
        println!("morfo-dump: Print every sequence stored in a dictionary.");
        println!();
        println!("Usage: morfo-dump [-d DICT] [--limit N]");
        println!();
        println!("Options:");
        println!("  -d, --dict PATH   Dictionary base path (PATH.info + PATH.dict)");
        println!("                    Defaults to $MORFO_DICT");
        println!("  --limit N         Stop after N sequences");
        println!("  -h, --help        Print this help");
        return;
    }

    let limit = parse_limit(&args).unwrap_or(usize::MAX);
    let dictionary =
        morfo_cli::load_dictionary(dict_path.as_deref()).unwrap_or_else(|e| morfo_cli::fatal(&e));
    let encoding = dictionary.metadata().encoding();
    let automaton = dictionary.automaton();

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let mut sequences = automaton.sequences();
    let mut count = 0;
    while count < limit {
        let Some(sequence) = sequences.advance() else {
            break;
        };
        let (text, _) = encoding.decode_without_bom_handling(sequence);
        if writeln!(out, "{text}").is_err() {
            // Downstream closed (e.g. piped into `head`).
            return;
        }
        count += 1;
    }
}
