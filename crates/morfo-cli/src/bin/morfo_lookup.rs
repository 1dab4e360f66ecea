// morfo-lookup: Base forms and tags of words.
//
// Reads words from stdin (one per line) unless words are given as
// arguments, and prints every stem and tag string found for each word.
//
// Usage:
//   morfo-lookup [-d DICT] [--json] [WORD...]
//
// Options:
//   -d, --dict PATH   Dictionary base path (PATH.info + PATH.dict)
//   --json            Print one JSON object per word
//   -h, --help        Print help

use std::io::{self, Write};

use morfo_core::Word;
use morfo_dict::Dictionary;
use serde::Serialize;

#[derive(Serialize)]
struct LookupRecord<'a> {
    word: &'a str,
    found: bool,
    words: Vec<Word>,
}

fn main() {
    morfo_cli::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = morfo_cli::parse_dict_path(&args);

    if morfo_cli::wants_help(&args) {
        println!("morfo-lookup: Look up base forms and tags of words.");
        println!();
        println!("Usage: morfo-lookup [-d DICT] [--json] [WORD...]");
        println!();
        println!("If WORD arguments are given, looks up each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -d, --dict PATH   Dictionary base path (PATH.info + PATH.dict)");
        println!("                    Defaults to $MORFO_DICT");
        println!("  --json            Print one JSON object per word");
        println!("  -h, --help        Print this help");
        return;
    }

    let json = args.iter().any(|a| a == "--json");
    let words: Vec<String> = args.iter().filter(|a| !a.starts_with('-')).cloned().collect();

    let dictionary =
        morfo_cli::load_dictionary(dict_path.as_deref()).unwrap_or_else(|e| morfo_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    morfo_cli::for_each_word(&words, |word| {
        if json {
            print_json(word, &dictionary, &mut out);
        } else {
            print_plain(word, &dictionary, &mut out);
        }
    });
}

fn lookup(word: &str, dictionary: &Dictionary) -> Option<Vec<Word>> {
    match dictionary.lookup(word) {
        Ok(found) => found,
        Err(e) => morfo_cli::fatal(&format!("{word}: {e}")),
    }
}

fn print_plain(word: &str, dictionary: &Dictionary, out: &mut impl Write) {
    match lookup(word, dictionary) {
        Some(found) => {
            let _ = writeln!(out, "{word}:");
            for w in found {
                let _ = writeln!(out, "  {}\t{}", w.stem, w.tags);
            }
        }
        None => {
            let _ = writeln!(out, "{word}: (not found)");
        }
    }
}

fn print_json(word: &str, dictionary: &Dictionary, out: &mut impl Write) {
    let found = lookup(word, dictionary);
    let record = LookupRecord {
        word,
        found: found.is_some(),
        words: found.unwrap_or_default(),
    };
    match serde_json::to_string(&record) {
        Ok(line) => {
            let _ = writeln!(out, "{line}");
        }
        Err(e) => morfo_cli::fatal(&format!("failed to serialize result: {e}")),
    }
}
