// morfo-cli: shared utilities for CLI tools.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;

use log::debug;
use morfo_dict::Dictionary;

/// Environment variable holding the default dictionary base path.
pub const DICT_ENV: &str = "MORFO_DICT";

/// Initialize `env_logger`; `RUST_LOG` overrides the default `warn` level.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

/// Resolve the dictionary base path and open it.
///
/// Search order:
/// 1. `dict_path` argument (if provided)
/// 2. `MORFO_DICT` environment variable
///
/// The base path has no suffix: `dicts/english` names `dicts/english.info`
/// and `dicts/english.dict`.
pub fn load_dictionary(dict_path: Option<&str>) -> Result<Dictionary, String> {
    let base = match dict_path {
        Some(p) => PathBuf::from(p),
        None => match std::env::var(DICT_ENV) {
            Ok(p) => PathBuf::from(p),
            Err(_) => {
                return Err(format!(
                    "no dictionary given: pass -d PATH or set {DICT_ENV}"
                ));
            }
        },
    };
    debug!("loading dictionary {}", base.display());

    Dictionary::open(&base).map_err(|e| format!("failed to open {}: {e}", base.display()))
}

/// Parse a `--dict=PATH`, `--dict PATH` or `-d PATH` argument from command line args.
///
/// Returns `(dict_path, remaining_args)`.
pub fn parse_dict_path(args: &[String]) -> (Option<String>, Vec<String>) {
    let mut dict_path = None;
    let mut remaining = Vec::new();
    let mut skip_next = false;

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        if let Some(val) = arg.strip_prefix("--dict=") {
            dict_path = Some(val.to_string());
        } else if arg == "--dict" || arg == "-d" {
            if i + 1 < args.len() {
                dict_path = Some(args[i + 1].clone());
                skip_next = true;
            } else {
                fatal(&format!("{arg} requires a value"));
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    (dict_path, remaining)
}

/// Words given on the command line, or stdin lines (trimmed, non-empty) when none.
pub fn for_each_word(words: &[String], mut f: impl FnMut(&str)) {
    if !words.is_empty() {
        for word in words {
            f(word);
        }
        return;
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        };
        let word = line.trim();
        if !word.is_empty() {
            f(word);
        }
    }
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
