//! mypy-lint CLI
//!
//! Type-checks one Python file with mypy and prints editor-style diagnostics.

use std::io::IsTerminal;
use std::sync::Arc;

use mypy_invoke::TokioProcessRunner;
use mypy_lint::cli::{check, emit_report, CheckOptions};
use mypy_lint::init_tracing;
use tokio::io::AsyncReadExt;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "check" => {
            let options = match CheckOptions::parse(&args[2..]) {
                Ok(options) => options,
                Err(message) => {
                    eprintln!("error: {message}");
                    eprintln!();
                    print_check_usage();
                    std::process::exit(1);
                }
            };
            init_tracing(options.debug);

            let stdin_text = if options.stdin {
                let mut text = String::new();
                if let Err(e) = tokio::io::stdin().read_to_string(&mut text).await {
                    eprintln!("error: failed to read stdin: {e}");
                    std::process::exit(1);
                }
                Some(text)
            } else {
                None
            };

            let current_dir = match std::env::current_dir() {
                Ok(dir) => dir,
                Err(e) => {
                    eprintln!("error: cannot determine the current directory: {e}");
                    std::process::exit(1);
                }
            };

            match check(&options, &current_dir, stdin_text, Arc::new(TokioProcessRunner)).await {
                Ok(diagnostics) => {
                    let stdout = std::io::stdout();
                    let is_tty = stdout.is_terminal();
                    emit_report(&diagnostics, options.format, stdout.lock(), is_tty);
                    if diagnostics.iter().any(|d| d.is_error()) {
                        std::process::exit(1);
                    }
                }
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("mypy-lint {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

const CHECK_OPTIONS: &str = "\
Options:
  --stdin              Lint the content read from stdin as unsaved changes
  --command=<cmd>      Command used to run mypy (default: python3 -m mypy)
  --mypypath=<path>    Value for MYPYPATH
  --incremental        Run mypy in incremental mode
  --cache-dir=<dir>    Cache directory for incremental mode
  --format=<format>    Output format: text, json (default: text)
  --debug              Log each lint step to stderr";

fn print_usage() {
    println!("mypy-lint - editor diagnostics from mypy");
    println!();
    println!("Usage: mypy-lint <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <file.py>    Type-check a file and print diagnostics");
    println!("  help               Show this help message");
    println!("  version            Show version information");
    println!();
    println!("{CHECK_OPTIONS}");
}

fn print_check_usage() {
    eprintln!("Usage: mypy-lint check <file.py> [options]");
    eprintln!();
    eprintln!("{CHECK_OPTIONS}");
}
