//! mane CLI
//!
//! Flattens Go interfaces, loading every package at most once.

use manec::commands::{parse_resolve_args, run_resolve};

fn main() {
    manec::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "resolve" => {
            let options = match parse_resolve_args(&args[2..]) {
                Ok(options) => options,
                Err(message) => {
                    eprintln!("error: {message}");
                    eprintln!("Usage: mane resolve <file.go|import/path>... [options]");
                    std::process::exit(1);
                }
            };
            if !run_resolve(&options) {
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("mane {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("mane - Go interface flattener");
    println!();
    println!("Usage: mane <command> [options]");
    println!();
    println!("Commands:");
    println!("  resolve <target>...  Flatten every interface in each target");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Targets:");
    println!("  path/to/file.go      The package containing this file");
    println!("  import/path          A package found under the import roots");
    println!();
    println!("Resolve options:");
    println!("  --root=<dir>         Add an import root (repeatable, searched first)");
    println!("  --tests              Include _test.go files");
    println!("  --resolve-imports    Map embed qualifiers through the file's imports");
    println!("  --json               Print JSON instead of Go-like text");
    println!("  --no-parallel        Resolve targets one at a time");
    println!("  --verbose, -v        Report progress on stderr");
    println!();
    println!("Environment:");
    println!("  MANE_PATH            Extra import roots (path-list syntax)");
    println!("  RUST_LOG             Enable tracing output (e.g. manec=debug)");
    println!("  MANE_LOG_TREE        Show tracing output as an indented tree");
    println!();
    println!("Examples:");
    println!("  mane resolve ./greet/greet.go");
    println!("  mane resolve --root=./src io greet");
    println!("  mane resolve --json --resolve-imports ./app/main.go");
}
