//! Lark CLI
//!
//! Inspect and invoke the builtin modules from a shell.

use lark::commands::{call_routine, list_modules};
use lark_stdlib::{init_tracing, HostConfig};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let host = match HostConfig::from_env() {
        Ok(config) => config.build(),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let command = &args[1];

    match command.as_str() {
        "list" => {
            if args.len() > 3 {
                eprintln!("Usage: lark list [module]");
                std::process::exit(1);
            }
            list_modules(&host, args.get(2).map(String::as_str));
        }
        "call" => {
            if args.len() < 4 {
                eprintln!("Usage: lark call <module> <routine> [args...]");
                eprintln!();
                eprintln!("Arguments:");
                eprintln!("  true, false     Boolean");
                eprintln!("  42, -1.5        Integer or float");
                eprintln!("  absent          The absent marker");
                eprintln!("  [a,b,c]         Array of converted elements");
                eprintln!("  anything else   String");
                std::process::exit(1);
            }
            call_routine(&host, &args[2], &args[3], &args[4..]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("Lark {}", env!("CARGO_PKG_VERSION"));
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
    println!("Lark builtin modules");
    println!();
    println!("Usage: lark <command> [options]");
    println!();
    println!("Commands:");
    println!("  list [module]                     List builtin modules and their members");
    println!("  call <module> <routine> [args]    Invoke a builtin routine");
    println!("  help                              Show this help message");
    println!("  version                           Show version information");
    println!();
    println!("Environment:");
    println!("  LARK_LOG           Tracing filter (falls back to RUST_LOG)");
    println!("  LARK_LOG_TREE=1    Hierarchical log output");
    println!("  LARK_RANDOM_SEED   Seed for the random module");
}
