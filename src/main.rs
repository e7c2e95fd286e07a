// minicheck: lexer and syntax checker for a small C-like language

use std::fs;
use std::path::Path;
use std::process;

use minicheck::lexer::tokenize;
use minicheck::parser::Parser;

// Exit codes: 0 accept, 1 syntax error, 2 usage or I/O failure.
const EXIT_REJECTED: i32 = 1;
const EXIT_FATAL: i32 = 2;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() != 2 {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("minicheck");
        eprintln!("Error: No input file provided");
        eprintln!();
        eprintln!("Usage: {} <file>", program_name);
        process::exit(EXIT_FATAL);
    }

    let path = &args[1];

    if !Path::new(path).exists() {
        eprintln!("Error: File '{}' not found", path);
        process::exit(EXIT_FATAL);
    }

    // An I/O failure here is fatal and distinct from a syntax error.
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error: Cannot read '{}': {}", path, err);
            process::exit(EXIT_FATAL);
        }
    };

    let tokens = tokenize(&source);
    log::debug!("{}: {} tokens", path, tokens.len());
    for (index, token) in tokens.iter().enumerate() {
        log::debug!("token {}: {:?} '{}'", index, token.kind, token.lexeme);
    }

    let mut parser = Parser::new(tokens)
        .with_trace(Box::new(|rule, at| log::trace!("enter {} at token {}", rule, at)));

    match parser.parse() {
        Ok(()) => {
            println!("{}: syntax OK", path);
        }
        Err(err) => {
            eprintln!("{}: {}", path, err);
            for later in parser.diagnostics().iter().skip(1) {
                eprintln!("{}: {}", path, later);
            }
            process::exit(EXIT_REJECTED);
        }
    }
}
