mod environment;
mod error;
mod expr;
mod interpreter;
mod lox;
mod parser;
mod resolver;
mod scanner;
mod stmt;
mod token;
mod value;

use anyhow::Result;
use std::env;
use std::process::exit;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => lox::run_prompt(),
        2 => lox::run_file(&args[1]),
        _ => {
            eprintln!("Usage: {} [script]", args[0]);
            exit(64);
        }
    }
}
