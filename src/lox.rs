use crate::error;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::Scanner;
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::io::Write;
use std::process::exit;

/// Runs a script file. Any static or runtime error makes the process exit
/// with status 1; a script that runs to completion exits 0.
pub fn run_file(path: &str) -> Result<()> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;

    let mut interpreter = Interpreter::new();
    run(source, &mut interpreter);

    if error::had_error() || error::had_runtime_error() {
        exit(1);
    }
    Ok(())
}

/// The interactive loop. Each line is a little program of its own, but it
/// runs against the same interpreter, so definitions, globals and resolved
/// closures accumulate across lines. Errors are reported and forgotten; the
/// prompt comes back either way.
pub fn run_prompt() -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut interpreter = Interpreter::new();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        let bytes_read = stdin.read_line(&mut line)?;
        if bytes_read == 0 {
            break; // EOF or Control-D
        }

        run(line, &mut interpreter);
        error::reset();
    }
    Ok(())
}

/// The pipeline: scan, parse, resolve, interpret — with a bail-out after
/// each static stage, so nothing runs once an error has been reported.
fn run(source: String, interpreter: &mut Interpreter) {
    let mut scanner = Scanner::new(source);
    let tokens = scanner.scan_tokens();

    let mut parser = Parser::new(tokens);
    let statements = parser.parse();

    // Stop if there was a syntax error.
    if error::had_error() {
        return;
    }

    let resolver = Resolver::new();
    let locals = resolver.resolve(&statements);

    // Stop if there was a resolution error.
    if error::had_error() {
        return;
    }

    interpreter.resolve(locals);
    interpreter.interpret(&statements);
}
