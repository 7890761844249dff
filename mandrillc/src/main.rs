mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::{cell::RefCell, path::PathBuf, rc::Rc};

use clap::Parser;
use cli::{print_finished, print_running};
use mandrill_core::{
    environment::prelude::Environment,
    eval::prelude::Evaluator,
    parse_file_from_stream
};

#[derive(Parser)]
enum Command {
    /// Parses and evaluates a source file
    Run {
        /// Path of source file
        path: PathBuf,
        /// Print the parsed source code before evaluating
        #[arg(long, default_value_t = false)]
        print_ast: bool
    },
    /// Runs Read Eval Print Loop
    Repl,
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl
}

fn main() {
    match Command::parse() {
        Command::Run { path, print_ast } => run(path, print_ast),
        Command::Repl => {
            let _ = repl::start();
        },
        Command::Rlpl => {
            let _ = rlpl::start();
        },
        Command::Rppl => {
            let _ = rppl::start();
        }
    }
}

fn run(path: PathBuf, print_ast: bool) {
    let buf_writer = cli::stderr_buffer_writer();
    let mut buf = buf_writer.buffer();

    print_running(&path.to_string_lossy());
    let start = std::time::Instant::now();

    let program = match parse_file_from_stream(path) {
        Ok(program) => program,
        Err(err) => {
            err.pretty(&mut buf);
            buf_writer
                .print(&buf)
                .expect("Writing errors to stderr");

            return;
        }
    };

    if print_ast {
        println!("{program:#?}");
    }

    let evaluator = Evaluator::default();
    let env = Rc::new(RefCell::new(Environment::new()));

    if let Some(value) = evaluator.eval(&program, env) {
        if value.is_error() {
            eprintln!("{value}");
        }
    }

    print_finished(std::time::Instant::now() - start);
}
