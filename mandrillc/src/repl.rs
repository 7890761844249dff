use std::{cell::RefCell, io::Write, rc::Rc};

use mandrill_core::{
	environment::prelude::Environment,
	eval::prelude::Evaluator,
	lexer::prelude::Lexer,
	parser::prelude::Parser
};

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();

	let username = std::env::var("USER").unwrap_or_else(|_| "there".to_string());
	println!("Hi, {username}! This is the Mandrill programming language.");
	println!("Feel free to type in commands...");

	// one environment for the whole session, so bindings survive
	// across lines
	let evaluator = Evaluator::default();
	let env = Rc::new(RefCell::new(Environment::new()));

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		if let Some('\n') = input.chars().next_back() {
			input.pop();
		}
		if let Some('\r') = input.chars().next_back() {
			input.pop();
		}

		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				let mut parser = Parser::new(Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c))));
				let (program, errors) = parser.parse_program();

				if !errors.is_empty() {
					for error in errors {
						let (message, messages) = error.details();

						println!("Parse error: {}.", message);
						if !messages.is_empty() {
							println!("\t{}", messages.join(";\n\t"));
						}
					}

					continue;
				}

				if let Some(value) = evaluator.eval(&program, env.clone()) {
					println!("{value}");
				}
			}
		}
	}
}
