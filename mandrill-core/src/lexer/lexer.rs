use std::fmt::Display;

use super::token::Token;

pub type Spanned = (u32, Token, u32);

pub fn str_to_keyword(word: &str) -> Option<Token> {
	Some(match word {
		"let" => Token::Let,
		"fn" => Token::Function,
		"if" => Token::If,
		"else" => Token::Else,
		"return" => Token::Return,
		"true" => Token::True,
		"false" => Token::False,
		"null" => Token::Null,

		_ => return None
	})
}

/// Single-pass scanner with one character of lookahead. Each instance is
/// single-use over its input: the token stream ends with one `Eof` and the
/// `Iterator` impl fuses after yielding it.
#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: T,

	done: bool,
}

impl<T: Iterator<Item = (u32, char)>> Display for Lexer<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,
			"Lexer {{\n\tposition: {},\n\tnext_position: {},\n\tch: {:?}, next_ch: {:?}\n}}",
			self.position, self.next_position, self.ch, self.next_ch
		)
	}
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
        let mut lexer = Self {
            position: 0,
            next_position: 0,
            ch: None,
			next_ch: None,
            input,

			done: false,
        };

        lexer.next_char();
        lexer.next_char();

        lexer
    }

    pub fn next_token(&mut self) -> Spanned {
		while matches!(self.ch, Some(ch) if ch.is_ascii_whitespace()) {
			self.next_char();
		}

		match self.ch {
			Some(ch) => match ch {
				'=' if self.next_ch == Some('=') => self.eat_two_chars(Token::Equal),
				'!' if self.next_ch == Some('=') => self.eat_two_chars(Token::NotEqual),
				'=' => self.eat_one_char(Token::Assign),
				'!' => self.eat_one_char(Token::Bang),
				'+' => self.eat_one_char(Token::Plus),
				'-' => self.eat_one_char(Token::Minus),
				'*' => self.eat_one_char(Token::Asterisk),
				'/' => self.eat_one_char(Token::Slash),
				'<' => self.eat_one_char(Token::LessThan),
				'>' => self.eat_one_char(Token::GreaterThan),
				',' => self.eat_one_char(Token::Comma),
				';' => self.eat_one_char(Token::Semicolon),
				':' => self.eat_one_char(Token::Colon),
				'(' => self.eat_one_char(Token::LParen),
				')' => self.eat_one_char(Token::RParen),
				'{' => self.eat_one_char(Token::LBrace),
				'}' => self.eat_one_char(Token::RBrace),
				'[' => self.eat_one_char(Token::LSBracket),
				']' => self.eat_one_char(Token::RSBracket),
				'"' => self.lex_string(),
				'a'..='z' | 'A'..='Z' | '_' => self.lex_ident(),
				'0'..='9' => self.lex_int(),
				c => self.eat_one_char(Token::Illegal(c)),
			},
			None => self.eat_one_char(Token::Eof)
		}
    }

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				self.next_position += 1;

				None
			}
		};

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn eat_two_chars(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn lex_ident(&mut self) -> Spanned {
        let start_pos = self.position;
		let mut ident = String::new();

		loop {
			match self.ch {
				Some(ch) if ch.is_ascii_alphanumeric() || ch == '_' => {
					ident.push(ch);
					self.next_char();
				},
				_ => break
			}
		}

        let end_pos = self.position;

        let token = match str_to_keyword(&ident) {
			Some(token) => token,
			None => Token::Ident(ident)
		};

		(start_pos, token, end_pos)
	}

	fn lex_int(&mut self) -> Spanned {
		let start_pos = self.position;
		let mut value = String::new();

		loop {
			match self.ch {
				Some(ch) if ch.is_ascii_digit() => {
					value.push(ch);
					self.next_char();
				},
				_ => break
			}
		}

		let end_pos = self.position;

		// The run is all digits, so parsing only fails past i64::MAX.
		let token = match value.parse::<i64>() {
			Ok(value) => Token::Int(value),
			Err(_) => Token::Illegal(value.chars().next().unwrap_or('0')),
		};

		(start_pos, token, end_pos)
	}

	fn lex_string(&mut self) -> Spanned {
		let start_pos = self.position;
		self.next_char(); // opening quote

		let mut value = String::new();

		loop {
			match self.ch {
				Some('"') => {
					self.next_char(); // closing quote
					let end_pos = self.position;

					return (start_pos, Token::String(value), end_pos);
				},
				Some(ch) => {
					value.push(ch);
					self.next_char();
				},
				None => {
					let end_pos = self.position;

					return (start_pos, Token::Illegal('"'), end_pos);
				}
			}
		}
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = Spanned;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		let spanned = self.next_token();

		if spanned.1 == Token::Eof {
			self.done = true;
		}

		Some(spanned)
	}
}
