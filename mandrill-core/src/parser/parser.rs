use crate::{lexer::prelude::{Lexer, Spanned, Token}, utils::prelude::SrcSpan};
use super::error::{parse_error, ParseError, ParseErrorType};
use super::ast::{Expression, Program};

pub trait Parse<T: Iterator<Item = Spanned>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

pub trait InfixParse<T: Iterator<Item = Spanned>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

pub struct Parser<T: Iterator<Item = Spanned>> {
    pub current_token: Option<Spanned>,
    pub next_token: Option<Spanned>,
    pub errors: Vec<ParseError>,

    tokens: T,
}

impl<T: Iterator<Item = Spanned>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: None,
            next_token: None,
            errors: vec![],

            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    pub fn next_token(&mut self) -> Option<Spanned> {
        let t = self.current_token.take();

        // The trailing `Eof` token collapses into `None` so an exhausted
        // stream has a single representation inside the parser.
        let next = match self.tokens.next() {
            Some((_, Token::Eof, _)) | None => None,
            tok => tok,
        };

        self.current_token = self.next_token.take();
        self.next_token = next;

        t
    }

    pub fn current_precedence(&self) -> Precedence {
        match &self.current_token {
            Some((_, token, _)) => Precedence::from(token),
            None => Precedence::Lowest
        }
    }

    /// Parses the whole token stream. Errors are accumulated rather than
    /// fatal: a malformed statement is recorded and the parser resumes at
    /// the next statement boundary, so the returned program may be partial.
    /// Callers must not evaluate the program unless the error list is empty.
    pub fn parse_program(&mut self) -> (Program, Vec<ParseError>) {
        let start = match &self.current_token {
            Some((start, _, _)) => *start,
            None => 0
        };
        let mut end = start;

        let mut statements = vec![];

        while self.current_token.is_some() {
            match super::ast::Statement::parse(self, None) {
                Ok(statement) => {
                    end = statement.location().end;
                    statements.push(statement);
                },
                Err(error) => {
                    self.errors.push(error);
                    self.synchronize();
                }
            }
        }

        let program = Program {
            statements,
            location: SrcSpan { start, end }
        };

        (program, std::mem::take(&mut self.errors))
    }

    /// Skips to the token after the next semicolon (or to the end of the
    /// stream) so statement parsing can resume after an error.
    pub fn synchronize(&mut self) {
        loop {
            match &self.current_token {
                None => break,
                Some((_, Token::Semicolon, _)) => {
                    self.step();
                    break;
                },
                Some(_) => self.step()
            }
        }
    }

    pub fn expect_one(&mut self, token: Token) -> Result<(u32, u32), ParseError> {
        match self.current_token.take() {
            Some((start, tok, end)) if tok == token => {
                self.step();
                Ok((start, end))
            },
            Some(t) => {
                let (start, tok, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::UnexpectedToken {
                        token: tok,
                        expected: vec![format!("`{}`", token.as_literal())],
                    },
                    SrcSpan { start, end }
                )
            },
            None => {
                parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan { start: 0, end: 0 }
                )
            }
        }
    }

    pub fn expect_ident(&mut self) -> Result<(u32, String, u32), ParseError> {
        match self.current_token.take() {
            Some((start, Token::Ident(value), end)) => {
                self.step();
                Ok((start, value, end))
            },
            Some(t) => {
                let (start, _, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::ExpectedIdent,
                    SrcSpan { start, end }
                )
            },
            None => {
                parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan { start: 0, end: 0 }
                )
            }
        }
    }

    /// Consumes a statement-terminating semicolon if one is present. The
    /// terminator is optional at block and stream boundaries.
    pub fn accept_semicolon(&mut self, end: u32) -> u32 {
        match self.expect_one(Token::Semicolon) {
            Ok((_, end)) => end,
            Err(_) => end
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

impl From<&Token> for Precedence {
    fn from(value: &Token) -> Self {
        match value {
            Token::Equal | Token::NotEqual => Self::Equals,
            Token::LessThan | Token::GreaterThan => Self::LessGreater,
            Token::Plus | Token::Minus => Self::Sum,
            Token::Asterisk | Token::Slash => Self::Product,
            Token::LParen => Self::Call,
            Token::LSBracket => Self::Index,
            _ => Self::Lowest,
        }
    }
}

pub fn parse_source(src: &str) -> (Program, Vec<ParseError>) {
    let lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
    let mut parser = Parser::new(lexer);

    parser.parse_program()
}

pub fn parse_source_from_stream(stream: impl Iterator<Item = char>) -> (Program, Vec<ParseError>) {
    let lexer = Lexer::new(stream
        .scan(0, |pos, c| {
            *pos += c.len_utf8() as u32;
            Some((*pos - c.len_utf8() as u32, c))
        })
    );
    let mut parser = Parser::new(lexer);

    parser.parse_program()
}
