#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // <letter | _> { <letter> | <digit> | _ }
    Ident(String),
    // {/ <digit> /}, base 10 only
    Int(i64),
    // raw text between double quotes, no escapes
    String(String),
    // anything the lexer does not recognize, carrying the offending
    // character; always a hard syntax error for the parser
    Illegal(char),

    // Operators
    Assign, // =
    Plus, // +
    Minus, // -
    Asterisk, // *
    Slash, // /
    Bang, // !
    LessThan, // <
    GreaterThan, // >
    Equal, // ==
    NotEqual, // !=

    // Delimiters
    Comma, // ,
    Semicolon, // ;
    Colon, // :
    LParen, // (
    RParen, // )
    LBrace, // {
    RBrace, // }
    LSBracket, // [
    RSBracket, // ]

    // Keywords
    Let,
    Function, // fn
    If,
    Else,
    Return,
    True,
    False,
    Null,

    Eof,
}

impl Token {
    pub fn is_keyword(&self) -> bool {
        match self {
            Token::Let
            | Token::Function
            | Token::If
            | Token::Else
            | Token::Return
            | Token::True
            | Token::False
            | Token::Null => true,
            _ => false
        }
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Ident(value) => value.clone(),
            Token::Int(value) => value.to_string(),
            Token::String(value) => format!("\"{value}\""),
            Token::Illegal(ch) => ch.to_string(),

            Token::Assign => "=".to_string(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Asterisk => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Bang => "!".to_string(),
            Token::LessThan => "<".to_string(),
            Token::GreaterThan => ">".to_string(),
            Token::Equal => "==".to_string(),
            Token::NotEqual => "!=".to_string(),

            Token::Comma => ",".to_string(),
            Token::Semicolon => ";".to_string(),
            Token::Colon => ":".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::LBrace => "{".to_string(),
            Token::RBrace => "}".to_string(),
            Token::LSBracket => "[".to_string(),
            Token::RSBracket => "]".to_string(),

            Token::Let => "let".to_string(),
            Token::Function => "fn".to_string(),
            Token::If => "if".to_string(),
            Token::Else => "else".to_string(),
            Token::Return => "return".to_string(),
            Token::True => "true".to_string(),
            Token::False => "false".to_string(),
            Token::Null => "null".to_string(),

            Token::Eof => "\0".to_string(),
        }
    }
}
