use std::fmt::Display;
use std::rc::Rc;

use crate::{
    lexer::prelude::{Spanned, Token},
    parser::prelude::{parse_error, InfixParse, Parse, ParseError, ParseErrorType, Parser, Precedence},
    utils::prelude::SrcSpan
};

// program -> { <statement> }
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| statement.to_string())
            .collect::<Vec<String>>();

        write!(f, "{}", statements.join(" "))
    }
}

// statement -> <let> | <return> | <expression_statement>
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(Let),
    Return(Return),
    Expression(ExpressionStatement),
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Statement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let res = match &parser.current_token {
            Some((_, Token::Let, _)) => Self::Let(Let::parse(parser, None)?),
            Some((_, Token::Return, _)) => Self::Return(Return::parse(parser, None)?),
            Some(_) => Self::Expression(ExpressionStatement::parse(parser, None)?),
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        };

        Ok(res)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Let(let_) => write!(f, "{let_}"),
            Self::Return(return_) => write!(f, "{return_}"),
            Self::Expression(expression) => write!(f, "{expression}")
        }
    }
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Let(let_) => let_.location,
            Self::Return(return_) => return_.location,
            Self::Expression(expression) => expression.location
        }
    }
}

// let -> let <identifier> = <expression> [;]
#[derive(Debug, Clone, PartialEq)]
pub struct Let {
    pub name: Identifier,
    pub value: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Let {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Let)?;
        let name = Identifier::from(parser.expect_ident()?);
        let _ = parser.expect_one(Token::Assign)?;

        let value = Expression::parse(parser, None)?;
        let end = parser.accept_semicolon(value.location().end);

        Ok(Self {
            name,
            value,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Let {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "let {} = {};", self.name, self.value)
    }
}

// return -> return <expression> [;]
#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub value: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Return {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Return)?;

        let value = Expression::parse(parser, None)?;
        let end = parser.accept_semicolon(value.location().end);

        Ok(Self {
            value,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Return {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "return {};", self.value)
    }
}

// expression_statement -> <expression> [;]
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for ExpressionStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let expression = Expression::parse(parser, None)?;

        let start = expression.location().start;
        let end = parser.accept_semicolon(expression.location().end);

        Ok(Self {
            expression,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for ExpressionStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{};", self.expression)
    }
}

// block -> { "{" } { <statement> } { "}" }
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Block {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, mut end) = parser.expect_one(Token::LBrace)?;

        let mut statements = vec![];

        loop {
            match &parser.current_token {
                Some((_, Token::RBrace, _)) => {
                    end = parser.expect_one(Token::RBrace)?.1;
                    break;
                },
                Some(_) => statements.push(Statement::parse(parser, None)?),
                None => return parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan { start: 0, end: 0 }
                )
            }
        }

        Ok(Self {
            statements,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| statement.to_string())
            .collect::<Vec<String>>();

        write!(f, "{}", statements.join(" "))
    }
}

// expression -> pratt parse over prefix and infix rules
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Boolean(BooleanLiteral),
    Null(NullLiteral),
    String(StringLiteral),
    Array(ArrayLiteral),
    Map(MapLiteral),
    Prefix(Prefix),
    Infix(Infix),
    If(If),
    Function(FunctionLiteral),
    Call(Call),
    Index(Index),
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Expression {
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let precedence = precedence.unwrap_or(Precedence::Lowest);

        let mut left = Expression::parse_prefix(parser)?;

        // Infix rules bind while the upcoming operator is stronger than the
        // surrounding context; the strict comparison keeps binary operators
        // left-associative.
        loop {
            match &parser.current_token {
                Some((_, Token::LParen, _)) if precedence < Precedence::Call => {
                    left = Self::Call(Call::parse(parser, left, None)?);
                },
                Some((_, Token::LSBracket, _)) if precedence < Precedence::Index => {
                    left = Self::Index(Index::parse(parser, left, None)?);
                },
                Some((_, token, _)) if precedence < Precedence::from(token) => {
                    left = Self::Infix(Infix::parse(parser, left, None)?);
                },
                _ => break
            }
        }

        Ok(left)
    }
}

impl Expression {
    fn parse_prefix<T: Iterator<Item = Spanned>>(
        parser: &mut Parser<T>
    ) -> Result<Self, ParseError> {
        let res = match &parser.current_token {
            Some((_, Token::Ident(_), _)) => Self::Identifier(Identifier::from(parser.expect_ident()?)),
            Some((_, Token::Int(_), _)) => Self::Integer(IntegerLiteral::parse(parser, None)?),
            Some((_, Token::True | Token::False, _)) => Self::Boolean(BooleanLiteral::parse(parser, None)?),
            Some((_, Token::Null, _)) => Self::Null(NullLiteral::parse(parser, None)?),
            Some((_, Token::String(_), _)) => Self::String(StringLiteral::parse(parser, None)?),
            Some((_, Token::Bang | Token::Minus, _)) => Self::Prefix(Prefix::parse(parser, None)?),
            Some((_, Token::LParen, _)) => {
                parser.expect_one(Token::LParen)?;
                let expression = Expression::parse(parser, None)?;
                parser.expect_one(Token::RParen)?;

                expression
            },
            Some((_, Token::If, _)) => Self::If(If::parse(parser, None)?),
            Some((_, Token::Function, _)) => Self::Function(FunctionLiteral::parse(parser, None)?),
            Some((_, Token::LSBracket, _)) => Self::Array(ArrayLiteral::parse(parser, None)?),
            Some((_, Token::LBrace, _)) => Self::Map(MapLiteral::parse(parser, None)?),
            Some((start, Token::Illegal(character), end)) => {
                return parse_error(
                    ParseErrorType::IllegalCharacter { character: *character },
                    SrcSpan { start: *start, end: *end }
                )
            },
            Some((start, token, end)) => {
                return parse_error(
                    ParseErrorType::ExpectedExpression { token: token.clone() },
                    SrcSpan { start: *start, end: *end }
                )
            },
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        };

        Ok(res)
    }

    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Identifier(identifier) => identifier.location,
            Self::Integer(integer) => integer.location,
            Self::Boolean(boolean) => boolean.location,
            Self::Null(null) => null.location,
            Self::String(string) => string.location,
            Self::Array(array) => array.location,
            Self::Map(map) => map.location,
            Self::Prefix(prefix) => prefix.location,
            Self::Infix(infix) => infix.location,
            Self::If(if_) => if_.location,
            Self::Function(function) => function.location,
            Self::Call(call) => call.location,
            Self::Index(index) => index.location
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(identifier) => write!(f, "{identifier}"),
            Self::Integer(integer) => write!(f, "{integer}"),
            Self::Boolean(boolean) => write!(f, "{boolean}"),
            Self::Null(null) => write!(f, "{null}"),
            Self::String(string) => write!(f, "{string}"),
            Self::Array(array) => write!(f, "{array}"),
            Self::Map(map) => write!(f, "{map}"),
            Self::Prefix(prefix) => write!(f, "{prefix}"),
            Self::Infix(infix) => write!(f, "{infix}"),
            Self::If(if_) => write!(f, "{if_}"),
            Self::Function(function) => write!(f, "{function}"),
            Self::Call(call) => write!(f, "{call}"),
            Self::Index(index) => write!(f, "{index}")
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan
}

impl From<(u32, String, u32)> for Identifier {
    fn from((start, value, end): (u32, String, u32)) -> Self {
        Self {
            value,
            location: SrcSpan { start, end }
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub value: i64,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for IntegerLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        match parser.next_token() {
            Some((start, Token::Int(value), end)) => Ok(Self {
                value,
                location: SrcSpan { start, end }
            }),
            Some((start, token, end)) => parse_error(
                ParseErrorType::UnexpectedToken {
                    token,
                    expected: vec!["an Int".to_string()]
                },
                SrcSpan { start, end }
            ),
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        }
    }
}

impl Display for IntegerLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub value: bool,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for BooleanLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        match parser.next_token() {
            Some((start, Token::True, end)) => Ok(Self {
                value: true,
                location: SrcSpan { start, end }
            }),
            Some((start, Token::False, end)) => Ok(Self {
                value: false,
                location: SrcSpan { start, end }
            }),
            Some((start, token, end)) => parse_error(
                ParseErrorType::UnexpectedToken {
                    token,
                    expected: vec!["`true`".to_string(), "`false`".to_string()]
                },
                SrcSpan { start, end }
            ),
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        }
    }
}

impl Display for BooleanLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NullLiteral {
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for NullLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, end) = parser.expect_one(Token::Null)?;

        Ok(Self {
            location: SrcSpan { start, end }
        })
    }
}

impl Display for NullLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "null")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for StringLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        match parser.next_token() {
            Some((start, Token::String(value), end)) => Ok(Self {
                value,
                location: SrcSpan { start, end }
            }),
            Some((start, token, end)) => parse_error(
                ParseErrorType::UnexpectedToken {
                    token,
                    expected: vec!["a String".to_string()]
                },
                SrcSpan { start, end }
            ),
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        }
    }
}

impl Display for StringLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.value)
    }
}

// array -> [ [<expression> {, <expression>}] ]
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub elements: Vec<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for ArrayLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::LSBracket)?;

        let mut elements = vec![];

        if !matches!(parser.current_token, Some((_, Token::RSBracket, _))) {
            elements.push(Expression::parse(parser, None)?);

            while parser.expect_one(Token::Comma).is_ok() {
                elements.push(Expression::parse(parser, None)?);
            }
        }

        let (_, end) = parser.expect_one(Token::RSBracket)?;

        Ok(Self {
            elements,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for ArrayLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let elements = self.elements.iter()
            .map(|element| element.to_string())
            .collect::<Vec<String>>();

        write!(f, "[{}]", elements.join(", "))
    }
}

// map -> { [<expression> : <expression> {, <expression> : <expression>}] }
// pairs keep their written order so evaluation order is deterministic
#[derive(Debug, Clone, PartialEq)]
pub struct MapLiteral {
    pub pairs: Vec<(Expression, Expression)>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for MapLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::LBrace)?;

        let mut pairs = vec![];

        if !matches!(parser.current_token, Some((_, Token::RBrace, _))) {
            pairs.push(Self::parse_pair(parser)?);

            while parser.expect_one(Token::Comma).is_ok() {
                pairs.push(Self::parse_pair(parser)?);
            }
        }

        let (_, end) = parser.expect_one(Token::RBrace)?;

        Ok(Self {
            pairs,
            location: SrcSpan { start, end }
        })
    }
}

impl MapLiteral {
    fn parse_pair<T: Iterator<Item = Spanned>>(
        parser: &mut Parser<T>
    ) -> Result<(Expression, Expression), ParseError> {
        let key = Expression::parse(parser, None)?;
        let _ = parser.expect_one(Token::Colon)?;
        let value = Expression::parse(parser, None)?;

        Ok((key, value))
    }
}

impl Display for MapLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pairs = self.pairs.iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect::<Vec<String>>();

        write!(f, "{{{}}}", pairs.join(", "))
    }
}

// prefix -> (! | -) <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    pub operator: Token,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for Prefix {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        match parser.next_token() {
            Some((start, operator @ (Token::Bang | Token::Minus), _)) => {
                let right = Expression::parse(parser, Some(Precedence::Prefix))?;
                let end = right.location().end;

                Ok(Self {
                    operator,
                    right: Box::new(right),
                    location: SrcSpan { start, end }
                })
            },
            Some((start, token, end)) => parse_error(
                ParseErrorType::UnexpectedToken {
                    token,
                    expected: vec!["`!`".to_string(), "`-`".to_string()]
                },
                SrcSpan { start, end }
            ),
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        }
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}{})", self.operator.as_literal(), self.right)
    }
}

// infix -> <expression> <operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Infix {
    pub operator: Token,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> InfixParse<T> for Infix {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        match parser.next_token() {
            Some((_, operator, _)) => {
                let right = Expression::parse(parser, Some(Precedence::from(&operator)))?;

                let location = SrcSpan {
                    start: left.location().start,
                    end: right.location().end
                };

                Ok(Self {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                    location
                })
            },
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: 0, end: 0 }
            )
        }
    }
}

impl Display for Infix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator.as_literal(), self.right)
    }
}

// if -> if ( <expression> ) <block> [else <block>]
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub condition: Box<Expression>,
    pub consequence: Block,
    pub alternative: Option<Block>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for If {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::If)?;

        parser.expect_one(Token::LParen)?;
        let condition = Expression::parse(parser, None)?;
        parser.expect_one(Token::RParen)?;

        let consequence = Block::parse(parser, None)?;
        let mut end = consequence.location.end;

        let alternative = match parser.expect_one(Token::Else) {
            Ok(_) => {
                let block = Block::parse(parser, None)?;
                end = block.location.end;

                Some(block)
            },
            Err(_) => None
        };

        Ok(Self {
            condition: Box::new(condition),
            consequence,
            alternative,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for If {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if ({}) {{ {} }}", self.condition, self.consequence)?;

        if let Some(alternative) = &self.alternative {
            write!(f, " else {{ {alternative} }}")?;
        }

        Ok(())
    }
}

// function -> fn ( [<identifier> {, <identifier>}] ) <block>
// the body lives behind an Rc so evaluated function values can share it
// without cloning the subtree per call
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub parameters: Vec<Identifier>,
    pub body: Rc<Block>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> Parse<T> for FunctionLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::Function)?;

        parser.expect_one(Token::LParen)?;

        let mut parameters: Vec<Identifier> = vec![];

        if !matches!(parser.current_token, Some((_, Token::RParen, _))) {
            parameters.push(parser.expect_ident()?.into());

            while parser.expect_one(Token::Comma).is_ok() {
                parameters.push(parser.expect_ident()?.into());
            }
        }

        parser.expect_one(Token::RParen)?;

        let body = Block::parse(parser, None)?;
        let end = body.location.end;

        Ok(Self {
            parameters,
            body: Rc::new(body),
            location: SrcSpan { start, end }
        })
    }
}

impl Display for FunctionLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self.parameters.iter()
            .map(|parameter| parameter.to_string())
            .collect::<Vec<String>>();

        write!(f, "fn({}) {{ {} }}", parameters.join(", "), self.body)
    }
}

// call -> <expression> ( [<expression> {, <expression>}] )
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> InfixParse<T> for Call {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        parser.expect_one(Token::LParen)?;

        let mut arguments = vec![];

        if !matches!(parser.current_token, Some((_, Token::RParen, _))) {
            arguments.push(Expression::parse(parser, None)?);

            while parser.expect_one(Token::Comma).is_ok() {
                arguments.push(Expression::parse(parser, None)?);
            }
        }

        let (_, end) = parser.expect_one(Token::RParen)?;

        let location = SrcSpan {
            start: left.location().start,
            end
        };

        Ok(Self {
            function: Box::new(left),
            arguments,
            location
        })
    }
}

impl Display for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arguments = self.arguments.iter()
            .map(|argument| argument.to_string())
            .collect::<Vec<String>>();

        write!(f, "{}({})", self.function, arguments.join(", "))
    }
}

// index -> <expression> [ <expression> ]
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    pub left: Box<Expression>,
    pub index: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Spanned>> InfixParse<T> for Index {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        parser.expect_one(Token::LSBracket)?;
        let index = Expression::parse(parser, None)?;
        let (_, end) = parser.expect_one(Token::RSBracket)?;

        let location = SrcSpan {
            start: left.location().start,
            end
        };

        Ok(Self {
            left: Box::new(left),
            index: Box::new(index),
            location
        })
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}[{}])", self.left, self.index)
    }
}
