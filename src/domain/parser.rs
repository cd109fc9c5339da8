//! Arithmetic expression parser for the calc form.
//!
//! This module implements a recursive descent parser over a deliberately small
//! grammar. Input text is only ever tokenized and walked as data; nothing in
//! here can reach a host capability, so any string a user types is either a
//! number or a typed [`EvalError`].
//!
//! # BNF Grammar
//!
//! ```bnf
//! Expression     ::= Addition
//! Addition       ::= Multiplication ( ( "+" | "-" ) Multiplication )*
//! Multiplication ::= Unary ( ( "*" | "/" ) Unary )*
//! Unary          ::= ( "+" | "-" ) Unary | Primary
//! Primary        ::= Number | "(" Expression ")"
//! Number         ::= [0-9]+ ( "." [0-9]* )? | "." [0-9]+
//! ```
//!
//! Precedence, lowest first:
//! - Additive operators (+, -), left-associative
//! - Multiplicative operators (*, /), left-associative
//! - Unary sign (+, -)
//! - Parentheses override precedence

use super::errors::{EvalError, EvalResult};

/// Longest expression accepted, in characters.
pub const MAX_EXPRESSION_LEN: usize = 1024;

/// Deepest nesting of parentheses and unary signs accepted.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Represents a token in the expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),

    Plus,
    Minus,
    Star,
    Slash,

    LeftParen,
    RightParen,

    Eof,
}

impl Token {
    /// Human readable form used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Number(value) => format!("number {}", value),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Slash => "'/'".to_string(),
            Token::LeftParen => "'('".to_string(),
            Token::RightParen => "')'".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

/// Abstract Syntax Tree node for arithmetic expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),

    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
    },

    Unary {
        operator: UnaryOp,
        operand: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

/// Lexical analyzer for tokenizing expressions.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    current_char: Option<char>,
}

impl Lexer {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let current_char = chars.first().copied();

        Self {
            input: chars,
            position: 0,
            current_char,
        }
    }

    fn advance(&mut self) {
        self.position += 1;
        self.current_char = self.input.get(self.position).copied();
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_digits(&mut self, number_str: &mut String) {
        while let Some(ch) = self.current_char {
            if ch.is_ascii_digit() {
                number_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Reads a number token (integer or decimal).
    fn read_number(&mut self) -> EvalResult<f64> {
        let mut number_str = String::new();

        self.read_digits(&mut number_str);

        if self.current_char == Some('.') {
            number_str.push('.');
            self.advance();
            self.read_digits(&mut number_str);
        }

        match number_str.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(EvalError::InvalidNumber(number_str)),
        }
    }

    /// Gets the next token from the input.
    pub fn next_token(&mut self) -> EvalResult<Token> {
        self.skip_whitespace();

        let Some(ch) = self.current_char else {
            return Ok(Token::Eof);
        };

        let token = match ch {
            '0'..='9' | '.' => return self.read_number().map(Token::Number),
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            _ => {
                return Err(EvalError::UnexpectedCharacter {
                    ch,
                    position: self.position,
                });
            }
        };

        self.advance();
        Ok(token)
    }
}

/// Recursive descent parser producing an [`Expr`].
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    depth: usize,
}

impl Parser {
    /// Creates a parser and reads the first token.
    ///
    /// Input longer than [`MAX_EXPRESSION_LEN`] characters is rejected here,
    /// before any tokenizing happens.
    pub fn new(input: &str) -> EvalResult<Self> {
        let len = input.chars().count();
        if len > MAX_EXPRESSION_LEN {
            return Err(EvalError::TooLong {
                len,
                max: MAX_EXPRESSION_LEN,
            });
        }

        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token()?;

        Ok(Self {
            lexer,
            current_token,
            depth: 0,
        })
    }

    fn advance(&mut self) -> EvalResult<()> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, expected: Token, description: &'static str) -> EvalResult<()> {
        if self.current_token == expected {
            self.advance()
        } else {
            Err(self.unexpected(description))
        }
    }

    fn unexpected(&self, expected: &'static str) -> EvalError {
        EvalError::UnexpectedToken {
            found: self.current_token.describe(),
            expected,
        }
    }

    fn descend(&mut self) -> EvalResult<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            Err(EvalError::TooDeeplyNested {
                max: MAX_NESTING_DEPTH,
            })
        } else {
            Ok(())
        }
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    /// Parses the complete input as a single expression.
    pub fn parse(&mut self) -> EvalResult<Expr> {
        if self.current_token == Token::Eof {
            return Err(EvalError::EmptyExpression);
        }

        let expr = self.parse_addition()?;

        if self.current_token != Token::Eof {
            return Err(self.unexpected("an operator or end of input"));
        }

        Ok(expr)
    }

    /// Parses addition and subtraction expressions.
    fn parse_addition(&mut self) -> EvalResult<Expr> {
        let mut left = self.parse_multiplication()?;

        loop {
            let op = match self.current_token {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Subtract,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_multiplication()?;
            left = Expr::Binary {
                left: Box::new(left),
                operator: op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parses multiplication and division expressions.
    fn parse_multiplication(&mut self) -> EvalResult<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current_token {
                Token::Star => BinaryOp::Multiply,
                Token::Slash => BinaryOp::Divide,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_unary()?;
            left = Expr::Binary {
                left: Box::new(left),
                operator: op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parses unary sign expressions.
    fn parse_unary(&mut self) -> EvalResult<Expr> {
        let operator = match self.current_token {
            Token::Plus => UnaryOp::Plus,
            Token::Minus => UnaryOp::Minus,
            _ => return self.parse_primary(),
        };

        self.descend()?;
        self.advance()?;
        let operand = self.parse_unary()?;
        self.ascend();

        Ok(Expr::Unary {
            operator,
            operand: Box::new(operand),
        })
    }

    /// Parses primary expressions (highest precedence).
    fn parse_primary(&mut self) -> EvalResult<Expr> {
        match self.current_token {
            Token::Number(value) => {
                self.advance()?;
                Ok(Expr::Number(value))
            }

            Token::LeftParen => {
                self.descend()?;
                self.advance()?;
                let expr = self.parse_addition()?;
                self.expect(Token::RightParen, "')'")?;
                self.ascend();
                Ok(expr)
            }

            _ => Err(self.unexpected("a number or '('")),
        }
    }
}

/// Walks an [`Expr`] and computes its value.
///
/// Every intermediate result must stay finite; overflow surfaces as
/// [`EvalError::NonFiniteResult`] instead of an infinity on screen.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpressionEvaluator;

impl ExpressionEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates an expression AST to a numeric result.
    pub fn evaluate(&self, expr: &Expr) -> EvalResult<f64> {
        let value = match expr {
            Expr::Number(value) => *value,

            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;

                match operator {
                    BinaryOp::Add => left_val + right_val,
                    BinaryOp::Subtract => left_val - right_val,
                    BinaryOp::Multiply => left_val * right_val,
                    BinaryOp::Divide => {
                        if right_val == 0.0 {
                            return Err(EvalError::DivisionByZero);
                        }
                        left_val / right_val
                    }
                }
            }

            Expr::Unary { operator, operand } => {
                let operand_val = self.evaluate(operand)?;

                match operator {
                    UnaryOp::Plus => operand_val,
                    UnaryOp::Minus => -operand_val,
                }
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFiniteResult)
        }
    }
}
