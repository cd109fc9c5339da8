use thiserror::Error;

/// Failure modes of the arithmetic evaluator.
///
/// Syntax errors and arithmetic errors are kept apart so the calc form can
/// tell "this is not an expression" from "this expression has no value".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Invalid expression: input is empty")]
    EmptyExpression,

    #[error("Invalid expression: {len} characters exceeds the limit of {max}")]
    TooLong { len: usize, max: usize },

    #[error("Invalid expression: unexpected character '{}' at position {position}", .ch.escape_debug())]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("Invalid expression: malformed number '{0}'")]
    InvalidNumber(String),

    #[error("Invalid expression: expected {expected}, found {found}")]
    UnexpectedToken { found: String, expected: &'static str },

    #[error("Invalid expression: nesting deeper than {max} levels")]
    TooDeeplyNested { max: usize },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Result is not a finite number")]
    NonFiniteResult,
}

impl EvalError {
    /// Returns `true` when the input was rejected before evaluation.
    pub fn is_syntax_error(&self) -> bool {
        !matches!(self, EvalError::DivisionByZero | EvalError::NonFiniteResult)
    }
}

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Unknown page element: {0}")]
    UnknownElement(String),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

pub type DomainResult<T> = Result<T, DomainError>;
