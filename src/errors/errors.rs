use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::ExpectedExplicitValue => "ExpectedExplicitValue",
            ErrorImpl::UnresolvedIdentifier { .. } => "UnresolvedIdentifier",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::ReturnTypeMismatch { .. } => "ReturnTypeMismatch",
            ErrorImpl::NonBooleanPredicate { .. } => "NonBooleanPredicate",
            ErrorImpl::VoidPrint => "VoidPrint",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::UninferredType { .. } => "UninferredType",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::ScopeUnderflow => "ScopeUnderflow",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::ExpectedExplicitValue => ErrorTip::Suggestion(String::from(
                "Expected explicit value when no type is given",
            )),
            ErrorImpl::UnresolvedIdentifier { identifier } => ErrorTip::Suggestion(format!(
                "Identifier `{}` could not be resolved in any enclosing scope",
                identifier
            )),
            ErrorImpl::TypeMismatch { left, right } => ErrorTip::Suggestion(format!(
                "Operand types `{}` and `{}` do not match",
                left, right
            )),
            ErrorImpl::ReturnTypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected return type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::NonBooleanPredicate { received } => ErrorTip::Suggestion(format!(
                "Loop predicate must be `Boolean`, received `{}`",
                received
            )),
            ErrorImpl::VoidPrint => {
                ErrorTip::Suggestion(String::from("Cannot print a void expression"))
            }
            ErrorImpl::NotCallable { identifier } => {
                ErrorTip::Suggestion(format!("`{}` is not a function", identifier))
            }
            ErrorImpl::UninferredType { identifier } => ErrorTip::Suggestion(format!(
                "The type of `{}` could not be inferred, try annotating it",
                identifier
            )),
            ErrorImpl::ReturnOutsideFunction => ErrorTip::Suggestion(String::from(
                "Return statements are only allowed inside a function",
            )),
            ErrorImpl::ScopeUnderflow => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}:{}", self.internal_error, self.position.1, self.position.0)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("expected explicit value when no type is given")]
    ExpectedExplicitValue,
    #[error("unresolved identifier {identifier:?}")]
    UnresolvedIdentifier { identifier: String },
    #[error("type mismatch: {left} and {right}")]
    TypeMismatch { left: String, right: String },
    #[error("return type mismatch: expected {expected}, received {received}")]
    ReturnTypeMismatch { expected: String, received: String },
    #[error("for-loop predicate must be Boolean, received {received}")]
    NonBooleanPredicate { received: String },
    #[error("cannot print a void expression")]
    VoidPrint,
    #[error("{identifier:?} is not callable")]
    NotCallable { identifier: String },
    #[error("type of {identifier:?} could not be inferred")]
    UninferredType { identifier: String },
    #[error("return statement outside of function")]
    ReturnOutsideFunction,
    #[error("attempted to pop the root scope")]
    ScopeUnderflow,
}
