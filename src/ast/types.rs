//! Static type model.
//!
//! A type is either one of the built-in kinds or a user-defined nominal
//! type. Built-ins compare by kind and user types by name; two types are
//! compatible only when they are identical.
//!
//! `Literals::Inferred` is a placeholder meaning "derive from context". It
//! appears in the syntax tree wherever an annotation was omitted and must
//! never survive as the final type of a node after the strict pass.

use std::fmt::Display;

/// The built-in type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Literals {
    Int,
    Float,
    String,
    Boolean,
    Void,
    Inferred,
}

impl Display for Literals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Builtin(Literals),
    User(String),
}

impl Type {
    pub fn builtin(kind: Literals) -> Self {
        Type::Builtin(kind)
    }

    pub fn user(name: impl Into<String>) -> Self {
        Type::User(name.into())
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Type::Builtin(Literals::Boolean))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Builtin(Literals::Void))
    }

    pub fn is_inferred(&self) -> bool {
        matches!(self, Type::Builtin(Literals::Inferred))
    }

    /// Exact kind (or, for user types, name) equality.
    pub fn matches(&self, other: &Type) -> bool {
        self == other
    }

    /// Maps a type name as written in source to its type.
    ///
    /// Anything that is not a built-in keyword is a user-defined type.
    pub fn from_name(name: &str) -> Self {
        match name {
            "int" => Type::Builtin(Literals::Int),
            "float" => Type::Builtin(Literals::Float),
            "string" => Type::Builtin(Literals::String),
            "bool" => Type::Builtin(Literals::Boolean),
            "void" => Type::Builtin(Literals::Void),
            _ => Type::User(name.to_string()),
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Builtin(kind) => write!(f, "{}", kind),
            Type::User(name) => write!(f, "{}", name),
        }
    }
}
