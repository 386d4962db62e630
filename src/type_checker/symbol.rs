use std::fmt::Display;

use crate::ast::types::Type;

/// The declaration a callable symbol was created from.
///
/// `id` is the parser-assigned id of the `fn` declaration, which stays the
/// same across passes and so identifies the function in every scope tree.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionRef {
    pub id: i32,
    pub parameters: Vec<(String, Type)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    Variable,
    Callable(FunctionRef),
}

/// A named entity bound in a scope.
///
/// For callables `ty` is the return type. It holds `Literals::Inferred` until
/// the function body has been checked and its return type reconciled.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    name: String,
    ty: Type,
    kind: SymbolKind,
}

impl Symbol {
    pub fn variable(name: impl Into<String>, ty: Type) -> Self {
        Symbol {
            name: name.into(),
            ty,
            kind: SymbolKind::Variable,
        }
    }

    pub fn callable(name: impl Into<String>, return_type: Type, function: FunctionRef) -> Self {
        Symbol {
            name: name.into(),
            ty: return_type,
            kind: SymbolKind::Callable(function),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn kind(&self) -> &SymbolKind {
        &self.kind
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.kind, SymbolKind::Callable(_))
    }

    pub fn function(&self) -> Option<&FunctionRef> {
        match &self.kind {
            SymbolKind::Callable(function) => Some(function),
            SymbolKind::Variable => None,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            SymbolKind::Variable => write!(f, "{}: {}", self.name, self.ty),
            SymbolKind::Callable(function) => {
                let parameters = function
                    .parameters
                    .iter()
                    .map(|(name, ty)| format!("{}: {}", name, ty))
                    .collect::<Vec<_>>()
                    .join(", ");

                write!(f, "fn {}({}) -> {}", self.name, parameters, self.ty)
            }
        }
    }
}
