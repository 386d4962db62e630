//! Lexical scope tree.
//!
//! Scopes live in an arena owned by [`ScopeTree`] and refer to their parent
//! by [`ScopeId`]. A cursor stack tracks which scope the checker is in; the
//! tree itself is never shrunk, so once a pass finishes every scope it
//! opened, along with every symbol defined in it, is still reachable.

use std::{collections::HashMap, fmt::Display};

use log::trace;
use thiserror::Error;

use super::symbol::Symbol;

/// Index of a scope inside its [`ScopeTree`].
///
/// Scopes are numbered in creation order. Two passes over the same program
/// open scopes in the same order, so an id taken from one pass's tree names
/// the matching scope in the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScopeError {
    #[error("`{name}` is not defined in any enclosing scope")]
    NotFound { name: String },
    #[error("the root scope cannot be popped")]
    Underflow,
}

#[derive(Debug)]
pub struct Scope {
    pub id: ScopeId,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    symbols: HashMap<String, Symbol>,
}

impl Scope {
    fn new(id: ScopeId, parent: Option<ScopeId>) -> Self {
        Scope {
            id,
            parent,
            children: Vec::new(),
            symbols: HashMap::new(),
        }
    }

    /// Looks `name` up in this scope only.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Symbols defined directly in this scope, sorted by name.
    pub fn symbols(&self) -> Vec<&Symbol> {
        let mut symbols: Vec<&Symbol> = self.symbols.values().collect();
        symbols.sort_by(|a, b| a.name().cmp(b.name()));
        symbols
    }
}

#[derive(Debug)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    cursor: Vec<ScopeId>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    /// Creates a tree holding only the root scope, with the cursor on it.
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![Scope::new(ScopeId::ROOT, None)],
            cursor: vec![ScopeId::ROOT],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId::ROOT
    }

    pub fn current(&self) -> ScopeId {
        self.cursor.last().copied().unwrap_or(ScopeId::ROOT)
    }

    /// Number of scopes ever created, the root included.
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0)
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.get(id).and_then(|scope| scope.parent)
    }

    /// Whether `ancestor` is `id` itself or lies on its parent chain.
    pub fn is_within(&self, id: ScopeId, ancestor: ScopeId) -> bool {
        let mut next = Some(id);

        while let Some(scope) = next {
            if scope == ancestor {
                return true;
            }
            next = self.parent(scope);
        }

        false
    }

    /// Opens a new scope under the current one and moves the cursor into it.
    pub fn create_child(&mut self) -> ScopeId {
        let parent = self.current();
        let id = ScopeId(self.scopes.len());

        self.scopes.push(Scope::new(id, Some(parent)));
        self.scopes[parent.0].children.push(id);
        self.cursor.push(id);

        trace!("opened scope {} under {}", id, parent);
        id
    }

    /// Moves the cursor back to the parent of the current scope.
    ///
    /// The scope stays in the tree with its symbols intact.
    pub fn pop(&mut self) -> Result<ScopeId, ScopeError> {
        if self.cursor.len() <= 1 {
            return Err(ScopeError::Underflow);
        }

        let closed = self.cursor.pop().ok_or(ScopeError::Underflow)?;
        trace!("closed scope {}, back in {}", closed, self.current());

        Ok(closed)
    }

    /// Binds `symbol` in the current scope, replacing any earlier symbol of
    /// the same name in that scope.
    pub fn define(&mut self, symbol: Symbol) -> Option<Symbol> {
        let current = self.current();
        trace!("defining {} in scope {}", symbol, current);

        self.scopes[current.0]
            .symbols
            .insert(symbol.name().to_string(), symbol)
    }

    /// Looks `name` up starting at `from` (the current scope when `None`)
    /// and walking outwards through the parents.
    pub fn resolve(&self, name: &str, from: Option<ScopeId>) -> Result<&Symbol, ScopeError> {
        let mut next = Some(from.unwrap_or_else(|| self.current()));

        while let Some(id) = next {
            let Some(scope) = self.get(id) else {
                break;
            };

            if let Some(symbol) = scope.lookup(name) {
                return Ok(symbol);
            }

            next = scope.parent;
        }

        Err(ScopeError::NotFound {
            name: name.to_string(),
        })
    }

    fn fmt_scope(&self, f: &mut std::fmt::Formatter<'_>, id: ScopeId, depth: usize) -> std::fmt::Result {
        let Some(scope) = self.get(id) else {
            return Ok(());
        };
        let indent = "  ".repeat(depth);

        writeln!(f, "{}scope {}", indent, id)?;
        for symbol in scope.symbols() {
            writeln!(f, "{}  {}", indent, symbol)?;
        }
        for child in &scope.children {
            self.fmt_scope(f, *child, depth + 1)?;
        }

        Ok(())
    }
}

impl Display for ScopeTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_scope(f, ScopeId::ROOT, 0)
    }
}
