//! Canonical Go type model and its textual rendering.
//!
//! Every grammar shape the classifier understands has one variant; any other
//! shape lands in [`GoType::Other`], which keeps the grammar kind for
//! classification and the source text for rendering.

use super::analyzer::{GoParam, GoSignature};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GoType {
    /// A plain identifier such as `int` or `Node`.
    Named(String),
    Pointer(Box<GoType>),
    Slice(Box<GoType>),
    Array { len: String, elem: Box<GoType> },
    Map { key: Box<GoType>, value: Box<GoType> },
    Chan { dir: ChanDir, elem: Box<GoType> },
    /// Inline `struct { ... }` literal.
    Struct,
    /// Inline `interface { ... }` literal.
    Interface,
    /// Inline `func(...) ...` type.
    Func,
    /// `package.Name`
    Qualified { package: String, name: String },
    /// `...T` in the last parameter position.
    Variadic(Box<GoType>),
    Other { kind: String, text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChanDir {
    #[default]
    Both,
    Send,
    Recv,
}

impl GoType {
    pub fn named(name: impl Into<String>) -> Self {
        GoType::Named(name.into())
    }

    pub fn pointer(inner: GoType) -> Self {
        GoType::Pointer(Box::new(inner))
    }

    pub fn slice(elem: GoType) -> Self {
        GoType::Slice(Box::new(elem))
    }

    pub fn map(key: GoType, value: GoType) -> Self {
        GoType::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Identifier name for [`GoType::Named`].
    pub fn as_named(&self) -> Option<&str> {
        match self {
            GoType::Named(name) => Some(name),
            _ => None,
        }
    }

    /// Walk this type and every type nested inside it.
    pub fn any(&self, predicate: &impl Fn(&GoType) -> bool) -> bool {
        if predicate(self) {
            return true;
        }
        match self {
            GoType::Pointer(inner) | GoType::Slice(inner) | GoType::Variadic(inner) => {
                inner.any(predicate)
            }
            GoType::Array { elem, .. } | GoType::Chan { elem, .. } => elem.any(predicate),
            GoType::Map { key, value } => key.any(predicate) || value.any(predicate),
            _ => false,
        }
    }
}

impl fmt::Display for GoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoType::Named(name) => f.write_str(name),
            GoType::Pointer(inner) => write!(f, "*{inner}"),
            GoType::Slice(elem) => write!(f, "[]{elem}"),
            GoType::Array { len, elem } => write!(f, "[{len}]{elem}"),
            GoType::Map { key, value } => write!(f, "map[{key}]{value}"),
            GoType::Chan { dir, elem } => match dir {
                ChanDir::Both => write!(f, "chan {elem}"),
                ChanDir::Send => write!(f, "chan<- {elem}"),
                ChanDir::Recv => write!(f, "<-chan {elem}"),
            },
            GoType::Struct => f.write_str("struct{...}"),
            GoType::Interface => f.write_str("interface{...}"),
            GoType::Func => f.write_str("func(...)"),
            GoType::Qualified { package, name } => write!(f, "{package}.{name}"),
            GoType::Variadic(elem) => write!(f, "...{elem}"),
            GoType::Other { text, .. } => f.write_str(text),
        }
    }
}

impl fmt::Display for GoParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.names.is_empty() {
            write!(f, "{} ", self.names.join(", "))?;
        }
        write!(f, "{}", self.ty)
    }
}

fn write_list(
    f: &mut fmt::Formatter<'_>,
    params: &[GoParam],
    open: &str,
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{param}")?;
    }
    f.write_str(close)
}

fn write_params(f: &mut fmt::Formatter<'_>, params: &[GoParam]) -> fmt::Result {
    write_list(f, params, "(", ")")
}

impl fmt::Display for GoSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("func")?;
        if let Some(receiver) = &self.receiver {
            f.write_str(" ")?;
            write_params(f, std::slice::from_ref(receiver))?;
        }
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }
        if !self.type_params.is_empty() {
            write_list(f, &self.type_params, "[", "]")?;
        }
        write_params(f, &self.params)?;
        match self.results.as_slice() {
            [] => Ok(()),
            [single] if single.names.is_empty() => write!(f, " {}", single.ty),
            results => {
                f.write_str(" ")?;
                write_params(f, results)
            }
        }
    }
}
