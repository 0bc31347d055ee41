use std::fmt::Display;

/// Type Annotation
///
/// Written after a `:` on assignments, tool parameters and tool return types.
/// Nothing checks these at parse time; they are carried for the evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeAnnotation {
    /// `string`, `number`, `Agent`, ...
    Named(String),
    /// `T[]`
    Array(Box<TypeAnnotation>),
}

impl TypeAnnotation {
    /// The innermost named type, e.g. `string` for `string[][]`.
    pub fn base_name(&self) -> &str {
        match self {
            TypeAnnotation::Named(name) => name,
            TypeAnnotation::Array(underlying) => underlying.base_name(),
        }
    }
}

impl Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeAnnotation::Named(name) => write!(f, "{}", name),
            TypeAnnotation::Array(underlying) => write!(f, "{}[]", underlying),
        }
    }
}
