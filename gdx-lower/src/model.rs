//! Intermediate model types shared by the lowering passes.
//!
//! These are plain values: descriptor parts produced by
//! [`decompose`](crate::lower::decompose), the lowered result handed back to
//! the caller, and the few records of the API description that the
//! predicates inspect.

use std::fmt;

/// A leading qualifier on a native type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    /// `enum::Foo.Bar`
    Enum,
    /// `const Foo`
    Const,
    /// `bitfieldFoo` (no separator in the API description)
    Bitfield,
}

impl Qualifier {
    /// Qualifiers in the order they are checked.
    pub const ALL: [Qualifier; 3] = [Qualifier::Enum, Qualifier::Const, Qualifier::Bitfield];

    /// The literal prefix as it appears in a descriptor.
    pub fn prefix(self) -> &'static str {
        match self {
            Qualifier::Enum => "enum::",
            Qualifier::Const => "const ",
            Qualifier::Bitfield => "bitfield",
        }
    }
}

/// Pointer indirection encoded by trailing `*` markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indirection {
    Value,
    Pointer,
    PointerToPointer,
}

impl Indirection {
    /// Map a trailing `*` count to an indirection level. Anything deeper than
    /// two levels has no representation in the target.
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            0 => Some(Indirection::Value),
            1 => Some(Indirection::Pointer),
            2 => Some(Indirection::PointerToPointer),
            _ => None,
        }
    }

    pub fn level(self) -> usize {
        match self {
            Indirection::Value => 0,
            Indirection::Pointer => 1,
            Indirection::PointerToPointer => 2,
        }
    }

    /// The pointer markers to prefix onto a target type.
    pub fn markers(self) -> &'static str {
        &"**"[..self.level()]
    }
}

/// A native type descriptor split into qualifier, indirection and base name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor<'a> {
    pub qualifier: Option<Qualifier>,
    pub indirection: Indirection,
    /// Base name with qualifier, pointer markers and surrounding whitespace
    /// removed.
    pub base: &'a str,
}

/// Result of lowering one type descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoweredType {
    /// Target type text. Empty means "no type" (a `void` return).
    pub target: String,
    /// Whether values of this type go through the boundary encoder.
    pub needs_encoder: bool,
}

impl LoweredType {
    pub(crate) fn encoded(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            needs_encoder: true,
        }
    }

    pub(crate) fn raw(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            needs_encoder: false,
        }
    }

    /// True when the lowered type is absent (no return value).
    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }
}

/// One lowered clause of a native structure layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructField {
    /// A live field declaration.
    Field { name: String, ty: String },
    /// A member the target cannot represent (function pointers). Rendered as
    /// a comment so the layout stays documented.
    Unsupported { name: String, ty: String },
}

impl StructField {
    pub fn name(&self) -> &str {
        match self {
            StructField::Field { name, .. } | StructField::Unsupported { name, .. } => name,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, StructField::Field { .. })
    }
}

impl fmt::Display for StructField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructField::Field { name, ty } => write!(f, "{name} {ty}"),
            StructField::Unsupported { name, ty } => write!(f, "/* {name} {ty} */"),
        }
    }
}

/// A builtin class constructor overload from the API description.
#[derive(Debug, Clone, Default)]
pub struct ClassConstructor {
    pub arguments: Vec<ConstructorArgument>,
}

/// A single constructor argument.
#[derive(Debug, Clone)]
pub struct ConstructorArgument {
    pub name: String,
    /// Raw type descriptor, unqualified and unlowered.
    pub ty: String,
}

impl ConstructorArgument {
    pub fn new(name: &str, ty: &str) -> Self {
        Self {
            name: name.to_string(),
            ty: ty.to_string(),
        }
    }
}
