//! Structured model of generated declarations.

pub mod swift;

use variantgen_core::{BindingKind, InitializerDecl};

/// Kind of generated declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratedKind {
    Protocol,
    Struct,
    Class,
}

impl GeneratedKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Protocol => "protocol",
            Self::Struct => "struct",
            Self::Class => "class",
        }
    }
}

/// A declaration produced by the synthesizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDecl {
    /// Attributes printed on their own lines (e.g. `@Observable`).
    pub attributes: Vec<String>,
    pub modifiers: Vec<String>,
    pub kind: GeneratedKind,
    pub name: String,
    /// Inherited types and protocol conformances.
    pub inherited: Vec<String>,
    /// Generic requirements for the `where` clause.
    pub where_clause: Vec<String>,
    pub members: Vec<GeneratedMember>,
}

impl GeneratedDecl {
    pub fn new(kind: GeneratedKind, name: impl Into<String>) -> Self {
        Self {
            attributes: Vec::new(),
            modifiers: Vec::new(),
            kind,
            name: name.into(),
            inherited: Vec::new(),
            where_clause: Vec::new(),
            members: Vec::new(),
        }
    }
}

/// Member of a generated declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedMember {
    /// `associatedtype Name: Conformance`
    AssociatedType { name: String, conformance: String },
    /// `var name: Type { get set }`
    PropertyRequirement { name: String, ty: String },
    /// `var name: Type = default`
    StoredProperty {
        binding: BindingKind,
        name: String,
        ty: String,
        default_value: Option<String>,
    },
    Initializer(InitializerDecl),
}

impl GeneratedMember {
    /// Layout group; a blank line separates consecutive groups.
    pub(crate) fn group(&self) -> u8 {
        match self {
            Self::AssociatedType { .. } => 0,
            Self::PropertyRequirement { .. } | Self::StoredProperty { .. } => 1,
            Self::Initializer(_) => 2,
        }
    }
}
