use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::TypeExpression;

/// Top-level declaration handed over by the host for expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Declaration {
    /// Kind of nominal type being declared.
    pub kind: DeclarationKind,
    /// Declared type name (e.g. `Item`).
    pub name: String,
    /// Attributes attached to the declaration, in source order.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// Members of the declaration body, in source order.
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Declaration {
    /// Returns true when an attribute with the given name is attached.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attr| attr.name == name)
    }
}

/// Kind of nominal type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Class,
    Struct,
    Enum,
    Actor,
    Protocol,
}

/// Attribute such as `@Model` or `@Relationship(deleteRule: .cascade)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Attribute {
    pub name: String,
    /// Raw argument list without the surrounding parentheses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: None,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.arguments {
            Some(arguments) => write!(f, "@{}({})", self.name, arguments),
            None => write!(f, "@{}", self.name),
        }
    }
}

/// Member of a declaration body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum Member {
    /// Stored property declaration (`var` / `let`).
    Field(FieldDecl),
    /// Initializer declaration.
    Initializer(InitializerDecl),
    /// Anything else (functions, computed properties, nested types, ...).
    Other(OpaqueMember),
}

impl Member {
    /// Short description of the member kind for diagnostics.
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Field(_) => "variable",
            Self::Initializer(_) => "initializer",
            Self::Other(other) => &other.kind,
        }
    }
}

/// Member the engine does not interpret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OpaqueMember {
    /// Host-supplied kind label (e.g. `function`, `subscript`).
    pub kind: String,
    /// Source text of the member.
    #[serde(default)]
    pub source: String,
}

/// `var` or `let`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    Var,
    Let,
}

impl BindingKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
        }
    }
}

/// Variable declaration with one or more bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldDecl {
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    pub binding: BindingKind,
    #[schemars(length(min = 1))]
    pub bindings: Vec<PatternBinding>,
}

impl FieldDecl {
    /// Returns true when any of the given attribute names is attached.
    pub fn has_any_attribute(&self, names: &[String]) -> bool {
        self.attributes
            .iter()
            .any(|attr| names.iter().any(|name| *name == attr.name))
    }

    /// Attributes and binding keyword, e.g. `@Relationship var`.
    pub fn head(&self) -> String {
        self.attributes
            .iter()
            .map(ToString::to_string)
            .chain(std::iter::once(self.binding.keyword().to_string()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A single `pattern: Type = initializer` binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PatternBinding {
    pub pattern: Pattern,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_annotation: Option<TypeExpression>,
    /// Default-value expression text, without the leading `=`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<String>,
}

impl fmt::Display for PatternBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)?;
        if let Some(ty) = &self.type_annotation {
            write!(f, ": {ty}")?;
        }
        if let Some(initializer) = &self.initializer {
            write!(f, " = {initializer}")?;
        }
        Ok(())
    }
}

/// Binding pattern of a variable declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "pattern", rename_all = "snake_case")]
pub enum Pattern {
    Identifier { name: String },
    Wildcard,
    Tuple { elements: Vec<Pattern> },
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier { name } => f.write_str(name),
            Self::Wildcard => f.write_str("_"),
            Self::Tuple { elements } => {
                f.write_str("(")?;
                for (idx, element) in elements.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Initializer declaration.
///
/// Everything except parameter types is kept as verbatim text, so rendering
/// an initializer whose types were not rewritten reproduces it exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InitializerDecl {
    /// Modifiers such as `public` or `convenience`.
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Trivia between the last parameter and the closing parenthesis.
    #[serde(default)]
    pub closing_trivia: String,
    /// Effect specifiers such as `throws` or `async throws`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<String>,
    /// Body text including the braces.
    pub body: String,
}

impl fmt::Display for InitializerDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{modifier} ")?;
        }
        f.write_str("init(")?;
        for parameter in &self.parameters {
            write!(f, "{parameter}")?;
        }
        write!(f, "{})", self.closing_trivia)?;
        if let Some(effects) = &self.effects {
            write!(f, " {effects}")?;
        }
        write!(f, " {}", self.body)
    }
}

/// Initializer parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Parameter {
    /// Trivia before the parameter (newlines and indentation).
    #[serde(default)]
    pub leading_trivia: String,
    /// Argument label, or the name when no separate label is given.
    pub first_name: String,
    /// Parameter name when it differs from the argument label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeExpression,
    /// Default argument expression text, without the leading `=`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub trailing_comma: bool,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.leading_trivia, self.first_name)?;
        if let Some(second_name) = &self.second_name {
            write!(f, " {second_name}")?;
        }
        write!(f, ": {}", self.ty)?;
        if let Some(default_value) = &self.default_value {
            write!(f, " = {default_value}")?;
        }
        if self.trailing_comma {
            f.write_str(",")?;
        }
        Ok(())
    }
}
