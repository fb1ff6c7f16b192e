use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Structured type annotation as supplied by the host syntax tree.
///
/// Only `Named`, `Optional` and `Array` participate in relationship
/// resolution; the remaining shapes exist so that the engine can reject them
/// with a rendered description instead of mis-rendering them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TypeExpression {
    /// Plain identifier type (e.g. `UUID`, `Foundation.Date`).
    Named { name: String },
    /// `Wrapped?`
    Optional { wrapped: Box<TypeExpression> },
    /// `Wrapped!`
    ImplicitlyUnwrapped { wrapped: Box<TypeExpression> },
    /// `[Element]`
    Array { element: Box<TypeExpression> },
    /// `[Key: Value]`
    Dictionary {
        key: Box<TypeExpression>,
        value: Box<TypeExpression>,
    },
    /// `(A, B)`
    Tuple { elements: Vec<TypeExpression> },
    /// `(A, B) -> R`
    Function {
        parameters: Vec<TypeExpression>,
        result: Box<TypeExpression>,
    },
    /// `Name<A, B>`
    Generic {
        name: String,
        arguments: Vec<TypeExpression>,
    },
}

impl TypeExpression {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named { name: name.into() }
    }

    pub fn optional(wrapped: TypeExpression) -> Self {
        Self::Optional {
            wrapped: Box::new(wrapped),
        }
    }

    pub fn array(element: TypeExpression) -> Self {
        Self::Array {
            element: Box::new(element),
        }
    }

    pub fn dictionary(key: TypeExpression, value: TypeExpression) -> Self {
        Self::Dictionary {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Returns true when `name` appears as a named type anywhere in the expression.
    pub fn mentions(&self, name: &str) -> bool {
        match self {
            Self::Named { name: own } => own == name,
            Self::Optional { wrapped } | Self::ImplicitlyUnwrapped { wrapped } => {
                wrapped.mentions(name)
            }
            Self::Array { element } => element.mentions(name),
            Self::Dictionary { key, value } => key.mentions(name) || value.mentions(name),
            Self::Tuple { elements } => elements.iter().any(|item| item.mentions(name)),
            Self::Function { parameters, result } => {
                parameters.iter().any(|item| item.mentions(name)) || result.mentions(name)
            }
            Self::Generic { name: own, arguments } => {
                own == name || arguments.iter().any(|item| item.mentions(name))
            }
        }
    }
}

impl fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name } => f.write_str(name),
            Self::Optional { wrapped } => write_wrapped(f, wrapped, "?"),
            Self::ImplicitlyUnwrapped { wrapped } => write_wrapped(f, wrapped, "!"),
            Self::Array { element } => write!(f, "[{element}]"),
            Self::Dictionary { key, value } => write!(f, "[{key}: {value}]"),
            Self::Tuple { elements } => {
                f.write_str("(")?;
                write_list(f, elements)?;
                f.write_str(")")
            }
            Self::Function { parameters, result } => {
                f.write_str("(")?;
                write_list(f, parameters)?;
                write!(f, ") -> {result}")
            }
            Self::Generic { name, arguments } => {
                write!(f, "{name}<")?;
                write_list(f, arguments)?;
                f.write_str(">")
            }
        }
    }
}

fn write_wrapped(f: &mut fmt::Formatter<'_>, wrapped: &TypeExpression, mark: &str) -> fmt::Result {
    if matches!(wrapped, TypeExpression::Function { .. }) {
        write!(f, "({wrapped}){mark}")
    } else {
        write!(f, "{wrapped}{mark}")
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[TypeExpression]) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_wrappers() {
        let ty = TypeExpression::optional(TypeExpression::array(TypeExpression::named(
            "ItemUpdateRecord",
        )));
        assert_eq!(ty.to_string(), "[ItemUpdateRecord]?");

        let dict = TypeExpression::dictionary(
            TypeExpression::named("String"),
            TypeExpression::array(TypeExpression::named("Int")),
        );
        assert_eq!(dict.to_string(), "[String: [Int]]");
    }

    #[test]
    fn parenthesizes_optional_function() {
        let ty = TypeExpression::optional(TypeExpression::Function {
            parameters: vec![TypeExpression::named("Int")],
            result: Box::new(TypeExpression::named("Void")),
        });
        assert_eq!(ty.to_string(), "((Int) -> Void)?");
    }

    #[test]
    fn mentions_looks_through_every_shape() {
        let ty = TypeExpression::dictionary(
            TypeExpression::named("String"),
            TypeExpression::optional(TypeExpression::named("Item")),
        );
        assert!(ty.mentions("Item"));
        assert!(!ty.mentions("ItemUpdateRecord"));

        let generic = TypeExpression::Generic {
            name: "Set".to_string(),
            arguments: vec![TypeExpression::named("Item")],
        };
        assert!(generic.mentions("Item"));
        assert!(generic.mentions("Set"));
    }
}
