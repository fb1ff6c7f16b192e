//! Type-shape resolution for relationship fields.
//!
//! A relationship type is a named type wrapped in any nesting of optionals and
//! arrays. Resolving it splits the rendered type into the text before the
//! innermost name, the name itself and the text after it, so the name can be
//! swapped for a variant name and the wrappers reapplied unchanged.

use crate::error::{Result, SynthesisError};
use crate::types::TypeExpression;

/// Wrapper layer stripped while resolving a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrapper {
    Optional,
    Array,
}

/// A resolved `named / optional / array` chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeShape {
    /// Wrappers from outermost to innermost.
    pub wrappers: Vec<Wrapper>,
    /// The innermost named type.
    pub inner: String,
}

impl TypeShape {
    /// Text preceding the innermost name (e.g. `[` for `[T]?`).
    pub fn prefix(&self) -> String {
        self.wrappers
            .iter()
            .filter(|wrapper| matches!(wrapper, Wrapper::Array))
            .map(|_| "[")
            .collect()
    }

    /// Text following the innermost name (e.g. `]?` for `[T]?`).
    pub fn suffix(&self) -> String {
        self.wrappers
            .iter()
            .rev()
            .map(|wrapper| match wrapper {
                Wrapper::Optional => "?",
                Wrapper::Array => "]",
            })
            .collect()
    }

    /// Reassemble the rendered type around a (possibly different) inner name.
    pub fn reassemble(&self, inner: &str) -> String {
        format!("{}{}{}", self.prefix(), inner, self.suffix())
    }

    /// Rebuild the structured type around a (possibly different) inner name.
    pub fn rebuild(&self, inner: &str) -> TypeExpression {
        self.wrappers
            .iter()
            .rev()
            .fold(TypeExpression::named(inner), |ty, wrapper| match wrapper {
                Wrapper::Optional => TypeExpression::optional(ty),
                Wrapper::Array => TypeExpression::array(ty),
            })
    }
}

/// Strip optional and array wrappers down to the innermost named type.
pub fn resolve(ty: &TypeExpression) -> Result<TypeShape> {
    let mut wrappers = Vec::new();
    let mut current = ty;

    loop {
        match current {
            TypeExpression::Named { name } => {
                return Ok(TypeShape {
                    wrappers,
                    inner: name.clone(),
                });
            }
            TypeExpression::Optional { wrapped } => {
                wrappers.push(Wrapper::Optional);
                current = wrapped.as_ref();
            }
            TypeExpression::Array { element } => {
                wrappers.push(Wrapper::Array);
                current = element.as_ref();
            }
            TypeExpression::ImplicitlyUnwrapped { .. }
            | TypeExpression::Dictionary { .. }
            | TypeExpression::Tuple { .. }
            | TypeExpression::Function { .. }
            | TypeExpression::Generic { .. } => {
                return Err(SynthesisError::UnsupportedTypeShape(current.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> TypeExpression {
        TypeExpression::named(name)
    }

    #[test]
    fn reassembles_every_supported_nesting() {
        let cases = vec![
            named("Item"),
            TypeExpression::optional(named("Item")),
            TypeExpression::array(named("Item")),
            TypeExpression::optional(TypeExpression::array(named("Item"))),
            TypeExpression::array(TypeExpression::optional(named("Item"))),
            TypeExpression::optional(TypeExpression::optional(TypeExpression::array(
                TypeExpression::array(named("Item")),
            ))),
        ];

        for ty in cases {
            let shape = resolve(&ty).expect("supported shape");
            assert_eq!(shape.inner, "Item");
            assert_eq!(shape.reassemble(&shape.inner), ty.to_string());
            assert_eq!(shape.rebuild(&shape.inner), ty);
        }
    }

    #[test]
    fn splits_prefix_and_suffix() {
        let ty = TypeExpression::optional(TypeExpression::array(TypeExpression::optional(named(
            "ItemUpdateRecord",
        ))));
        let shape = resolve(&ty).expect("supported shape");
        assert_eq!(shape.prefix(), "[");
        assert_eq!(shape.suffix(), "?]?");
        assert_eq!(
            shape.reassemble("PreviewItemUpdateRecord"),
            "[PreviewItemUpdateRecord?]?"
        );
    }

    #[test]
    fn rejects_dictionary_inside_optional() {
        let ty = TypeExpression::optional(TypeExpression::dictionary(
            named("String"),
            named("Item"),
        ));
        assert_eq!(
            resolve(&ty),
            Err(SynthesisError::UnsupportedTypeShape("[String: Item]".to_string()))
        );
    }

    #[test]
    fn rejects_generic_types() {
        let ty = TypeExpression::Generic {
            name: "Set".to_string(),
            arguments: vec![named("Item")],
        };
        assert!(matches!(
            resolve(&ty),
            Err(SynthesisError::UnsupportedTypeShape(rendered)) if rendered == "Set<Item>"
        ));
    }
}
