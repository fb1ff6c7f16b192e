use tracing::debug;

use variantgen_core::{InitializerDecl, SynthesisError, TypeExpression, resolve};

use crate::registry::RelationshipTypeRegistry;

/// A parameter left untouched because its type could not be resolved even
/// though it refers to a tracked relationship type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedParameter {
    pub index: usize,
    pub name: String,
    pub reason: SynthesisError,
}

/// Initializer with rewritten parameter types.
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    pub initializer: InitializerDecl,
    pub skipped: Vec<SkippedParameter>,
}

/// Retargets tracked relationship types inside parameter types.
///
/// Rewriting is best effort: a parameter whose type cannot be resolved is
/// left as it is and never fails the expansion.
pub struct TypeRewriter<'a, F> {
    tracked: &'a RelationshipTypeRegistry,
    rename: F,
}

impl<'a, F> TypeRewriter<'a, F>
where
    F: Fn(&str) -> String,
{
    pub fn new(tracked: &'a RelationshipTypeRegistry, rename: F) -> Self {
        Self { tracked, rename }
    }

    /// Rewrite a single type; `Ok(None)` means the type is not tracked.
    pub fn rewrite_type(
        &self,
        ty: &TypeExpression,
    ) -> Result<Option<TypeExpression>, SynthesisError> {
        let shape = resolve(ty)?;
        if !self.tracked.contains(&shape.inner) {
            return Ok(None);
        }
        Ok(Some(shape.rebuild(&(self.rename)(shape.inner.as_str()))))
    }

    /// Rewrite every parameter type of an initializer.
    pub fn rewrite_initializer(&self, init: &InitializerDecl) -> RewriteOutcome {
        let mut initializer = init.clone();
        let mut skipped = Vec::new();

        if self.tracked.is_empty() {
            return RewriteOutcome {
                initializer,
                skipped,
            };
        }

        for (index, parameter) in initializer.parameters.iter_mut().enumerate() {
            match self.rewrite_type(&parameter.ty) {
                Ok(Some(rewritten)) => {
                    debug!(
                        parameter = %parameter.first_name,
                        from = %parameter.ty,
                        to = %rewritten,
                        "parameter type rewritten"
                    );
                    parameter.ty = rewritten;
                }
                Ok(None) => {}
                Err(reason) => {
                    if self.tracked.iter().any(|name| parameter.ty.mentions(name)) {
                        skipped.push(SkippedParameter {
                            index,
                            name: parameter.first_name.clone(),
                            reason,
                        });
                    } else {
                        debug!(
                            parameter = %parameter.first_name,
                            ty = %parameter.ty,
                            "parameter type left as is"
                        );
                    }
                }
            }
        }

        RewriteOutcome {
            initializer,
            skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use variantgen_core::Parameter;

    use super::*;

    fn parameter(name: &str, ty: TypeExpression, default_value: Option<&str>) -> Parameter {
        Parameter {
            leading_trivia: "\n    ".to_string(),
            first_name: name.to_string(),
            second_name: None,
            ty,
            default_value: default_value.map(str::to_string),
            trailing_comma: true,
        }
    }

    fn initializer(parameters: Vec<Parameter>) -> InitializerDecl {
        InitializerDecl {
            modifiers: Vec::new(),
            parameters,
            closing_trivia: "\n  ".to_string(),
            effects: None,
            body: "{\n    self.records = records\n  }".to_string(),
        }
    }

    fn preview(name: &str) -> String {
        format!("Preview{name}")
    }

    #[test]
    fn rewrites_only_tracked_parameters() {
        let mut tracked = RelationshipTypeRegistry::default();
        tracked.insert("ItemUpdateRecord");

        let init = initializer(vec![
            parameter("id", TypeExpression::named("UUID"), Some("UUID()")),
            parameter(
                "records",
                TypeExpression::array(TypeExpression::named("ItemUpdateRecord")),
                Some("[]"),
            ),
            parameter(
                "latest",
                TypeExpression::optional(TypeExpression::named("ItemUpdateRecord")),
                Some("nil"),
            ),
        ]);

        let outcome = TypeRewriter::new(&tracked, preview).rewrite_initializer(&init);
        let params = &outcome.initializer.parameters;
        assert_eq!(params[0], init.parameters[0]);
        assert_eq!(params[1].ty.to_string(), "[PreviewItemUpdateRecord]");
        assert_eq!(params[1].default_value.as_deref(), Some("[]"));
        assert_eq!(params[1].leading_trivia, init.parameters[1].leading_trivia);
        assert_eq!(params[2].ty.to_string(), "PreviewItemUpdateRecord?");
        assert_eq!(outcome.initializer.body, init.body);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn leaves_initializer_identical_without_tracked_types() {
        let tracked = RelationshipTypeRegistry::default();
        let init = initializer(vec![parameter("name", TypeExpression::named("String"), None)]);

        let outcome = TypeRewriter::new(&tracked, preview).rewrite_initializer(&init);
        assert_eq!(outcome.initializer.to_string(), init.to_string());
    }

    #[test]
    fn skips_unresolvable_types() {
        let mut tracked = RelationshipTypeRegistry::default();
        tracked.insert("Item");

        let init = initializer(vec![
            parameter(
                "byName",
                TypeExpression::dictionary(
                    TypeExpression::named("String"),
                    TypeExpression::named("Item"),
                ),
                None,
            ),
            parameter(
                "onChange",
                TypeExpression::Function {
                    parameters: Vec::new(),
                    result: Box::new(TypeExpression::named("Void")),
                },
                None,
            ),
        ]);

        let outcome = TypeRewriter::new(&tracked, preview).rewrite_initializer(&init);
        assert_eq!(outcome.initializer, init);
        assert_eq!(
            outcome.skipped,
            vec![SkippedParameter {
                index: 0,
                name: "byName".to_string(),
                reason: SynthesisError::UnsupportedTypeShape("[String: Item]".to_string()),
            }]
        );
    }
}
