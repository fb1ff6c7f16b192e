use tracing::{info, warn};

use variantgen_core::{Declaration, Diagnostic, Result, resolve};

use crate::classify::{ClassifiedDeclaration, classify};
use crate::model::{Expansion, SynthesisOptions, VariantKind};
use crate::output::swift::SwiftPrinter;
use crate::output::{GeneratedDecl, GeneratedKind, GeneratedMember};
use crate::registry::RelationshipTypeRegistry;
use crate::rewrite::TypeRewriter;

/// Entry point for expanding model declarations into their variants.
///
/// Holds no state across calls; every expansion works on its own
/// accumulators, so one synthesizer can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct VariantSynthesizer {
    options: SynthesisOptions,
}

impl VariantSynthesizer {
    pub fn new(options: SynthesisOptions) -> Self {
        Self { options }
    }

    /// Printer configured with the synthesizer's indentation.
    pub fn printer(&self) -> SwiftPrinter {
        SwiftPrinter::new(self.options.indent.clone())
    }

    /// Classify and synthesize a declaration.
    pub fn expand(&self, decl: &Declaration) -> Result<Expansion> {
        let classified = classify(decl, &self.options)?;
        self.synthesize(&classified)
    }

    /// Classify, synthesize and render a declaration.
    pub fn expand_to_text(&self, decl: &Declaration) -> Result<Vec<String>> {
        let expansion = self.expand(decl)?;
        Ok(expansion.render_with(&self.printer()))
    }

    /// Build the protocol and variant declarations for a classified model.
    pub fn synthesize(&self, decl: &ClassifiedDeclaration<'_>) -> Result<Expansion> {
        let naming = &self.options.naming;
        let variants = self.options.variants();

        let mut registry = RelationshipTypeRegistry::default();
        let mut requirements = Vec::with_capacity(decl.fields.len());
        let mut variant_members: Vec<Vec<GeneratedMember>> = variants
            .iter()
            .map(|_| Vec::with_capacity(decl.fields.len() + 1))
            .collect();

        for field in &decl.fields {
            requirements.push(GeneratedMember::PropertyRequirement {
                name: field.name.clone(),
                ty: field.ty.to_string(),
            });

            if field.is_relationship {
                let shape = resolve(&field.ty)?;
                registry.insert(&shape.inner);

                for (variant, members) in variants.iter().zip(variant_members.iter_mut()) {
                    members.push(GeneratedMember::StoredProperty {
                        binding: field.binding,
                        name: field.name.clone(),
                        ty: shape.reassemble(&naming.variant_name(*variant, &shape.inner)),
                        default_value: field.default_value.clone(),
                    });
                }
            } else {
                let ty = field.ty.to_string();
                for members in &mut variant_members {
                    members.push(GeneratedMember::StoredProperty {
                        binding: field.binding,
                        name: field.name.clone(),
                        ty: ty.clone(),
                        default_value: field.default_value.clone(),
                    });
                }
            }
        }

        let mut warnings = Vec::new();
        for (position, (variant, members)) in
            variants.iter().zip(variant_members.iter_mut()).enumerate()
        {
            let rewriter =
                TypeRewriter::new(&registry, |name: &str| naming.variant_name(*variant, name));
            let outcome = rewriter.rewrite_initializer(decl.initializer);

            // Every variant skips the same parameters; report them once.
            if position == 0 {
                for skipped in &outcome.skipped {
                    warn!(
                        model = %decl.name,
                        parameter = %skipped.name,
                        error = %skipped.reason,
                        "relationship parameter not rewritten"
                    );
                    warnings.push(Diagnostic::warning(
                        "relationship_parameter_not_rewritten",
                        format!(
                            "/members/{}/parameters/{}",
                            decl.initializer_index, skipped.index
                        ),
                        format!(
                            "parameter `{}` of `{}` refers to a relationship type but was left unchanged: {}",
                            skipped.name, decl.name, skipped.reason
                        ),
                        Some(
                            "use a named type wrapped only in optionals or arrays for relationship parameters"
                                .to_string(),
                        ),
                    ));
                }
            }

            members.push(GeneratedMember::Initializer(outcome.initializer));
        }

        let protocol_name = naming.protocol_name(decl.name);
        let mut declarations = Vec::with_capacity(2 + 2 * usize::from(self.options.emit_observable));

        let mut protocol = GeneratedDecl::new(GeneratedKind::Protocol, protocol_name.clone());
        protocol.members = registry
            .iter()
            .map(|name| GeneratedMember::AssociatedType {
                name: name.to_string(),
                conformance: naming.protocol_name(name),
            })
            .chain(requirements)
            .collect();
        declarations.push(protocol);

        if self.options.emit_observable {
            let mut observable = GeneratedDecl::new(
                GeneratedKind::Protocol,
                naming.observable_protocol_name(decl.name),
            );
            observable.inherited = vec![protocol_name.clone(), "Observable".to_string()];
            observable.where_clause = registry
                .iter()
                .map(|name| format!("{name}: {}", naming.observable_protocol_name(name)))
                .collect();
            declarations.push(observable);
        }

        for (variant, members) in variants.into_iter().zip(variant_members) {
            let decl_for_variant = match variant {
                VariantKind::Preview => {
                    let mut preview =
                        GeneratedDecl::new(GeneratedKind::Struct, naming.preview_name(decl.name));
                    preview.inherited = vec![protocol_name.clone()];
                    preview
                }
                VariantKind::ObservablePreview => {
                    let mut observable = GeneratedDecl::new(
                        GeneratedKind::Class,
                        naming.observable_preview_name(decl.name),
                    );
                    observable.attributes = vec!["@Observable".to_string()];
                    observable.modifiers = vec!["final".to_string()];
                    observable.inherited = vec![naming.observable_protocol_name(decl.name)];
                    observable
                }
            };
            declarations.push(GeneratedDecl {
                members,
                ..decl_for_variant
            });
        }

        info!(
            model = %decl.name,
            fields = decl.fields.len(),
            relationship_types = registry.len(),
            declarations = declarations.len(),
            warnings = warnings.len(),
            "declaration expanded"
        );

        Ok(Expansion {
            declarations,
            warnings,
        })
    }
}
