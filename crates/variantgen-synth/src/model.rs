use serde::{Deserialize, Serialize};

use variantgen_core::Diagnostic;

use crate::output::GeneratedDecl;
use crate::output::swift::SwiftPrinter;

/// Options for the variant synthesizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisOptions {
    /// Attribute that marks a declaration as a model class.
    pub model_attribute: String,
    /// Attributes that flag a field as a relationship.
    pub relationship_attributes: Vec<String>,
    /// Naming scheme for generated declarations.
    pub naming: NamingConvention,
    /// Emit the observable protocol and observable preview class.
    pub emit_observable: bool,
    /// Indentation unit for generated members.
    pub indent: String,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            model_attribute: "Model".to_string(),
            relationship_attributes: vec![
                "Relationship".to_string(),
                "InverseRelationship".to_string(),
            ],
            naming: NamingConvention::default(),
            emit_observable: true,
            indent: "  ".to_string(),
        }
    }
}

impl SynthesisOptions {
    /// Concrete variants to emit, in output order.
    pub fn variants(&self) -> Vec<VariantKind> {
        if self.emit_observable {
            vec![VariantKind::Preview, VariantKind::ObservablePreview]
        } else {
            vec![VariantKind::Preview]
        }
    }
}

/// Concrete variant of a model declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    /// Plain value-type preview.
    Preview,
    /// Reference-type preview wrapped in change notification.
    ObservablePreview,
}

/// Prefixes and suffixes applied to model names.
///
/// Names are derived purely from the model name, so declarations expanded
/// independently still agree on each other's variant names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConvention {
    pub protocol_suffix: String,
    pub preview_prefix: String,
    pub observable_protocol_prefix: String,
    pub observable_preview_prefix: String,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            protocol_suffix: "Protocol".to_string(),
            preview_prefix: "Preview".to_string(),
            observable_protocol_prefix: "Observable".to_string(),
            observable_preview_prefix: "ObservablePreview".to_string(),
        }
    }
}

impl NamingConvention {
    pub fn protocol_name(&self, model: &str) -> String {
        format!("{model}{}", self.protocol_suffix)
    }

    pub fn preview_name(&self, model: &str) -> String {
        format!("{}{model}", self.preview_prefix)
    }

    pub fn observable_protocol_name(&self, model: &str) -> String {
        format!("{}{model}", self.observable_protocol_prefix)
    }

    pub fn observable_preview_name(&self, model: &str) -> String {
        format!("{}{model}", self.observable_preview_prefix)
    }

    pub fn variant_name(&self, kind: VariantKind, model: &str) -> String {
        match kind {
            VariantKind::Preview => self.preview_name(model),
            VariantKind::ObservablePreview => self.observable_preview_name(model),
        }
    }
}

/// Result of expanding one declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    /// Generated declarations in emission order.
    pub declarations: Vec<GeneratedDecl>,
    /// Non-fatal findings raised while rewriting.
    pub warnings: Vec<Diagnostic>,
}

impl Expansion {
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Render every declaration with the given printer.
    pub fn render_with(&self, printer: &SwiftPrinter) -> Vec<String> {
        self.declarations
            .iter()
            .map(|decl| printer.render(decl))
            .collect()
    }

    /// Render every declaration with the default printer.
    pub fn render(&self) -> Vec<String> {
        self.render_with(&SwiftPrinter::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_variant_names() {
        let naming = NamingConvention::default();
        assert_eq!(naming.protocol_name("Item"), "ItemProtocol");
        assert_eq!(naming.preview_name("Item"), "PreviewItem");
        assert_eq!(naming.observable_protocol_name("Item"), "ObservableItem");
        assert_eq!(
            naming.variant_name(VariantKind::ObservablePreview, "Item"),
            "ObservablePreviewItem"
        );
    }

    #[test]
    fn observable_toggle_controls_variants() {
        let mut options = SynthesisOptions::default();
        assert_eq!(
            options.variants(),
            vec![VariantKind::Preview, VariantKind::ObservablePreview]
        );
        options.emit_observable = false;
        assert_eq!(options.variants(), vec![VariantKind::Preview]);
    }
}
