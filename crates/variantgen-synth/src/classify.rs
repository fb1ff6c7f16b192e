use tracing::debug;

use variantgen_core::{
    BindingKind, Declaration, DeclarationKind, FieldDecl, InitializerDecl, Member, Pattern,
    PatternBinding, Result, SynthesisError, TypeExpression,
};

use crate::model::SynthesisOptions;

/// A stored property extracted from a single binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMember {
    pub name: String,
    pub ty: TypeExpression,
    pub is_relationship: bool,
    pub default_value: Option<String>,
    pub binding: BindingKind,
}

/// Fields and initializer of a model declaration, in member order.
#[derive(Debug, Clone)]
pub struct ClassifiedDeclaration<'a> {
    pub name: &'a str,
    pub fields: Vec<FieldMember>,
    pub initializer: &'a InitializerDecl,
    /// Index of the initializer within the declaration's members.
    pub initializer_index: usize,
}

/// Split a model declaration into its fields and its initializer.
pub fn classify<'a>(
    decl: &'a Declaration,
    options: &SynthesisOptions,
) -> Result<ClassifiedDeclaration<'a>> {
    if decl.kind != DeclarationKind::Class || !decl.has_attribute(&options.model_attribute) {
        return Err(SynthesisError::NotAModelDeclaration);
    }

    let mut fields = Vec::with_capacity(decl.members.len());
    let mut initializer: Option<(usize, &InitializerDecl)> = None;

    for (idx, member) in decl.members.iter().enumerate() {
        match member {
            Member::Field(field) => {
                if initializer.is_some() {
                    return Err(SynthesisError::InitializerOutOfOrder);
                }

                let is_relationship = field.has_any_attribute(&options.relationship_attributes);
                for binding in field_bindings(field)? {
                    let extracted = field_member(binding, field.binding, is_relationship)?;
                    debug!(
                        model = %decl.name,
                        field = %extracted.name,
                        relationship = extracted.is_relationship,
                        "field classified"
                    );
                    fields.push(extracted);
                }
            }
            Member::Initializer(init) => {
                if initializer.is_some() {
                    return Err(SynthesisError::DuplicateInitializer);
                }
                initializer = Some((idx, init));
            }
            Member::Other(other) => {
                return Err(SynthesisError::UnsupportedMemberKind(other.kind.clone()));
            }
        }
    }

    let (initializer_index, initializer) = initializer.ok_or(SynthesisError::MissingInitializer)?;

    Ok(ClassifiedDeclaration {
        name: &decl.name,
        fields,
        initializer,
        initializer_index,
    })
}

/// Bindings of a field declaration; a declaration without any has no name.
pub fn field_bindings(field: &FieldDecl) -> Result<&[PatternBinding]> {
    if field.bindings.is_empty() {
        return Err(SynthesisError::FieldTooComplex(field.head()));
    }
    Ok(&field.bindings)
}

/// Extract a field from a binding that must read `name: Type [= default]`.
pub fn field_member(
    binding: &PatternBinding,
    kind: BindingKind,
    is_relationship: bool,
) -> Result<FieldMember> {
    let Pattern::Identifier { name } = &binding.pattern else {
        return Err(SynthesisError::FieldTooComplex(binding.to_string()));
    };
    let ty = binding
        .type_annotation
        .clone()
        .ok_or_else(|| SynthesisError::FieldMissingType(binding.to_string()))?;

    Ok(FieldMember {
        name: name.clone(),
        ty,
        is_relationship,
        default_value: binding.initializer.clone(),
        binding: kind,
    })
}
