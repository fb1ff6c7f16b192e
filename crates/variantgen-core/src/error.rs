use thiserror::Error;

/// Failure taxonomy shared by the classifier, resolver and synthesizer.
///
/// Every variant aborts the expansion of the declaration it was raised for;
/// no partial output is produced alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// The declaration is not a class carrying the model marker attribute.
    #[error("the decorated type is not an @Model class")]
    NotAModelDeclaration,
    /// A member is neither a field declaration nor the initializer.
    #[error(
        "the decorated type can't contain `{0}` members, only variable declarations and an initializer; consider moving them into an extension"
    )]
    UnsupportedMemberKind(String),
    /// A field declaration follows the initializer.
    #[error("the initializer must be defined after any variable declarations")]
    InitializerOutOfOrder,
    /// The declaration has no initializer.
    #[error("the decorated type must define an initializer after its variable declarations")]
    MissingInitializer,
    /// The declaration has more than one initializer.
    #[error("the decorated type must define exactly one initializer")]
    DuplicateInitializer,
    /// A binding pattern is not a single simple identifier.
    #[error(
        "the variable declaration of `{0}` is too complex; it must be in a shape of `var fieldName: SomeType`"
    )]
    FieldTooComplex(String),
    /// A binding has no explicit type annotation.
    #[error("the variable declaration of `{0}` must explicitly declare a type")]
    FieldMissingType(String),
    /// A field checked as a relationship carries none of the relationship attributes.
    #[error("the variable declaration of `{0}` must carry a relationship attribute")]
    MissingRelationshipAttribute(String),
    /// A type is not a nesting of named, optional and array types.
    #[error(
        "the type `{0}` is not supported; relationship types must be a named type wrapped in optionals or arrays"
    )]
    UnsupportedTypeShape(String),
}

impl SynthesisError {
    /// Stable machine-readable identifier for logs and JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotAModelDeclaration => "not_a_model_declaration",
            Self::UnsupportedMemberKind(_) => "unsupported_member_kind",
            Self::InitializerOutOfOrder => "initializer_out_of_order",
            Self::MissingInitializer => "missing_initializer",
            Self::DuplicateInitializer => "duplicate_initializer",
            Self::FieldTooComplex(_) => "field_too_complex",
            Self::FieldMissingType(_) => "field_missing_type",
            Self::MissingRelationshipAttribute(_) => "missing_relationship_attribute",
            Self::UnsupportedTypeShape(_) => "unsupported_type_shape",
        }
    }
}

/// Convenience alias for results returned by variantgen crates.
pub type Result<T> = std::result::Result<T, SynthesisError>;
