use tracing::debug;

use variantgen_core::{Member, Result, SynthesisError};

use crate::classify::{field_bindings, field_member};
use crate::model::{Expansion, SynthesisOptions};

/// Validate a field carrying the inverse-relationship marker.
///
/// The marker only asserts the field shape; it never generates declarations,
/// so a valid field yields an empty expansion.
pub fn validate_inverse_relationship(
    member: &Member,
    options: &SynthesisOptions,
) -> Result<Expansion> {
    let Member::Field(field) = member else {
        return Err(SynthesisError::UnsupportedMemberKind(
            member.kind_name().to_string(),
        ));
    };

    let bindings = field_bindings(field)?;
    if !field.has_any_attribute(&options.relationship_attributes) {
        let context = bindings
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(SynthesisError::MissingRelationshipAttribute(context));
    }

    for binding in bindings {
        let checked = field_member(binding, field.binding, true)?;
        debug!(field = %checked.name, ty = %checked.ty, "inverse relationship validated");
    }

    Ok(Expansion::default())
}
