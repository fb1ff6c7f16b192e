use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::syntax::{Declaration, Member};

/// Emit the JSON Schema for a declaration input document.
pub fn declaration_json_schema() -> RootSchema {
    schema_for!(Declaration)
}

/// Emit the JSON Schema for a single member input document.
pub fn member_json_schema() -> RootSchema {
    schema_for!(Member)
}
