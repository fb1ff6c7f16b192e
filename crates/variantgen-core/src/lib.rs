//! Core contracts for variantgen.
//!
//! This crate defines the declaration syntax model handed over by the host,
//! the structured type expressions, type-shape resolution and the failure
//! taxonomy shared by the synthesizer and the CLI.

pub mod diagnostics;
pub mod error;
pub mod schema;
pub mod shape;
pub mod syntax;
pub mod types;

pub use diagnostics::{Diagnostic, DiagnosticReport, Severity};
pub use error::{Result, SynthesisError};
pub use schema::{declaration_json_schema, member_json_schema};
pub use shape::{TypeShape, Wrapper, resolve};
pub use syntax::{
    Attribute, BindingKind, Declaration, DeclarationKind, FieldDecl, InitializerDecl, Member,
    OpaqueMember, Parameter, Pattern, PatternBinding,
};
pub use types::TypeExpression;
