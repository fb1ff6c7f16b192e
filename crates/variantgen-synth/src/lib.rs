//! Variant synthesis engine for variantgen.
//!
//! This crate turns a model declaration into its capability protocol, a
//! preview struct and an observable preview class, rewriting relationship
//! types consistently across fields and the initializer.

pub mod classify;
pub mod engine;
pub mod inverse;
pub mod model;
pub mod output;
pub mod registry;
pub mod rewrite;

pub use classify::{ClassifiedDeclaration, FieldMember, classify};
pub use engine::VariantSynthesizer;
pub use inverse::validate_inverse_relationship;
pub use model::{Expansion, NamingConvention, SynthesisOptions, VariantKind};
pub use output::swift::SwiftPrinter;
pub use output::{GeneratedDecl, GeneratedKind, GeneratedMember};
pub use registry::RelationshipTypeRegistry;
pub use rewrite::{RewriteOutcome, SkippedParameter, TypeRewriter};
