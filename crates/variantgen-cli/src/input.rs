use std::path::Path;

use jsonschema::JSONSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};
use variantgen_core::{
    Declaration, Diagnostic, DiagnosticReport, Member, Severity, declaration_json_schema,
    member_json_schema,
};

use crate::{CliError, CliResult};

/// Load one declaration or an array of declarations from a JSON file.
pub fn load_declarations(path: &Path) -> CliResult<Vec<Declaration>> {
    let content = std::fs::read_to_string(path)?;
    let json: Value = serde_json::from_str(&content)?;
    let schema = serde_json::to_value(declaration_json_schema())?;
    let declarations = parse_documents(json, &schema)?;
    debug!(
        path = %path.display(),
        declarations = declarations.len(),
        "declarations loaded"
    );
    Ok(declarations)
}

/// Load a single member from a JSON file.
pub fn load_member(path: &Path) -> CliResult<Member> {
    let content = std::fs::read_to_string(path)?;
    let json: Value = serde_json::from_str(&content)?;
    let schema = serde_json::to_value(member_json_schema())?;
    parse_document(json, &schema)
}

/// Validate and decode either a single document or an array of documents.
pub fn parse_documents<T: DeserializeOwned>(json: Value, schema: &Value) -> CliResult<Vec<T>> {
    let compiled = compile(schema)?;

    let documents = match json {
        Value::Array(items) => items,
        other => {
            return Ok(vec![decode(&compiled, other, "")?]);
        }
    };

    let mut report = DiagnosticReport::default();
    for (index, document) in documents.iter().enumerate() {
        report.merge(validate_document(&compiled, document, &format!("/{index}")));
    }
    ensure_valid(report)?;

    documents
        .into_iter()
        .map(|document| serde_json::from_value(document).map_err(CliError::from))
        .collect()
}

pub fn parse_document<T: DeserializeOwned>(json: Value, schema: &Value) -> CliResult<T> {
    let compiled = compile(schema)?;
    decode(&compiled, json, "")
}

fn compile(schema: &Value) -> CliResult<JSONSchema> {
    JSONSchema::compile(schema).map_err(|err| CliError::Schema(err.to_string()))
}

fn decode<T: DeserializeOwned>(compiled: &JSONSchema, json: Value, prefix: &str) -> CliResult<T> {
    ensure_valid(validate_document(compiled, &json, prefix))?;
    Ok(serde_json::from_value(json)?)
}

fn validate_document(compiled: &JSONSchema, json: &Value, prefix: &str) -> DiagnosticReport {
    let mut report = DiagnosticReport::default();

    if let Err(errors) = compiled.validate(json) {
        for error in errors {
            let path = normalized_json_pointer(&format!("{prefix}{}", error.instance_path));
            report.push(Diagnostic::new(
                Severity::Error,
                "schema_violation",
                path,
                error.to_string(),
                None,
            ));
        }
    }

    report
}

fn ensure_valid(report: DiagnosticReport) -> CliResult<()> {
    if report.is_ok() {
        return Ok(());
    }
    for issue in &report.errors {
        error!(code = %issue.code, path = %issue.path, "{}", issue.message);
    }
    Err(CliError::InvalidInput(report))
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}
