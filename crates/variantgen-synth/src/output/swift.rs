use super::{GeneratedDecl, GeneratedMember};

/// Pretty-printer for generated declarations.
///
/// Members are indented by one unit. Initializers are printed from their
/// source text, so only their first line receives the indentation; the
/// continuation lines keep the layout they had in the input.
#[derive(Debug, Clone)]
pub struct SwiftPrinter {
    indent: String,
}

impl Default for SwiftPrinter {
    fn default() -> Self {
        Self::new("  ")
    }
}

impl SwiftPrinter {
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }

    /// Render a declaration to text without a trailing newline.
    pub fn render(&self, decl: &GeneratedDecl) -> String {
        let mut out = String::new();

        for attribute in &decl.attributes {
            out.push_str(attribute);
            out.push('\n');
        }
        for modifier in &decl.modifiers {
            out.push_str(modifier);
            out.push(' ');
        }
        out.push_str(decl.kind.keyword());
        out.push(' ');
        out.push_str(&decl.name);
        if !decl.inherited.is_empty() {
            out.push_str(": ");
            out.push_str(&decl.inherited.join(", "));
        }
        if !decl.where_clause.is_empty() {
            out.push_str(" where ");
            out.push_str(&decl.where_clause.join(", "));
        }

        if decl.members.is_empty() {
            out.push_str(" {}");
            return out;
        }

        out.push_str(" {\n");
        let mut previous_group = None;
        for member in &decl.members {
            let group = member.group();
            if previous_group.is_some_and(|previous| previous != group) {
                out.push('\n');
            }
            previous_group = Some(group);

            out.push_str(&self.indent);
            out.push_str(&render_member(member));
            out.push('\n');
        }
        out.push('}');
        out
    }
}

fn render_member(member: &GeneratedMember) -> String {
    match member {
        GeneratedMember::AssociatedType { name, conformance } => {
            format!("associatedtype {name}: {conformance}")
        }
        GeneratedMember::PropertyRequirement { name, ty } => {
            format!("var {name}: {ty} {{ get set }}")
        }
        GeneratedMember::StoredProperty {
            binding,
            name,
            ty,
            default_value,
        } => match default_value {
            Some(value) => format!("{} {name}: {ty} = {value}", binding.keyword()),
            None => format!("{} {name}: {ty}", binding.keyword()),
        },
        GeneratedMember::Initializer(init) => init.to_string(),
    }
}
