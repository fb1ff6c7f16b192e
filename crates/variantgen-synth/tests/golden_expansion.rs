use std::fs;
use std::path::Path;

use variantgen_core::{Declaration, Member};
use variantgen_synth::{GeneratedMember, SynthesisOptions, VariantSynthesizer};

fn fixture_dir() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

fn load_models() -> Vec<Declaration> {
    let path = fixture_dir().join("tests/fixtures/item_models.json");
    let contents = fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("missing fixture at {}", path.display()));
    serde_json::from_str(&contents).expect("parse fixture declarations")
}

fn golden(name: &str) -> String {
    let path = fixture_dir().join(format!("tests/golden/{name}.swift"));
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("missing golden at {}", path.display()))
}

#[test]
fn golden_expansions_are_stable() {
    let synthesizer = VariantSynthesizer::default();

    for decl in load_models() {
        let texts = synthesizer.expand_to_text(&decl).expect("expansion succeeds");
        let rendered = format!("{}\n", texts.join("\n\n"));
        assert_eq!(rendered, golden(&decl.name), "golden mismatch for {}", decl.name);
    }
}

#[test]
fn item_relationship_is_retargeted() {
    let models = load_models();
    let item = &models[0];
    let expansion = VariantSynthesizer::default().expand(item).expect("expand item");
    let texts = expansion.render();

    assert!(texts[0].contains("associatedtype ItemUpdateRecord: ItemUpdateRecordProtocol"));
    assert!(texts[0].contains("var records: [ItemUpdateRecord]? { get set }"));
    assert!(texts[2].contains("var records: [PreviewItemUpdateRecord]?"));
    assert!(texts[2].contains("records: [PreviewItemUpdateRecord] = [],"));
    assert!(expansion.warnings.is_empty());
}

#[test]
fn variant_members_follow_field_order() {
    let models = load_models();
    let item = &models[0];
    let expansion = VariantSynthesizer::default().expand(item).expect("expand item");

    let field_names: Vec<String> = item
        .members
        .iter()
        .filter_map(|member| match member {
            Member::Field(field) => Some(field.bindings[0].pattern.to_string()),
            _ => None,
        })
        .collect();

    for decl in expansion.declarations.iter().filter(|decl| !decl.members.is_empty()) {
        let names: Vec<String> = decl
            .members
            .iter()
            .filter_map(|member| match member {
                GeneratedMember::PropertyRequirement { name, .. }
                | GeneratedMember::StoredProperty { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(names, field_names, "member order differs in {}", decl.name);
    }
}

#[test]
fn model_without_relationships_keeps_initializer() {
    let mut models = load_models();
    let mut item = models.remove(0);
    item.members.retain(|member| match member {
        Member::Field(field) => field.attributes.iter().all(|attr| attr.name != "Relationship"),
        _ => true,
    });
    let source_init = item
        .members
        .iter()
        .find_map(|member| match member {
            Member::Initializer(init) => Some(init.clone()),
            _ => None,
        })
        .expect("fixture has an initializer");

    let options = SynthesisOptions {
        emit_observable: false,
        ..SynthesisOptions::default()
    };
    let expansion = VariantSynthesizer::new(options).expand(&item).expect("expand item");
    assert_eq!(expansion.declarations.len(), 2);

    let protocol = &expansion.declarations[0];
    assert!(
        protocol
            .members
            .iter()
            .all(|member| !matches!(member, GeneratedMember::AssociatedType { .. }))
    );

    let preview = &expansion.declarations[1];
    let Some(GeneratedMember::Initializer(init)) = preview.members.last() else {
        panic!("preview must end with the initializer");
    };
    assert_eq!(init, &source_init);
    assert_eq!(init.to_string(), source_init.to_string());
}
