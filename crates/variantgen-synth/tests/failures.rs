use variantgen_core::{
    Attribute, BindingKind, Declaration, DeclarationKind, FieldDecl, InitializerDecl, Member,
    OpaqueMember, Pattern, PatternBinding, SynthesisError, TypeExpression,
};
use variantgen_synth::VariantSynthesizer;

fn field(name: &str, ty: Option<TypeExpression>) -> Member {
    Member::Field(FieldDecl {
        attributes: Vec::new(),
        binding: BindingKind::Var,
        bindings: vec![PatternBinding {
            pattern: Pattern::Identifier {
                name: name.to_string(),
            },
            type_annotation: ty,
            initializer: None,
        }],
    })
}

fn init() -> Member {
    Member::Initializer(InitializerDecl {
        modifiers: Vec::new(),
        parameters: Vec::new(),
        closing_trivia: String::new(),
        effects: None,
        body: "{}".to_string(),
    })
}

fn model(members: Vec<Member>) -> Declaration {
    Declaration {
        kind: DeclarationKind::Class,
        name: "Item".to_string(),
        attributes: vec![Attribute::new("Model")],
        members,
    }
}

fn expand_err(decl: &Declaration) -> SynthesisError {
    VariantSynthesizer::default()
        .expand(decl)
        .expect_err("expansion must fail")
}

#[test]
fn function_member_aborts_expansion() {
    let decl = model(vec![
        field("id", Some(TypeExpression::named("UUID"))),
        init(),
        Member::Other(OpaqueMember {
            kind: "function".to_string(),
            source: "func touch() {}".to_string(),
        }),
    ]);
    let err = expand_err(&decl);
    assert_eq!(err, SynthesisError::UnsupportedMemberKind("function".to_string()));
    assert_eq!(err.code(), "unsupported_member_kind");
}

#[test]
fn initializer_before_field_is_rejected() {
    let decl = model(vec![init(), field("id", Some(TypeExpression::named("UUID")))]);
    assert_eq!(expand_err(&decl), SynthesisError::InitializerOutOfOrder);
}

#[test]
fn untyped_field_is_rejected() {
    let decl = model(vec![field("id", None), init()]);
    let err = expand_err(&decl);
    assert_eq!(err, SynthesisError::FieldMissingType("id".to_string()));
    assert_eq!(
        err.to_string(),
        "the variable declaration of `id` must explicitly declare a type"
    );
}

#[test]
fn missing_model_marker_is_rejected() {
    let mut decl = model(vec![init()]);
    decl.attributes = vec![Attribute::new("Observable")];
    assert_eq!(expand_err(&decl), SynthesisError::NotAModelDeclaration);
}

#[test]
fn empty_model_expands_to_initializer_only_variants() {
    let decl = model(vec![init()]);
    let texts = VariantSynthesizer::default()
        .expand_to_text(&decl)
        .expect("expand empty model");
    assert_eq!(
        texts,
        vec![
            "protocol ItemProtocol {}".to_string(),
            "protocol ObservableItem: ItemProtocol, Observable {}".to_string(),
            "struct PreviewItem: ItemProtocol {\n  init() {}\n}".to_string(),
            "@Observable\nfinal class ObservablePreviewItem: ObservableItem {\n  init() {}\n}"
                .to_string(),
        ]
    );
}
