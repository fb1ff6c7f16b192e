use variantgen_core::declaration_json_schema;

fn main() {
    let schema = declaration_json_schema();
    let json = serde_json::to_string_pretty(&schema).expect("serialize declaration json schema");
    println!("{json}");
}
