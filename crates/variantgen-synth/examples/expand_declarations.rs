use std::env;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use variantgen_core::Declaration;
use variantgen_synth::{SynthesisOptions, VariantSynthesizer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let mut input: Option<PathBuf> = None;
    let mut options = SynthesisOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-observable" => options.emit_observable = false,
            "--indent" => {
                options.indent = args.next().ok_or("missing --indent value")?;
            }
            _ => {
                if input.is_none() {
                    input = Some(PathBuf::from(arg));
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let input = input.ok_or("missing declarations path")?;
    let content = std::fs::read_to_string(&input)?;
    let declarations: Vec<Declaration> = serde_json::from_str(&content)?;

    let synthesizer = VariantSynthesizer::new(options);
    for decl in &declarations {
        for text in synthesizer.expand_to_text(decl)? {
            println!("{text}\n");
        }
    }
    Ok(())
}
