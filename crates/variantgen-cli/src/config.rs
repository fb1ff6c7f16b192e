use std::path::Path;

use tracing::{info, warn};
use variantgen_synth::SynthesisOptions;

use crate::CliResult;
use crate::output::write_bytes_atomic;

/// Default config file name looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "variantgen.toml";

/// Load synthesis options from a TOML file, falling back to defaults.
pub fn load_options(path: Option<&Path>) -> CliResult<SynthesisOptions> {
    let (path, explicit) = match path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };

    if !path.exists() {
        if explicit {
            warn!(path = %path.display(), "config file not found, using defaults");
        }
        return Ok(SynthesisOptions::default());
    }

    let content = std::fs::read_to_string(path)?;
    let options = parse_options(&content)?;
    info!(path = %path.display(), "config loaded");
    Ok(options)
}

pub fn parse_options(content: &str) -> CliResult<SynthesisOptions> {
    Ok(toml::from_str(content)?)
}

/// Write the default options as TOML.
pub fn save_default_options(path: &Path) -> CliResult<()> {
    let encoded = toml::to_string_pretty(&SynthesisOptions::default())?;
    write_bytes_atomic(path, encoded.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let options = parse_options(
            r#"
emit_observable = false

[naming]
preview_prefix = "Mock"
"#,
        )
        .expect("parse config");

        assert!(!options.emit_observable);
        assert_eq!(options.naming.preview_prefix, "Mock");
        assert_eq!(options.naming.protocol_suffix, "Protocol");
        assert_eq!(options.model_attribute, "Model");
    }

    #[test]
    fn default_config_round_trips() {
        let encoded = toml::to_string_pretty(&SynthesisOptions::default()).expect("encode");
        let decoded = parse_options(&encoded).expect("decode");
        assert_eq!(decoded, SynthesisOptions::default());
    }
}
