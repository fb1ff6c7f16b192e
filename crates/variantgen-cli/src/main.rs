mod config;
mod input;
mod logging;
mod output;

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{error, info, warn};
use variantgen_core::{
    DiagnosticReport, SynthesisError, declaration_json_schema, member_json_schema,
};
use variantgen_synth::{VariantSynthesizer, validate_inverse_relationship};

use output::{DeclarationReport, render_json, render_text, write_bytes_atomic, write_json_atomic};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("config encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("schema error: {0}")]
    Schema(String),
    #[error("input failed validation with {} error(s)", .0.errors.len())]
    InvalidInput(DiagnosticReport),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("{0} declaration(s) failed to expand")]
    ExpansionFailed(usize),
    #[error("invalid argument: {0}")]
    Invalid(String),
}

pub type CliResult<T> = Result<T, CliError>;

#[derive(Parser, Debug)]
#[command(name = "variantgen", version, about = "Generate preview variants of model classes")]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    /// Append logs to a file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Expand model declarations into protocols and preview variants.
    Expand(ExpandArgs),
    /// Check a field marked as an inverse relationship.
    CheckInverse(CheckInverseArgs),
    /// Print the JSON Schema of the input format.
    Schema(SchemaArgs),
    /// Write a config file with the default options.
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug)]
struct ExpandArgs {
    /// Declaration JSON file (a single declaration or an array).
    #[arg(value_name = "INPUT")]
    input: PathBuf,
    /// Options file; defaults to ./variantgen.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write output to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Skip the observable protocol and observable preview class.
    #[arg(long, default_value_t = false)]
    no_observable: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct CheckInverseArgs {
    /// Member JSON file.
    #[arg(value_name = "MEMBER")]
    input: PathBuf,
    /// Options file; defaults to ./variantgen.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Print the member schema instead of the declaration schema.
    #[arg(long, default_value_t = false)]
    member: bool,
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InitConfigArgs {
    #[arg(default_value = config::DEFAULT_CONFIG_FILE)]
    path: PathBuf,
    /// Overwrite an existing file.
    #[arg(long, default_value_t = false)]
    force: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_json, cli.log_file.as_deref())?;

    match cli.command {
        Command::Expand(args) => run_expand(args),
        Command::CheckInverse(args) => run_check_inverse(args),
        Command::Schema(args) => run_schema(args),
        Command::InitConfig(args) => run_init_config(args),
    }
}

fn run_expand(args: ExpandArgs) -> CliResult<()> {
    let mut options = config::load_options(args.config.as_deref())?;
    if args.no_observable {
        options.emit_observable = false;
    }
    let synthesizer = VariantSynthesizer::new(options);
    let printer = synthesizer.printer();

    let declarations = input::load_declarations(&args.input)?;
    let started = Instant::now();

    let mut reports = Vec::with_capacity(declarations.len());
    let mut failures = 0usize;
    for decl in &declarations {
        match synthesizer.expand(decl) {
            Ok(expansion) => {
                reports.push(DeclarationReport::expanded(&decl.name, &expansion, &printer));
            }
            Err(err) => {
                failures += 1;
                error!(model = %decl.name, code = err.code(), "{err}");
                reports.push(DeclarationReport::failed(&decl.name, &err));
            }
        }
    }

    let rendered = match args.format {
        OutputFormat::Text => render_text(&reports),
        OutputFormat::Json => render_json(&reports)?,
    };

    match &args.out {
        Some(path) => {
            write_bytes_atomic(path, rendered.as_bytes())?;
            info!(path = %path.display(), "output written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    info!(
        declarations = declarations.len(),
        failed = failures,
        duration_ms = started.elapsed().as_millis() as u64,
        "expand finished"
    );

    if failures > 0 {
        return Err(CliError::ExpansionFailed(failures));
    }
    Ok(())
}

fn run_check_inverse(args: CheckInverseArgs) -> CliResult<()> {
    let options = config::load_options(args.config.as_deref())?;
    let member = input::load_member(&args.input)?;
    let expansion = validate_inverse_relationship(&member, &options).inspect_err(|err| {
        error!(code = err.code(), "{err}");
    })?;
    info!(
        path = %args.input.display(),
        declarations = expansion.declarations.len(),
        "inverse relationship is valid"
    );
    Ok(())
}

fn run_schema(args: SchemaArgs) -> CliResult<()> {
    let schema = if args.member {
        member_json_schema()
    } else {
        declaration_json_schema()
    };

    match &args.out {
        Some(path) => {
            write_json_atomic(path, &schema)?;
            info!(path = %path.display(), "schema written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &schema)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn run_init_config(args: InitConfigArgs) -> CliResult<()> {
    if args.path.exists() && !args.force {
        warn!(path = %args.path.display(), "config file already exists");
        return Err(CliError::Invalid(format!(
            "{} already exists; pass --force to overwrite",
            args.path.display()
        )));
    }
    config::save_default_options(&args.path)?;
    info!(path = %args.path.display(), "config written");
    Ok(())
}
