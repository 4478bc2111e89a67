use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use envdoc_core::{NamingConfig, Schema, SchemaDocument, validate_schema, walk};
use envdoc_render::{OutputFormat, write_rows};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "envdoc")]
#[command(about = "Environment variable reference tables from configuration schemas")]
struct Cli {
    /// Log walker decisions to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate the reference table for a schema document.
    Generate(GenerateArgs),
    /// Validate one or more schema documents.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Schema document (JSON, or YAML with a .yaml/.yml extension).
    input: PathBuf,
    /// Output format; defaults to the `--output` extension, else markdown.
    #[arg(long)]
    format: Option<OutputFormat>,
    /// Write to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
    #[command(flatten)]
    naming: NamingArgs,
}

/// Flags overriding the document's naming section.
#[derive(Debug, Args)]
struct NamingArgs {
    /// Prefix prepended to top-level variable names.
    #[arg(long)]
    prefix: Option<String>,
    /// Delimiter joining nested field names.
    #[arg(long)]
    delimiter: Option<String>,
    /// Keep declared case instead of upper-casing names.
    #[arg(long)]
    case_sensitive: bool,
    /// Emit one row per alias instead of a single "Any of" row.
    #[arg(long)]
    no_merge: bool,
}

impl NamingArgs {
    fn apply(&self, mut config: NamingConfig) -> NamingConfig {
        if let Some(prefix) = &self.prefix {
            config.env_prefix = prefix.clone();
        }
        if let Some(delimiter) = &self.delimiter {
            config.nested_delimiter = Some(delimiter.clone());
        }
        if self.case_sensitive {
            config.case_sensitive = true;
        }
        if self.no_merge {
            config.merge_aliases = false;
        }
        config
    }
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Schema documents to check.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let (schema, config) = load_schema(&args.input)?;
    let config = args.naming.apply(config);
    debug!(?config, "Naming configuration");
    let format = args
        .format
        .or_else(|| args.output.as_deref().and_then(format_for_path))
        .unwrap_or_default();

    // The walk finishes before any output is opened, so a failure leaves no partial table.
    let rows = walk(&schema, &config)
        .map_err(|err| format!("Failed to document '{}': {err}", args.input.display()))?;

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(|err| {
                        format!(
                            "Failed to create output directory '{}': {err}",
                            parent.display()
                        )
                    })?;
                }
            }
            let file = fs::File::create(path)
                .map_err(|err| format!("Failed to create '{}': {err}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_rows(&rows, format, &mut writer)
                .and_then(|()| writer.flush().map_err(Into::into))
                .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
            info!(rows = rows.len(), path = %path.display(), "Wrote reference table");
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_rows(&rows, format, &mut handle)
                .map_err(|err| format!("Failed to write output: {err}"))?;
        }
    }

    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut fields = 0usize;
    for input in &args.inputs {
        let (schema, _) = load_schema(input)?;
        if let Some(err) = validate_schema(&schema).into_iter().next() {
            return Err(format!("Invalid schema '{}': {err}", input.display()));
        }
        fields += count_fields(&schema);
    }
    println!(
        "Validated {} schema document(s) with {fields} field(s).",
        args.inputs.len()
    );
    Ok(())
}

fn count_fields(schema: &Schema) -> usize {
    schema
        .fields
        .iter()
        .map(|field| match &field.kind {
            envdoc_core::FieldKind::Nested(child) => count_fields(child),
            envdoc_core::FieldKind::Scalar(_) => 1,
        })
        .sum()
}

fn load_schema(path: &Path) -> Result<(Schema, NamingConfig), String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
    let document: SchemaDocument = if is_yaml(path) {
        serde_yaml::from_str(&raw).map_err(|err| err.to_string())
    } else {
        serde_json::from_str(&raw).map_err(|err| err.to_string())
    }
    .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))?;

    document
        .resolve()
        .map_err(|err| format!("Invalid schema '{}': {err}", path.display()))
}

fn format_for_path(path: &Path) -> Option<OutputFormat> {
    let ext = path.extension()?.to_str()?;
    if ext == "yml" {
        return Some(OutputFormat::Yaml);
    }
    [OutputFormat::Markdown, OutputFormat::Json, OutputFormat::Yaml]
        .into_iter()
        .find(|format| format.extension() == ext)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    )
}
