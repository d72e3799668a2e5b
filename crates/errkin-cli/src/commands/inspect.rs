//! Inspect command
//!
//! Usage: errkin inspect --catalog <FILE> --kind <NAME> [--message <TEXT>]
//!        [--cause <JSON>] [--inherits <NAME>] [--stack] [--format <FORMAT>]

use clap::{Args, ValueEnum};
use errkin_core::{Cause, ErrkinError, ErrorOptions, KindRef, Registry};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Multi-line text rendering
    Text,
    /// Structured JSON snapshot
    Snapshot,
    /// JSON array of caused-by records, instance first
    Hierarchy,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Kind catalog (YAML)
    #[arg(short, long)]
    pub catalog: PathBuf,

    /// Kind to construct
    #[arg(short, long)]
    pub kind: String,

    /// Instance message
    #[arg(short, long, default_value = "")]
    pub message: String,

    /// Cause as JSON: an object is a context payload, anything else a message
    #[arg(long)]
    pub cause: Option<String>,

    /// Effective parent kind, overriding the declared one
    #[arg(long)]
    pub inherits: Option<String>,

    /// Capture a stack trace
    #[arg(long)]
    pub stack: bool,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute inspect command
pub fn execute(args: InspectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (registry, _kinds) = super::load_registry(&args.catalog)?;
    let kind = lookup(&registry, &args.kind, "--kind")?;

    let mut options = ErrorOptions::new(args.message);
    if let Some(raw) = &args.cause {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(ErrkinError::from)?;
        options = options.with_cause(Cause::from_value(value));
    }
    if let Some(name) = &args.inherits {
        options = options.inherits(&lookup(&registry, name, "--inherits")?);
    }
    if args.stack {
        options = options.with_stack();
    }

    let err = kind.new_error(options)?;

    match args.format {
        OutputFormat::Text => println!("{}", err),
        OutputFormat::Snapshot => {
            println!("{}", serde_json::to_string_pretty(&err.to_json()?)?);
        }
        OutputFormat::Hierarchy => {
            let hierarchy = kind.get_error_hierarchy(&*err);
            println!("{}", serde_json::to_string_pretty(&hierarchy)?);
        }
    }

    Ok(())
}

fn lookup(registry: &Registry, name: &str, flag: &str) -> Result<KindRef, ErrkinError> {
    registry.kind(name).ok_or_else(|| ErrkinError::UnknownKind {
        name: name.to_string(),
        referenced_by: flag.to_string(),
    })
}
