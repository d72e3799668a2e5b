//! Kinds command
//!
//! Usage: errkin kinds --catalog <FILE>

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct KindsArgs {
    /// Kind catalog (YAML)
    #[arg(short, long)]
    pub catalog: PathBuf,
}

/// Execute kinds command
///
/// One line per kind in declaration order: name, ancestry, own fields.
pub fn execute(args: KindsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_registry, kinds) = super::load_registry(&args.catalog)?;

    for kind in &kinds {
        let mut line = kind.name().to_string();
        let mut ancestors = kind.ancestor_names();
        if !ancestors.is_empty() {
            ancestors.reverse();
            line.push_str(&format!(" < {}", ancestors.join(" < ")));
        }
        if !kind.own_fields().is_empty() {
            line.push_str(&format!(" [{}]", kind.own_fields().join(", ")));
        }
        println!("{}", line);
    }

    Ok(())
}
