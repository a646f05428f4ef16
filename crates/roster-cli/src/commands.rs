use std::path::Path;

use anyhow::{Context, Result};
use roster_cli::pipeline::{ImportInput, ImportOutcome, run_import};
use roster_ingest::write_template;
use roster_map::SchemaRegistry;

use crate::cli::{ImportArgs, TemplateArgs};
use crate::summary::print_fields;

pub fn run_fields() -> Result<()> {
    print_fields(&SchemaRegistry::student_roster());
    Ok(())
}

pub fn run_template(args: &TemplateArgs) -> Result<()> {
    let registry = SchemaRegistry::student_roster();
    write_template(&args.path, registry.list_fields())
        .with_context(|| format!("write template {}", args.path.display()))?;
    println!("Template written to {}", args.path.display());
    Ok(())
}

pub fn run_import_command(args: &ImportArgs, config: Option<&Path>) -> Result<ImportOutcome> {
    run_import(ImportInput {
        file: &args.file,
        map: &args.map,
        classes: &args.classes,
        output: args.output.as_deref(),
        dry_run: args.dry_run,
        config,
    })
}
