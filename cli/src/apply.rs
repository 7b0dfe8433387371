#![deny(missing_docs)]

//! # Apply Command
//!
//! Loads entity records, runs the post-generation pipeline on a project and
//! prints what happened.
//!
//! Entity records come from either:
//! - a JSON or YAML file holding a list of records, or
//! - a directory of generator entity files (`.jhipster/<Class>.json`).

use crate::error::{CliError, CliResult};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use viewcraft_core::{EntityRecord, Level, Pipeline, ProjectFs, ProjectLayout, RunReport};
use walkdir::WalkDir;

/// Arguments for the apply command.
#[derive(clap::Args, Debug, Clone)]
pub struct ApplyArgs {
    /// Project root; every generated path is relative to it.
    #[clap(long, default_value = ".")]
    pub root: PathBuf,

    /// Entity records: a JSON/YAML list, or a directory of `<Class>.json` entity files.
    #[clap(long, default_value = ".jhipster")]
    pub entities: PathBuf,

    /// Base Java package. Read from `.yo-rc.json` when omitted.
    #[clap(long, env = "VIEWCRAFT_PACKAGE_NAME")]
    pub package_name: Option<String>,
}

/// Executes the apply command.
///
/// Fails when the records cannot be loaded or when the run produced error diagnostics.
pub fn execute(args: &ApplyArgs) -> CliResult<RunReport> {
    let entities_path = if args.entities.is_absolute() {
        args.entities.clone()
    } else {
        args.root.join(&args.entities)
    };
    let entities = load_entities(&entities_path)?;
    let package_name = match &args.package_name {
        Some(name) => name.clone(),
        None => detect_package_name(&args.root),
    };
    tracing::info!(
        "Applying to {} entities in {:?} (package {})",
        entities.len(),
        args.root,
        package_name
    );

    let store = ProjectFs::new(&args.root);
    let report = Pipeline::new(&store, ProjectLayout::with_package(package_name)).run(&entities);

    for diagnostic in report
        .diagnostics
        .iter()
        .filter(|d| d.level >= Level::Warn)
    {
        println!("{}", diagnostic);
    }
    println!(
        "Done: {} info, {} warnings, {} errors",
        report.count(Level::Info),
        report.count(Level::Warn),
        report.count(Level::Error)
    );

    if report.has_errors() {
        return Err(CliError::General(format!(
            "{} step(s) failed",
            report.count(Level::Error)
        )));
    }
    Ok(report)
}

/// Loads entity records from a records file or an entity directory.
pub fn load_entities(path: &Path) -> CliResult<Vec<EntityRecord>> {
    if !path.exists() {
        return Err(CliError::General(format!(
            "Entities not found: {:?}",
            path
        )));
    }

    if path.is_dir() {
        return load_entity_dir(path);
    }

    let content = fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml");
    let records = if is_yaml {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(records)
}

fn load_entity_dir(dir: &Path) -> CliResult<Vec<EntityRecord>> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut records = Vec::with_capacity(files.len());
    for file in files {
        let Some(class) = file.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let content = fs::read_to_string(&file)?;
        match EntityRecord::from_entity_json(class, &content) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!("Failed to parse entity file {:?}: {}. Skipping.", file, e),
        }
    }
    Ok(records)
}

/// Base package from `<root>/.yo-rc.json`, or the generator default.
fn detect_package_name(root: &Path) -> String {
    let default = ProjectLayout::default().package_name;
    let Ok(content) = fs::read_to_string(root.join(".yo-rc.json")) else {
        return default;
    };
    serde_json::from_str::<Value>(&content)
        .ok()
        .and_then(|v| {
            v.get("generator-jhipster")?
                .get("packageName")?
                .as_str()
                .map(String::from)
        })
        .unwrap_or(default)
}
