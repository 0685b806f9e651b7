//! CLI entry point for dbpojo-codegen

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dbpojo_codegen::codegen::{key_type_name, Answer, Drift, OverwritePolicy, TypeMapper};
use dbpojo_codegen::config::{CodegenConfig, OverwriteMode};

#[derive(Parser)]
#[command(name = "dbpojo-codegen")]
#[command(about = "Generate Java key/value POJO classes from database schema metadata")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to SQL DDL schema file (overrides config)
    #[arg(short, long, conflicts_with = "database")]
    schema: Option<PathBuf>,

    /// Path to SQLite database file (overrides config)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Java package of generated classes (overrides config)
    #[arg(short, long)]
    package: Option<String>,

    /// Overwrite existing files without asking
    #[arg(short, long)]
    yes: bool,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate key and value classes
    Generate,
    /// Inspect schema (show parsed tables for debugging)
    Inspect {
        /// Print descriptors as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report generated files that differ from a fresh rendering
    Check,
}

/// Asks on the terminal for every existing file
struct TerminalPrompt;

impl OverwritePolicy for TerminalPrompt {
    fn confirm(&mut self, prompt: &str) -> Answer {
        let stdin = std::io::stdin();
        loop {
            print!("{} [y]es/[n]o/[a]ll/n[o]ne/[c]ancel: ", prompt);
            let _ = std::io::stdout().flush();

            let mut line = String::new();
            if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
                return Answer::Cancel;
            }
            match line.trim().to_lowercase().as_str() {
                "y" | "yes" => return Answer::Yes,
                "n" | "no" => return Answer::No,
                "a" | "all" => return Answer::YesToAll,
                "o" | "none" => return Answer::NoToAll,
                "c" | "cancel" => return Answer::Cancel,
                _ => continue,
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = if let Some(config_path) = &cli.config {
        CodegenConfig::from_file(config_path)?
    } else {
        CodegenConfig::load(None)?
    };

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    // Apply CLI overrides
    if let Some(schema) = cli.schema {
        config.schema_file = Some(schema);
        config.database = None;
    }
    if let Some(database) = cli.database {
        config.database = Some(database);
        config.schema_file = None;
    }
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    if let Some(package) = cli.package {
        config.package_name = package;
    }
    if cli.yes {
        config.overwrite = OverwriteMode::Always;
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    config.validate()?;

    match cli.command.unwrap_or(Commands::Generate) {
        Commands::Inspect { json } => inspect_schema(&config, json),
        Commands::Check => check_generated(&config),
        Commands::Generate => {
            let report = match dbpojo_codegen::generate(&config, &mut TerminalPrompt) {
                Ok(report) => report,
                Err(e) if e.is_abort() => {
                    info!("{}", e);
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

            if let Some(path) = &report.aborted_at {
                warn!("Generation cancelled at {}", path.display());
            } else {
                info!("Code generation completed successfully");
            }
            for path in report.written() {
                println!("  wrote   {}", path.display());
            }
            for path in report.skipped() {
                println!("  skipped {}", path.display());
            }
            Ok(())
        }
    }
}

fn inspect_schema(config: &CodegenConfig, json: bool) -> Result<()> {
    let descriptors = dbpojo_codegen::load_descriptors(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&descriptors)?);
        return Ok(());
    }

    println!("Parsed {} tables:\n", descriptors.len());
    for desc in &descriptors {
        println!("Table: {}", desc.table());
        println!("  Columns:");
        for col in desc.columns() {
            let nullable = if col.nullable { "NULL" } else { "NOT NULL" };
            let java_type = match TypeMapper::resolve(desc.table(), col) {
                Ok(java_type) => java_type.type_name().to_string(),
                Err(_) => format!("<unsupported code {}>", col.sql_type.code()),
            };
            println!(
                "    - {} {:?} {} -> {}",
                col.name, col.sql_type, nullable, java_type
            );
        }
        let key_names: Vec<&str> = desc.key_columns().iter().map(|c| c.name.as_str()).collect();
        if !key_names.is_empty() {
            println!("  Primary Key: {:?}", key_names);
        }
        if let Some(key_type) = key_type_name(desc)? {
            println!("  Key type: {}", key_type);
        }
        if !desc.value_class_name().is_empty() {
            println!("  Value class: {}", desc.value_class_name());
        }
        println!();
    }

    Ok(())
}

fn check_generated(config: &CodegenConfig) -> Result<()> {
    let drifts = dbpojo_codegen::check(config)?;

    if drifts.is_empty() {
        println!("Generated sources are up to date");
        return Ok(());
    }

    for drift in &drifts {
        match drift {
            Drift::Missing(path) => println!("  missing {}", path.display()),
            Drift::Changed(path, diff) => println!(
                "  changed {} (line {}: expected {:?}, found {:?})",
                path.display(),
                diff.line,
                diff.expected.as_deref().unwrap_or("<eof>"),
                diff.actual.as_deref().unwrap_or("<eof>")
            ),
        }
    }
    anyhow::bail!("{} generated files are out of date", drifts.len())
}
