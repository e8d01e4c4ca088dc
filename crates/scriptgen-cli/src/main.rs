//! CLI for generating Gradle build scripts from JSON project descriptors.
//!
//! # Usage
//!
//! ```bash
//! # Print a Kotlin DSL script for a descriptor
//! scriptgen generate project.json
//!
//! # Groovy DSL for an older Gradle, read from stdin
//! cat project.json | scriptgen generate --dialect groovy --gradle-version 6.9
//!
//! # Write build.gradle.kts into a project directory
//! scriptgen generate project.json -o my-project/
//!
//! # Store defaults used when no flag is given
//! scriptgen config set --dialect groovy --gradle-version 7.6
//! scriptgen config show
//! ```

mod error;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use scriptgen_core::buildscript;
use scriptgen_core::config::ScriptgenConfig;
use scriptgen_core::descriptor::ProjectDescriptor;
use scriptgen_core::render::Dialect;
use scriptgen_core::version::GradleVersion;

use crate::error::CliError;

/// Generate Gradle build scripts in Kotlin DSL or Groovy DSL.
#[derive(Parser)]
#[command(name = "scriptgen")]
#[command(about = "Generate Gradle build scripts from project descriptors")]
#[command(version)]
struct Cli {
    /// Write logs to scriptgen.log in this directory instead of stderr
    #[arg(long, env = "SCRIPTGEN_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a build script from a JSON project descriptor
    Generate {
        /// Path to the descriptor (reads stdin if omitted)
        descriptor: Option<PathBuf>,
        /// Script dialect: kotlin or groovy
        #[arg(short, long, env = "SCRIPTGEN_DIALECT")]
        dialect: Option<Dialect>,
        /// Target Gradle version, e.g. 7.6
        #[arg(short, long, env = "SCRIPTGEN_GRADLE_VERSION")]
        gradle_version: Option<GradleVersion>,
        /// Output file or directory (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or change stored defaults
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the stored defaults as JSON
    Show,
    /// Update stored defaults
    Set {
        #[arg(short, long)]
        dialect: Option<Dialect>,
        #[arg(short, long)]
        gradle_version: Option<GradleVersion>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_dir.as_deref());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn init_logging(log_dir: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::never(dir, "scriptgen.log");
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file_appender)
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Generate { descriptor, dialect, gradle_version, output } => {
            generate(descriptor, dialect, gradle_version, output)
        }
        Command::Config { action } => configure(action),
    }
}

fn generate(
    descriptor_path: Option<PathBuf>,
    dialect: Option<Dialect>,
    gradle_version: Option<GradleVersion>,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let descriptor = match descriptor_path {
        Some(ref path) => ProjectDescriptor::from_file(path)?,
        None => ProjectDescriptor::from_stdin()?,
    };

    // Flags win over the descriptor, which wins over stored defaults.
    let config = ScriptgenConfig::load().resolve(
        dialect.or(descriptor.dialect),
        gradle_version.or_else(|| descriptor.gradle_version.clone()),
    );
    info!(dialect = %config.dialect(), gradle_version = %config.gradle_version(), "generating build script");

    let mut builder = buildscript::create(&config);
    descriptor.apply_to(builder.as_mut())?;
    let script = builder.generate()?;

    match output {
        None => print!("{}", script),
        Some(path) => {
            let path = if path.is_dir() {
                path.join(config.dialect().build_file_name())
            } else {
                path
            };
            std::fs::write(&path, &script)?;
            debug!(path = %path.display(), bytes = script.len(), "script written");
            eprintln!("Saved to {}", path.display());
        }
    }
    Ok(())
}

fn configure(action: ConfigAction) -> Result<(), CliError> {
    let mut config = ScriptgenConfig::load();
    match action {
        ConfigAction::Show => {
            let json = serde_json::to_string_pretty(&config)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            println!("{}", json);
        }
        ConfigAction::Set { dialect, gradle_version } => {
            if let Some(dialect) = dialect {
                config.dialect = Some(dialect);
            }
            if let Some(version) = gradle_version {
                config.gradle_version = Some(version);
            }
            config.save()?;
            info!("stored defaults updated");
        }
    }
    Ok(())
}
