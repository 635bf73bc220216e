//! Regform CLI
//!
//! Inspect the form configuration and replay scripted interactions against a
//! headless registration form.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use regform_core::{
    email_format_error, Dispatched, FormConfig, FormEvent, Framework, RegistrationForm,
    CONFIG_FILE,
};

mod render;

#[derive(Parser)]
#[command(name = "regform")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Headless registration form", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory containing regform.toml (defaults to the current directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List frameworks and their selectable versions
    Versions {
        /// Only show this framework
        framework: Option<String>,
    },

    /// Check an email against the format rules
    CheckEmail {
        email: String,
    },

    /// Replay a JSON array of form events and print the form after each one
    Run {
        /// Script file
        script: PathBuf,
    },

    /// Write a default regform.toml to the current directory
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Versions { framework } => {
            let config = load_config(cli.config.as_deref())?;
            cmd_versions(&config, framework.as_deref())
        }

        Commands::CheckEmail { email } => cmd_check_email(&email),

        Commands::Run { script } => {
            let config = load_config(cli.config.as_deref())?;
            cmd_run(config, &script)
        }

        Commands::Init { force } => cmd_init(force),
    }
}

fn load_config(dir: Option<&Path>) -> Result<FormConfig> {
    match dir {
        Some(dir) => FormConfig::load_from_dir(dir)
            .with_context(|| format!("Failed to load configuration from {}", dir.display())),
        None if Path::new(CONFIG_FILE).exists() => {
            FormConfig::load_from_dir(Path::new(".")).context("Failed to load ./regform.toml")
        }
        None => Ok(FormConfig::default()),
    }
}

fn cmd_versions(config: &FormConfig, framework: Option<&str>) -> Result<()> {
    let selected = framework.map(str::parse::<Framework>).transpose()?;

    for framework in config.frameworks() {
        if selected.is_some_and(|selected| selected != framework) {
            continue;
        }
        println!("{}: {}", framework, config.versions(framework).join(", "));
    }
    Ok(())
}

fn cmd_check_email(email: &str) -> Result<()> {
    match email_format_error(Some(email)) {
        Some(error) => println!("{email}: {error}"),
        None => println!("{email}: ok"),
    }
    Ok(())
}

fn cmd_run(config: FormConfig, script: &Path) -> Result<()> {
    let content = fs::read_to_string(script)
        .with_context(|| format!("Failed to read {}", script.display()))?;
    let events: Vec<FormEvent> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", script.display()))?;

    info!("Replaying {} events from {}", events.len(), script.display());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start runtime")?;

    let mut form = RegistrationForm::new(config);
    runtime.block_on(async {
        for (step, event) in events.into_iter().enumerate() {
            println!("--- step {}: {:?}", step + 1, event);
            match form.handle(event) {
                Ok(Dispatched::Applied) => {}
                Ok(Dispatched::Submitting(pending)) => {
                    print!("{}", render::TextView(&form.view()));
                    let outcome = pending.await;
                    form.finish_submit(outcome);
                    println!("--- submission resolved: {:?}", outcome);
                }
                Err(err) => warn!("Event refused: {}", err),
            }
            print!("{}", render::TextView(&form.view()));
        }
    });

    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() && !force {
        anyhow::bail!("{} already exists. Use --force to overwrite it.", CONFIG_FILE);
    }

    let content = FormConfig::default().to_toml()?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    info!("Wrote {}", CONFIG_FILE);
    Ok(())
}
