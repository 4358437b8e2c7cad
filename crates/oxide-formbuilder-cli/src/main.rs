//! oxide-formbuilder CLI
//!
//! Loads a JSON form definition, optionally validates submitted data
//! against it, and prints the rendered markup.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_formbuilder::{parse_form_data, Form, FormConfig};

/// Render declarative HTML forms.
#[derive(Parser, Debug)]
#[command(name = "oxide-formbuilder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Form definition (JSON).
    #[arg(short, long, env = "FORMBUILDER_FORM")]
    form: PathBuf,

    /// Submitted data (JSON object of field name to value).
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Render without running validation.
    #[arg(long)]
    no_validate: bool,

    /// Print a debug dump of the form state instead of the markup.
    #[arg(long)]
    dump: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let output = run(&cli)?;
    println!("{output}");
    Ok(())
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let mut form = load_form(&cli.form)?;

    if let Some(path) = &cli.data {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading data file {}", path.display()))?;
        form.set_data(parse_form_data(&raw)?);
    }

    if !cli.no_validate {
        if form.validate() {
            info!("Form is valid");
        } else {
            for (field, code) in form.errors().all_errors() {
                warn!(field, code, "Validation failed");
            }
        }
    }

    if cli.dump {
        Ok(form.dump()?)
    } else {
        Ok(form.render())
    }
}

fn load_form(path: &Path) -> anyhow::Result<Form> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading form definition {}", path.display()))?;
    let config = FormConfig::from_json_str(&raw)?;
    Ok(config.build()?)
}
