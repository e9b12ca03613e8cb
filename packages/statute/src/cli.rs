//! Command-line interface for the statute parser.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;

use crate::config::validate_input_path;
use crate::error::{Result, StatuteError};
use crate::output::{export, save_export, ExportFormat};
use crate::parser::parse_statute_file;
use crate::registry::create_structure_registry;
use crate::survey::TagSurvey;
use crate::xml::parse_xml;

/// LegalCodex statute parser - Structural extraction of legislative XML.
#[derive(Parser)]
#[command(name = "legalcodex-statute")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a statute and dump its block tree.
    Dump {
        /// Statute XML file
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the child tags observed under every tag of an XML file.
    Tags {
        /// XML file to survey
        file: PathBuf,
    },
}

/// Export format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Yaml,
    Json,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => Self::Text,
            Format::Yaml => Self::Yaml,
            Format::Json => Self::Json,
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    execute(Cli::parse())
}

/// Execute parsed arguments.
pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Dump {
            file,
            format,
            output,
        } => dump_command(&file, format.into(), output.as_deref()),
        Commands::Tags { file } => tags_command(&file),
    }
}

/// Print an error, with the rejecting element's XML when there is one.
pub fn report_error(error: &StatuteError) {
    eprintln!("Error: {error}");
    if let Some(parent_xml) = error.parent_content() {
        eprintln!();
        eprintln!("{}", style("Parent element:").yellow().bold());
        eprintln!("{parent_xml}");
    }
}

/// Execute the dump command.
fn dump_command(file: &Path, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let tree = parse_statute_file(file)?;
    let blocks = tree.count();

    match output {
        Some(path) => {
            save_export(&tree, format, path)?;

            println!(
                "{} {}",
                style("Parsed").bold(),
                style(file.display()).cyan()
            );
            println!("  Blocks: {blocks}");
            println!();
            println!("{} {}", style("Saved to:").green().bold(), path.display());
        }
        None => {
            let content = export(&tree, format)?;
            io::stdout().lock().write_all(content.as_bytes())?;

            // Keep stdout clean for piping
            eprintln!(
                "{} {} ({blocks} blocks)",
                style("Parsed").bold(),
                style(file.display()).cyan()
            );
        }
    }

    Ok(())
}

/// Execute the tags command.
fn tags_command(file: &Path) -> Result<()> {
    validate_input_path(file)?;
    let xml = fs::read_to_string(file)?;
    let doc = parse_xml(&xml)?;

    let survey = TagSurvey::from_document(&doc);
    let report = survey.report(&create_structure_registry());

    let mut stdout = io::stdout().lock();
    for line in report {
        writeln!(stdout, "{line}")?;
    }

    Ok(())
}
