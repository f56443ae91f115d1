//! Command-line interface for the report tool.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use stamboom_gedcom::{read_str, Diagnostics, GedcomFile};

use crate::error::Result;
use crate::report::render_text;

/// Stamboom report - Render family tree reports from GEDCOM exports.
#[derive(Parser)]
#[command(name = "stamboom-report")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read a GEDCOM export and render a report.
    Report {
        /// Path to the GEDCOM file
        file: PathBuf,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Read a GEDCOM export and report diagnostics only.
    ///
    /// Exits nonzero when the file produced diagnostics or left lines
    /// unused, so it doubles as a lint in scripts.
    Check {
        /// Path to the GEDCOM file
        file: PathBuf,
    },
}

/// Report output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable text report
    Text,
    /// JSON dump of the semantic model
    Json,
}

/// Run the CLI.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            file,
            output,
            format,
        } => report_command(&file, output.as_deref(), format),
        Commands::Check { file } => check_command(&file),
    }
}

/// Parse one export file, counting the lines as read.
fn load_file(path: &Path) -> Result<(GedcomFile, Diagnostics, usize)> {
    let text = fs::read_to_string(path)?;
    let lines_read = text.lines().count();
    let mut diag = Diagnostics::new();
    let file = read_str(&text, &mut diag);
    tracing::debug!(
        path = %path.display(),
        lines = lines_read,
        diagnostics = diag.len(),
        "parsed export"
    );
    Ok((file, diag, lines_read))
}

/// Execute the report command.
fn report_command(path: &Path, output: Option<&Path>, format: Format) -> Result<ExitCode> {
    println!(
        "{} {}",
        style("Reading").bold(),
        style(path.display()).cyan()
    );
    println!();

    let (file, diag, lines_read) = load_file(path)?;

    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
    let rendered = match format {
        Format::Text => render_text(&file, &generated_at),
        Format::Json => serde_json::to_string_pretty(&file)?,
    };

    match output {
        Some(target) => {
            fs::write(target, rendered.as_bytes())?;
            println!(
                "{} {}",
                style("Saved to:").green().bold(),
                target.display()
            );
        }
        None => println!("{rendered}"),
    }

    print_diagnostics(&diag);
    print_summary(&file, &diag, lines_read);

    Ok(ExitCode::SUCCESS)
}

/// Execute the check command.
fn check_command(path: &Path) -> Result<ExitCode> {
    println!(
        "{} {}",
        style("Checking").bold(),
        style(path.display()).cyan()
    );

    let (file, diag, lines_read) = load_file(path)?;

    print_diagnostics(&diag);
    print_summary(&file, &diag, lines_read);

    if diag.is_empty() && file.unused_lines == 0 {
        println!();
        println!("{}", style("OK").green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Print collected diagnostics, if any.
fn print_diagnostics(diag: &Diagnostics) {
    if diag.is_empty() {
        return;
    }
    println!();
    println!("{}", style("Diagnostics").yellow().bold());
    for entry in diag.entries() {
        println!("  {}", style(entry).yellow());
    }
}

/// Print the run summary.
fn print_summary(file: &GedcomFile, diag: &Diagnostics, lines_read: usize) {
    println!();
    println!("  Lines read: {lines_read}");
    println!("  Persons: {}", file.person_count());
    println!("  Families: {}", file.family_count());
    println!("  Notes: {}", file.note_count());
    if !diag.is_empty() {
        println!("  Diagnostics: {}", style(diag.len()).yellow().bold());
    }
    if file.unused_lines > 0 {
        println!(
            "  Unused lines: {}",
            style(file.unused_lines).yellow().bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_report() {
        let cli = Cli::parse_from(["stamboom-report", "report", "family.ged"]);

        let Commands::Report {
            file,
            output,
            format,
        } = cli.command
        else {
            panic!("expected report command");
        };
        assert_eq!(file, PathBuf::from("family.ged"));
        assert!(output.is_none());
        assert_eq!(format, Format::Text);
    }

    #[test]
    fn test_cli_parse_report_with_json_format() {
        let cli = Cli::parse_from([
            "stamboom-report",
            "report",
            "family.ged",
            "--format",
            "json",
            "--output",
            "model.json",
        ]);

        let Commands::Report { format, output, .. } = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(format, Format::Json);
        assert_eq!(output, Some(PathBuf::from("model.json")));
    }

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::parse_from(["stamboom-report", "check", "family.ged"]);

        let Commands::Check { file } = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(file, PathBuf::from("family.ged"));
    }
}
