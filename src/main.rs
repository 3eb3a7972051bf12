use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use codelens::cli::{self, DisplayArgs, InterpretArgs};

#[derive(Debug, Parser)]
#[command(name = "codelens")]
#[command(about = "Interpret code-analysis results into complexity, scores and suggestions")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interpret a full analysis response (JSON) and render the dashboard
    Interpret {
        /// Response body file; omit or use `-` for stdin
        file: Option<PathBuf>,
        /// Source file that was submitted for analysis
        #[arg(long)]
        code: Option<PathBuf>,
        /// Declared language of the submitted code; guessed from the file when omitted
        #[arg(long)]
        language: Option<String>,
        /// Comma-separated analysis options, e.g. complexity,refactoring
        #[arg(long)]
        options: Option<String>,
        /// HTTP status the response arrived with; non-2xx is reported as an error
        #[arg(long)]
        status: Option<u16>,
        /// Output format: table or json
        #[arg(long)]
        format: Option<String>,
        /// Theme: standard or hacker
        #[arg(long)]
        theme: Option<String>,
    },
    /// Parse a raw complexity analysis block
    Complexity {
        /// Text file; omit or use `-` for stdin
        file: Option<PathBuf>,
        /// Output format: table or json
        #[arg(long)]
        format: Option<String>,
        /// Theme: standard or hacker
        #[arg(long)]
        theme: Option<String>,
    },
    /// Split a raw refactoring block into prioritized suggestions
    Suggestions {
        /// Text file; omit or use `-` for stdin
        file: Option<PathBuf>,
        /// Output format: table or json
        #[arg(long)]
        format: Option<String>,
        /// Theme: standard or hacker
        #[arg(long)]
        theme: Option<String>,
    },
    /// Estimate the number of function declarations in a source file
    Functions {
        /// Source file; `-` reads stdin
        file: PathBuf,
        /// Output format: table or json
        #[arg(long)]
        format: Option<String>,
    },
    /// Show statistics from the local analysis log
    Stats {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Only include the last N days of data
        #[arg(long)]
        days: Option<u32>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Write the default config to ~/.codelens/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `display.theme hacker`
    Set { key: String, value: String },
    /// Reset the global config to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    let ok = match app.command {
        Commands::Interpret {
            file,
            code,
            language,
            options,
            status,
            format,
            theme,
        } => cli::run_interpret(InterpretArgs {
            response: file.as_deref(),
            code: code.as_deref(),
            language: language.as_deref(),
            options: options.as_deref(),
            status,
            display: DisplayArgs {
                format: format.as_deref(),
                theme: theme.as_deref(),
            },
        })?,
        Commands::Complexity {
            file,
            format,
            theme,
        } => cli::run_complexity(
            file.as_deref(),
            DisplayArgs {
                format: format.as_deref(),
                theme: theme.as_deref(),
            },
        )?,
        Commands::Suggestions {
            file,
            format,
            theme,
        } => {
            cli::run_suggestions(
                file.as_deref(),
                DisplayArgs {
                    format: format.as_deref(),
                    theme: theme.as_deref(),
                },
            )?;
            true
        }
        Commands::Functions { file, format } => {
            cli::run_functions(&file, format.as_deref())?;
            true
        }
        Commands::Stats { format, days } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_stats(fmt, days)?;
            true
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => cli::run_config_show()?,
                ConfigAction::Init { force } => cli::run_config_init(force)?,
                ConfigAction::Set { key, value } => cli::run_config_set(&key, &value)?,
                ConfigAction::Reset => cli::run_config_reset()?,
            }
            true
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
