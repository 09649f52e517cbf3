//! coursecheck CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "coursecheck",
    version,
    about = "Course accessibility self-assessment and recommendations"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score an answer sheet and list recommendations
    Assess {
        /// Answer sheet (.toml with [[answers]] or .json list)
        #[arg(long)]
        answers: PathBuf,

        /// TOML catalog replacing the built-in questionnaire
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output format: text, json, csv, html, all
        #[arg(long, default_value = "text")]
        format: String,

        /// Output directory (defaults to the configured output_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Refuse to score answers that fail validation
        #[arg(long)]
        strict: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List catalog questions
    Questions {
        /// TOML catalog replacing the built-in questionnaire
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only show one category
        #[arg(long)]
        category: Option<String>,
    },

    /// Validate a catalog and, optionally, an answer sheet
    Validate {
        /// TOML catalog (built-in when omitted)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Answer sheet to check against the catalog
        #[arg(long)]
        answers: Option<PathBuf>,
    },

    /// Compare two saved assessments
    Compare {
        /// Baseline assessment JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current assessment JSON
        #[arg(long)]
        current: PathBuf,

        /// Score change (in points) tolerated before reporting a change
        #[arg(long, default_value = "0")]
        threshold: i64,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Convert saved page-audit results to csv, json or sarif
    ExportAudit {
        /// Audit results JSON
        #[arg(long)]
        input: PathBuf,

        /// Output format: csv, json, sarif
        #[arg(long)]
        format: String,

        /// Output file
        #[arg(long)]
        output: PathBuf,
    },

    /// Create starter config and example answer sheet
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("coursecheck=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Assess {
            answers,
            catalog,
            format,
            output,
            strict,
            config,
        } => commands::assess::execute(answers, catalog, format, output, strict, config),
        Commands::Questions { catalog, category } => {
            commands::questions::execute(catalog, category)
        }
        Commands::Validate { catalog, answers } => commands::validate::execute(catalog, answers),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_regression, format),
        Commands::ExportAudit {
            input,
            format,
            output,
        } => commands::export_audit::execute(input, format, output),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
