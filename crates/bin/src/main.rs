//! Hobart CLI binary.
//!
//! Extracts insight reports from annual report documents and analyzes
//! reported financial figures.

use clap::{Parser, Subcommand, ValueEnum};
use hobart::{PipelineOptions, analyze_document};
use hobart_extract::{CategoryGroup, ExtractorConfig, Vocabulary};
use hobart_metrics::{AnalysisSummary, FinancialDataset, analyze};
use hobart_output::{DEFAULT_COMPANY, DEFAULT_REPORT_TYPE, ExportFormat, Exporter, InsightReport};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hobart")]
#[command(about = "Hobart: annual report insight extraction", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract an insight report from a PDF or text document
    Extract {
        /// Document to analyze
        input: PathBuf,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Company name recorded in the report
        #[arg(long, default_value = DEFAULT_COMPANY)]
        company: String,

        /// Report type recorded in the report
        #[arg(long, default_value = DEFAULT_REPORT_TYPE)]
        report_type: String,

        /// Category vocabulary JSON file
        #[arg(long)]
        vocabulary: Option<PathBuf>,

        /// Output format; inferred from the output extension, else pretty JSON
        #[arg(long, value_enum)]
        format: Option<Format>,

        /// Run extraction passes on worker threads
        #[arg(long)]
        concurrent: bool,
    },

    /// Analyze reported financial figures
    Analyze {
        /// Financial dataset JSON file (defaults to built-in NVIDIA FY2022-FY2024)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Write the analysis here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format; inferred from the output extension, else text
        #[arg(long, value_enum)]
        format: Option<Format>,
    },

    /// List vocabulary categories and their match phrases
    Vocabulary {
        /// Only list one group
        #[arg(long, value_enum)]
        group: Option<Group>,

        /// Category vocabulary JSON file
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    PrettyJson,
    Csv,
    Markdown,
    Text,
}

impl Format {
    /// Explicit format, else the one implied by the output file, else `fallback`.
    fn resolve(explicit: Option<Self>, output: Option<&Path>, fallback: Self) -> Self {
        explicit
            .or_else(|| output.and_then(ExportFormat::from_path).map(Self::from))
            .unwrap_or(fallback)
    }

    const fn export_format(self) -> Option<ExportFormat> {
        match self {
            Self::Json => Some(ExportFormat::Json),
            Self::PrettyJson => Some(ExportFormat::PrettyJson),
            Self::Csv => Some(ExportFormat::Csv),
            Self::Markdown | Self::Text => None,
        }
    }
}

impl From<ExportFormat> for Format {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Csv => Self::Csv,
            ExportFormat::Json => Self::Json,
            ExportFormat::PrettyJson => Self::PrettyJson,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Group {
    Segments,
    Technology,
    Market,
}

impl From<Group> for CategoryGroup {
    fn from(group: Group) -> Self {
        match group {
            Group::Segments => Self::BusinessSegment,
            Group::Technology => Self::Technology,
            Group::Market => Self::MarketTheme,
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Extract {
            input,
            output,
            company,
            report_type,
            vocabulary,
            format,
            concurrent,
        } => {
            let vocabulary = load_vocabulary(vocabulary.as_deref())?;
            let options = PipelineOptions {
                company,
                report_type,
                config: ExtractorConfig::with_vocabulary(vocabulary),
                concurrent,
            };
            let report = analyze_document(&input, &options)?;
            let format = Format::resolve(format, output.as_deref(), Format::PrettyJson);
            let rendered = render_report(&report, format)?;
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Analyze {
            dataset,
            output,
            format,
        } => {
            let dataset = match dataset {
                Some(path) => FinancialDataset::from_json_file(&path)?,
                None => FinancialDataset::nvidia_fy2024(),
            };
            let summary = analyze(&dataset)?;
            let format = Format::resolve(format, output.as_deref(), Format::Text);
            let rendered = render_analysis(&summary, format)?;
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Vocabulary { group, file } => {
            let vocabulary = load_vocabulary(file.as_deref())?;
            list_vocabulary(&vocabulary, group.map(CategoryGroup::from));
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn load_vocabulary(path: Option<&Path>) -> Result<Vocabulary, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let vocabulary = Vocabulary::from_json_file(path)?;
            info!(path = %path.display(), categories = vocabulary.len(), "loaded vocabulary");
            Ok(vocabulary)
        }
        None => Ok(Vocabulary::default()),
    }
}

fn render_report(
    report: &InsightReport,
    format: Format,
) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format.export_format() {
        Some(export) => report.export_to_string(export)?,
        None if format == Format::Markdown => report.to_markdown(),
        None => report.to_ascii_table(),
    })
}

fn render_analysis(
    summary: &AnalysisSummary,
    format: Format,
) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format.export_format() {
        Some(export) => summary.export_to_string(export)?,
        None if format == Format::Markdown => summary.to_markdown(),
        None => summary.to_string(),
    })
}

fn write_output(path: Option<&Path>, contents: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            fs::write(path, contents)?;
            debug!(path = %path.display(), bytes = contents.len(), "output written");
            eprintln!("Wrote {}", path.display());
        }
        None => {
            print!("{contents}");
            if !contents.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

fn list_vocabulary(vocabulary: &Vocabulary, group: Option<CategoryGroup>) {
    let groups = match group {
        Some(group) => vec![group],
        None => CategoryGroup::all(),
    };

    for group in groups {
        println!("\n{}:", group.name());
        println!("{}", "-".repeat(60));
        for category in vocabulary.categories_in(group) {
            let phrases: Vec<String> = category
                .phrases
                .iter()
                .map(|p| format!("\"{p}\""))
                .collect();
            println!("  {:<28} {}", category.label, phrases.join(", "));
        }
    }
}
