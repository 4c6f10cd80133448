//! courtdocs CLI - court document rendering tool

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use courtdocs::{CourtDocs, CourtDocsResult, ExportFormat, JsonFormat, PageGeometry};

#[derive(Parser)]
#[command(name = "courtdocs")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Render court document drafts to HTML, DOCX and PDF", long_about = None)]
struct Cli {
    /// Draft JSON file
    #[arg(value_name = "DRAFT")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Date used in generated filenames (YYYY-MM-DD, default today)
    #[arg(long, value_name = "DATE")]
    date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a draft to every format (HTML, DOCX, PDF)
    Convert {
        /// Draft JSON file
        #[arg(value_name = "DRAFT")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Date used in generated filenames (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,

        /// PDF paper size
        #[arg(long, value_enum, default_value = "a4")]
        paper: Paper,
    },

    /// Render the HTML preview
    Preview {
        /// Draft JSON file
        #[arg(value_name = "DRAFT")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit a complete HTML page
        #[arg(short, long)]
        standalone: bool,
    },

    /// Export a Word document
    Docx {
        /// Draft JSON file
        #[arg(value_name = "DRAFT")]
        input: PathBuf,

        /// Output file (generated name if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Document font
        #[arg(long)]
        font: Option<String>,

        /// Author recorded in the document properties
        #[arg(long, env = "COURTDOCS_AUTHOR")]
        author: Option<String>,
    },

    /// Export a PDF
    Pdf {
        /// Draft JSON file
        #[arg(value_name = "DRAFT")]
        input: PathBuf,

        /// Output file (generated name if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Paper size
        #[arg(long, value_enum, default_value = "a4")]
        paper: Paper,
    },

    /// Print the instruction sequence as JSON
    Inspect {
        /// Draft JSON file
        #[arg(value_name = "DRAFT")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the generated download filename
    Filename {
        /// Draft JSON file
        #[arg(value_name = "DRAFT")]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "docx")]
        format: FormatArg,

        /// Date used in the filename (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Paper {
    /// ISO A4 (210 x 297 mm)
    A4,
    /// US Letter (8.5 x 11 in)
    Letter,
}

impl From<Paper> for PageGeometry {
    fn from(paper: Paper) -> Self {
        match paper {
            Paper::A4 => PageGeometry::a4(),
            Paper::Letter => PageGeometry::letter(),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Standalone HTML page
    Html,
    /// Word document
    Docx,
    /// PDF document
    Pdf,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Html => ExportFormat::Html,
            FormatArg::Docx => ExportFormat::Docx,
            FormatArg::Pdf => ExportFormat::Pdf,
        }
    }
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            date,
            paper,
        }) => cmd_convert(&input, output.as_deref(), date, paper),
        Some(Commands::Preview {
            input,
            output,
            standalone,
        }) => cmd_preview(&input, output.as_deref(), standalone),
        Some(Commands::Docx {
            input,
            output,
            font,
            author,
        }) => cmd_docx(&input, output.as_deref(), font, author),
        Some(Commands::Pdf {
            input,
            output,
            paper,
        }) => cmd_pdf(&input, output.as_deref(), paper),
        Some(Commands::Inspect {
            input,
            output,
            compact,
        }) => cmd_inspect(&input, output.as_deref(), compact),
        Some(Commands::Filename {
            input,
            format,
            date,
        }) => cmd_filename(&input, format, date),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if a draft is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), cli.date, Paper::A4)
            } else {
                println!("{}", "Usage: courtdocs <DRAFT> [OUTPUT]".yellow());
                println!("       courtdocs --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Load and validate a draft with the given builder.
fn open(builder: CourtDocs, input: &Path) -> CliResult<CourtDocsResult> {
    let draft = courtdocs::load_draft(input)?;
    log::debug!("loaded {} draft from {}", draft.content.kind(), input.display());
    Ok(builder.draft(draft)?)
}

/// Write `content` to `path`, or print it when no path is given.
fn emit(output: Option<&Path>, content: &str) -> CliResult<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

/// Export every format into `dir`, returning the written filenames.
fn write_all(doc: &CourtDocsResult, dir: &Path, pb: &ProgressBar) -> CliResult<Vec<String>> {
    let mut written = Vec::new();
    for format in ExportFormat::ALL {
        pb.set_message(format!("Generating {}...", format.extension().to_uppercase()));
        let exported = doc.export(format)?;
        fs::write(dir.join(&exported.filename), &exported.content)?;
        written.push(exported.filename);
        pb.inc(1);
    }
    Ok(written)
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    date: Option<NaiveDate>,
    paper: Paper,
) -> CliResult<()> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(ExportFormat::ALL.len() as u64 + 1);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading draft...");
    let mut builder = CourtDocs::new().with_page_geometry(paper.into());
    if let Some(date) = date {
        builder = builder.with_export_date(date);
    }
    let doc = open(builder, input)?;
    pb.inc(1);

    let written = write_all(&doc, &output_dir, &pb)?;
    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, name) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), name);
    }

    Ok(())
}

fn cmd_preview(input: &Path, output: Option<&Path>, standalone: bool) -> CliResult<()> {
    let mut builder = CourtDocs::new();
    if standalone {
        builder = builder.standalone_html();
    }
    let doc = open(builder, input)?;
    emit(output, &doc.to_html())
}

fn cmd_docx(
    input: &Path,
    output: Option<&Path>,
    font: Option<String>,
    author: Option<String>,
) -> CliResult<()> {
    let mut builder = CourtDocs::new();
    if let Some(font) = font {
        builder = builder.with_docx_font(font);
    }
    if let Some(author) = author {
        builder = builder.with_author(author);
    }
    let doc = open(builder, input)?;

    let exported = doc.export(ExportFormat::Docx)?;
    let path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(&exported.filename));
    fs::write(&path, &exported.content)?;

    println!(
        "{} {} ({} bytes)",
        "Saved to".green(),
        path.display(),
        exported.content_len()
    );
    Ok(())
}

fn cmd_pdf(input: &Path, output: Option<&Path>, paper: Paper) -> CliResult<()> {
    let doc = open(CourtDocs::new().with_page_geometry(paper.into()), input)?;

    let exported = doc.export(ExportFormat::Pdf)?;
    let path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(&exported.filename));
    fs::write(&path, &exported.content)?;

    println!(
        "{} {} ({} pages)",
        "Saved to".green(),
        path.display(),
        exported.page_count.unwrap_or_default()
    );
    Ok(())
}

fn cmd_inspect(input: &Path, output: Option<&Path>, compact: bool) -> CliResult<()> {
    let doc = open(CourtDocs::new(), input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = doc.to_json(format)?;
    emit(output, &json)
}

fn cmd_filename(input: &Path, format: FormatArg, date: Option<NaiveDate>) -> CliResult<()> {
    let mut builder = CourtDocs::new();
    if let Some(date) = date {
        builder = builder.with_export_date(date);
    }
    let doc = open(builder, input)?;
    println!("{}", doc.filename(format.into()));
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "courtdocs".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Court document rendering tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/courtdocs".dimmed());
    println!("License: MIT");
}
