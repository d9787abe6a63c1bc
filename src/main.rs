use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use gst_returns::assemble::{Assembler, SourceFile};
use gst_returns::{Result, ReturnsError};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_tracing().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ReturnsError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Assemble(args) => execute_assemble(args),
    }
}

fn execute_assemble(args: AssembleArgs) -> Result<()> {
    let files = args
        .input
        .iter()
        .map(|path| read_source(path))
        .collect::<Result<Vec<_>>>()?;

    let template = match &args.template {
        Some(path) => read_template(path),
        None => Vec::new(),
    };

    let generated = Assembler::new()
        .with_template(template)
        .generate_with_report(&files)?;
    fs::write(&args.output, &generated.bytes)?;

    if let Some(report_path) = &args.report {
        let json = serde_json::to_string_pretty(&generated.report)?;
        fs::write(report_path, json)?;
    }
    Ok(())
}

fn read_source(path: &Path) -> Result<SourceFile> {
    if !path.exists() {
        return Err(ReturnsError::MissingInput(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(SourceFile::new(name, String::from_utf8_lossy(&bytes)))
}

fn read_template(path: &Path) -> Vec<u8> {
    fs::read(path).unwrap_or_else(|error| {
        warn!(path = %path.display(), %error, "template could not be read, continuing without it");
        Vec::new()
    })
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Assemble GST return workbooks from sales CSV exports."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge CSV exports into a single return workbook.
    Assemble(AssembleArgs),
}

#[derive(clap::Args)]
struct AssembleArgs {
    /// Source CSV file. Repeat to merge several files, in order.
    #[arg(long, required = true)]
    input: Vec<PathBuf>,

    /// Optional xlsx template providing sheet layouts.
    #[arg(long)]
    template: Option<PathBuf>,

    /// Output workbook path.
    #[arg(long)]
    output: PathBuf,

    /// Optional path for a JSON report of per-file outcomes.
    #[arg(long)]
    report: Option<PathBuf>,
}
