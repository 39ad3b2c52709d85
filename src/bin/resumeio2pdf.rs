//! resumeio2pdf CLI tool
//!
//! Downloads a resume.io resume and stores it as a PDF with working links.

use std::io;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use resumeio_pdf::config::resolve_output_path;
use resumeio_pdf::pdf::inspect_pdf;
use resumeio_pdf::{run, CachePolicy, Endpoints, ResumeId, RunConfig};

/// resumeio2pdf - Save a resume.io resume as PDF
#[derive(Parser)]
#[command(name = "resumeio2pdf")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Download by secure id, store as AbC123.pdf
    resumeio2pdf download AbC123

    # Download from the public page URL under a custom name
    resumeio2pdf download https://resume.io/r/AbC123 -o CustomName

    # Show pages and links of a generated PDF
    resumeio2pdf info CustomName.pdf")]
struct Cli {
    /// Show progress and debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a resume and assemble the PDF
    Download {
        /// Secure id (e.g. "AbC123") or page URL (https://resume.io/r/AbC123)
        resume: String,

        /// Output PDF file (".pdf" is appended unless the name already ends in it)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for the transient page images
        #[arg(long, default_value = ".")]
        work_dir: PathBuf,

        /// Download page images again even if they are on disk
        #[arg(long)]
        refresh: bool,

        /// Keep page images after the PDF is written
        #[arg(long)]
        keep_images: bool,

        /// Service base URL serving /meta and /to-image
        #[arg(long, hide = true)]
        base_url: Option<String>,

        /// Open the output file after creation
        #[arg(long)]
        open: bool,
    },

    /// Show pages and links of a PDF file
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Download {
            resume,
            output,
            work_dir,
            refresh,
            keep_images,
            base_url,
            open,
        } => {
            cmd_download(resume, output, work_dir, refresh, keep_images, base_url, open)
        }
        Commands::Info { input } => cmd_info(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Open a file with the system default application
fn open_file(path: &Path) -> anyhow::Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.display().to_string()])
            .spawn()?;
    }
    Ok(())
}

/// Download a resume and write the PDF
fn cmd_download(
    resume: String,
    output: Option<PathBuf>,
    work_dir: PathBuf,
    refresh: bool,
    keep_images: bool,
    base_url: Option<String>,
    open: bool,
) -> anyhow::Result<()> {
    let resume_id = ResumeId::parse(&resume)?;

    let mut config = RunConfig::new(resume_id);
    config.output_path = resolve_output_path(output.as_deref(), &config.resume_id);
    config.work_dir = work_dir;
    config.keep_images = keep_images;
    if refresh {
        config.cache_policy = CachePolicy::Refresh;
    }
    if let Some(base) = base_url {
        config.endpoints = Endpoints::with_base(&base);
    }

    eprintln!("Downloading resume {}...", config.resume_id);

    let summary = run(&config)
        .with_context(|| format!("Failed to save resume {}", config.resume_id))?;

    eprintln!(
        "{} pages, {} links ({} images downloaded, {} reused)",
        summary.pages, summary.links, summary.downloaded, summary.reused
    );
    println!("Resume stored to {}", summary.output.display());

    if open {
        open_file(&summary.output)?;
    }

    Ok(())
}

/// Show information about a PDF
fn cmd_info(input: PathBuf) -> anyhow::Result<()> {
    let summary = inspect_pdf(&input)?;

    println!("File: {}", input.display());
    println!("Pages: {}", summary.page_count());

    for (i, page) in summary.pages.iter().enumerate() {
        println!(
            "Page {}: {} x {}, {} image(s), {} link(s)",
            i + 1,
            page.width,
            page.height,
            page.image_count,
            page.links.len()
        );
        for link in &page.links {
            let [x0, y0, x1, y1] = link.rect;
            println!(
                "  [{} {} {} {}] {}",
                x0,
                y0,
                x1,
                y1,
                link.uri.as_deref().unwrap_or("-")
            );
        }
    }

    Ok(())
}
