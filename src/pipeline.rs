//! The full run: metadata, page images, PDF, cleanup
//!
//! Stages run strictly in order and the first error ends the run. Page images
//! are only removed after the PDF has been written; on a failed run whatever
//! was already downloaded stays on disk and is reused next time.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::cleanup::cleanup_images;
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::pdf::assemble_pdf;

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Written PDF
    pub output: PathBuf,
    pub pages: usize,
    pub links: usize,
    /// Page images fetched from the service
    pub downloaded: usize,
    /// Page images taken from disk
    pub reused: usize,
}

/// Download a resume and write it as a PDF
///
/// # Example
///
/// ```no_run
/// use resumeio_pdf::{run, ResumeId, RunConfig};
///
/// let id = ResumeId::parse("https://resume.io/r/AbC123")?;
/// let summary = run(&RunConfig::new(id))?;
/// println!("{} pages", summary.pages);
/// # Ok::<(), resumeio_pdf::Error>(())
/// ```
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let sid = &config.resume_id;
    info!("SecureID: {}", sid);

    let fetcher = Fetcher::new(config)?;

    let meta = fetcher.fetch_meta(sid)?;
    if meta.page_count() == 0 {
        return Err(Error::NoPages(sid.to_string()));
    }
    debug!("Metadata: {} pages, {} links", meta.page_count(), meta.link_count());

    let images = fetcher.fetch_images(
        sid,
        meta.page_count(),
        &config.work_dir,
        config.cache_policy,
    )?;

    assemble_pdf(&config.output_path, &meta, &images.paths)?;
    info!("PDF written to {}", config.output_path.display());

    if !config.keep_images {
        cleanup_images(&images.paths);
    }

    Ok(RunSummary {
        output: config.output_path.clone(),
        pages: meta.page_count(),
        links: meta.link_count(),
        downloaded: images.downloaded,
        reused: images.reused(),
    })
}
