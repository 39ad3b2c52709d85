//! Resume.io to PDF
//!
//! Downloads a resume rendered by resume.io as page images plus layout
//! metadata and assembles them into a single PDF whose link annotations match
//! the hyperlinks of the original page.
//! This library provides functionality to:
//! - Parse resume identifiers and page URLs
//! - Fetch layout metadata and page renders
//! - Build the PDF with clickable link overlays
//! - Remove the transient page images afterwards
//!
//! # Example
//!
//! ```no_run
//! use resumeio_pdf::{run, ResumeId, RunConfig};
//! use std::path::PathBuf;
//!
//! let mut config = RunConfig::new(ResumeId::parse("AbC123")?);
//! config.output_path = PathBuf::from("CustomName.pdf");
//!
//! run(&config)?;
//! # Ok::<(), resumeio_pdf::Error>(())
//! ```

pub mod cleanup;
pub mod config;
pub mod date;
pub mod error;
pub mod fetch;
pub mod layout;
pub mod meta;
pub mod pdf;
pub mod pipeline;
pub mod sid;

// Re-export commonly used items
pub use config::{CachePolicy, Endpoints, RunConfig};
pub use error::{Error, ErrorKind, Result};
pub use pipeline::{run, RunSummary};
pub use sid::ResumeId;
