//! Run configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::sid::ResumeId;

/// Default metadata endpoint base
pub const DEFAULT_META_BASE: &str = "https://ssr.resume.tools/meta";
/// Default page image endpoint base
pub const DEFAULT_IMAGE_BASE: &str = "https://ssr.resume.tools/to-image";
/// Long edge of the requested page renders, in pixels
pub const DEFAULT_IMAGE_SIZE: u32 = 1800;
/// Page image file extension requested from the service
pub const DEFAULT_IMAGE_EXT: &str = "png";
/// Connect timeout and total request time limit
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Base URLs of the rendering service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Metadata is fetched from `{meta_base}/ssid-{sid}`
    pub meta_base: String,
    /// Page images are fetched from `{image_base}/ssid-{sid}-{page}.{ext}`
    pub image_base: String,
}

impl Endpoints {
    /// Serve both endpoints from one base URL (`{base}/meta`, `{base}/to-image`)
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            meta_base: format!("{}/meta", base),
            image_base: format!("{}/to-image", base),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            meta_base: DEFAULT_META_BASE.to_string(),
            image_base: DEFAULT_IMAGE_BASE.to_string(),
        }
    }
}

/// What to do with page images already present in the working directory
///
/// Rendered pages are treated as immutable for a given sid and page number, so
/// by default a file that exists is reused without any freshness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Reuse any existing `{sid}-{page}.{ext}` file as-is
    #[default]
    Reuse,
    /// Download every page again, overwriting existing files
    Refresh,
}

/// Options for one download-and-assemble run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Resume to download
    pub resume_id: ResumeId,
    /// Output PDF path
    pub output_path: PathBuf,
    /// Directory holding the transient page images
    pub work_dir: PathBuf,
    pub endpoints: Endpoints,
    /// Requested long edge of page renders
    pub image_size: u32,
    /// Requested page image format
    pub image_ext: String,
    /// Connect timeout, and total time limit of each request including the body
    pub timeout: Duration,
    pub cache_policy: CachePolicy,
    /// Leave page images on disk after a successful run
    pub keep_images: bool,
}

impl RunConfig {
    /// Defaults: output `{sid}.pdf` and page images in the current directory
    pub fn new(resume_id: ResumeId) -> Self {
        let output_path = PathBuf::from(format!("{}.pdf", resume_id));
        Self {
            resume_id,
            output_path,
            work_dir: PathBuf::from("."),
            endpoints: Endpoints::default(),
            image_size: DEFAULT_IMAGE_SIZE,
            image_ext: DEFAULT_IMAGE_EXT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            cache_policy: CachePolicy::default(),
            keep_images: false,
        }
    }
}

/// Resolve the user-supplied output name into a PDF path
///
/// A name not already ending in `.pdf` gets `.pdf` appended, so `Jane.Doe`
/// becomes `Jane.Doe.pdf`; `None` falls back to `{sid}.pdf`.
pub fn resolve_output_path(output: Option<&Path>, resume_id: &ResumeId) -> PathBuf {
    let is_pdf =
        |path: &Path| path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("pdf"));

    match output {
        Some(path) if is_pdf(path) => path.to_path_buf(),
        Some(path) => {
            let mut name = path.as_os_str().to_os_string();
            name.push(".pdf");
            PathBuf::from(name)
        }
        None => PathBuf::from(format!("{}.pdf", resume_id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid() -> ResumeId {
        ResumeId::parse("abc123").unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = RunConfig::new(sid());
        assert_eq!(config.output_path, PathBuf::from("abc123.pdf"));
        assert_eq!(config.work_dir, PathBuf::from("."));
        assert_eq!(config.image_size, 1800);
        assert_eq!(config.image_ext, "png");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.cache_policy, CachePolicy::Reuse);
        assert_eq!(config.endpoints.meta_base, "https://ssr.resume.tools/meta");
        assert_eq!(config.endpoints.image_base, "https://ssr.resume.tools/to-image");
        assert!(!config.keep_images);
    }

    #[test]
    fn test_endpoints_with_base() {
        let endpoints = Endpoints::with_base("http://127.0.0.1:8080/");
        assert_eq!(endpoints.meta_base, "http://127.0.0.1:8080/meta");
        assert_eq!(endpoints.image_base, "http://127.0.0.1:8080/to-image");
    }

    #[test]
    fn test_resolve_output_path() {
        assert_eq!(
            resolve_output_path(Some(Path::new("CustomName")), &sid()),
            PathBuf::from("CustomName.pdf")
        );
        assert_eq!(
            resolve_output_path(Some(Path::new("out/cv.pdf")), &sid()),
            PathBuf::from("out/cv.pdf")
        );
        assert_eq!(
            resolve_output_path(Some(Path::new("Jane.Doe")), &sid()),
            PathBuf::from("Jane.Doe.pdf")
        );
        assert_eq!(
            resolve_output_path(Some(Path::new("CV.PDF")), &sid()),
            PathBuf::from("CV.PDF")
        );
        assert_eq!(resolve_output_path(None, &sid()), PathBuf::from("abc123.pdf"));
    }
}
