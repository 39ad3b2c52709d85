//! Metadata and page image downloads
//!
//! All requests are plain blocking GETs with a fixed timeout. Anything other
//! than `200 OK` is an error and nothing is retried.

use std::path::{Path, PathBuf};

use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use tracing::{debug, info};

use crate::config::{CachePolicy, Endpoints, RunConfig};
use crate::date::cache_timestamp;
use crate::error::{Error, Result};
use crate::meta::MetaInfo;
use crate::sid::ResumeId;

/// Build the metadata URL: `{meta_base}/ssid-{sid}?cache={ts}`
pub fn meta_url(endpoints: &Endpoints, sid: &ResumeId, timestamp: &str) -> Result<Url> {
    let base = format!("{}/ssid-{}", endpoints.meta_base.trim_end_matches('/'), sid);
    Url::parse_with_params(&base, &[("cache", timestamp)])
        .map_err(|e| Error::InvalidUrl(format!("{}: {}", base, e)))
}

/// Build a page image URL: `{image_base}/ssid-{sid}-{page}.{ext}?cache={ts}&size={size}`
pub fn image_url(
    endpoints: &Endpoints,
    sid: &ResumeId,
    page: usize,
    ext: &str,
    timestamp: &str,
    size: u32,
) -> Result<Url> {
    let base = format!(
        "{}/ssid-{}-{}.{}",
        endpoints.image_base.trim_end_matches('/'),
        sid,
        page,
        ext
    );
    let size = size.to_string();
    Url::parse_with_params(&base, &[("cache", timestamp), ("size", size.as_str())])
        .map_err(|e| Error::InvalidUrl(format!("{}: {}", base, e)))
}

/// Local file name of a page image: `{sid}-{page}.{ext}`
pub fn image_file_name(sid: &ResumeId, page: usize, ext: &str) -> String {
    format!("{}-{}.{}", sid, page, ext)
}

/// Page images available on disk, in page order
#[derive(Debug, Clone, Default)]
pub struct PageImages {
    pub paths: Vec<PathBuf>,
    /// How many of `paths` were downloaded during this call
    pub downloaded: usize,
}

impl PageImages {
    /// How many of `paths` were already on disk
    pub fn reused(&self) -> usize {
        self.paths.len() - self.downloaded
    }
}

/// HTTP client bound to one set of endpoints
pub struct Fetcher {
    client: Client,
    endpoints: Endpoints,
    image_size: u32,
    image_ext: String,
}

impl Fetcher {
    pub fn new(config: &RunConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("resumeio-pdf/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(Error::Client)?;

        Ok(Self {
            client,
            endpoints: config.endpoints.clone(),
            image_size: config.image_size,
            image_ext: config.image_ext.clone(),
        })
    }

    /// Download and decode the layout metadata of a resume
    pub fn fetch_meta(&self, sid: &ResumeId) -> Result<MetaInfo> {
        let url = meta_url(&self.endpoints, sid, &cache_timestamp())?;
        debug!("GET {}", url);

        let response = self.get(&url)?;
        let body = response.text().map_err(|source| Error::Http {
            url: url.to_string(),
            source,
        })?;

        MetaInfo::from_json(&body)
    }

    /// Make sure pages `1..=num_pages` are on disk in `work_dir`
    ///
    /// Existing files are reused under [`CachePolicy::Reuse`]. Each download
    /// goes to a temporary file that is renamed into place once complete, so a
    /// failed request never leaves a truncated image behind. Images fetched
    /// for earlier pages stay on disk when a later page fails.
    pub fn fetch_images(
        &self,
        sid: &ResumeId,
        num_pages: usize,
        work_dir: &Path,
        policy: CachePolicy,
    ) -> Result<PageImages> {
        let mut images = PageImages::default();

        for page in 1..=num_pages {
            let path = work_dir.join(image_file_name(sid, page, &self.image_ext));

            if policy == CachePolicy::Reuse && path.exists() {
                debug!("Reusing {}", path.display());
            } else {
                info!("Download image #{}/{}", page, num_pages);
                let url = image_url(
                    &self.endpoints,
                    sid,
                    page,
                    &self.image_ext,
                    &cache_timestamp(),
                    self.image_size,
                )?;
                self.download_to_file(&url, &path)?;
                images.downloaded += 1;
            }

            images.paths.push(path);
        }

        debug!("Total {} pages", images.paths.len());

        Ok(images)
    }

    fn download_to_file(&self, url: &Url, path: &Path) -> Result<()> {
        let mut response = self.get(url)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut part = tempfile::Builder::new()
            .prefix(".page-")
            .suffix(".part")
            .tempfile_in(dir)?;

        response
            .copy_to(part.as_file_mut())
            .map_err(|source| Error::Http {
                url: url.to_string(),
                source,
            })?;

        part.persist(path).map_err(|e| Error::Io(e.error))?;

        Ok(())
    }

    fn get(&self, url: &Url) -> Result<Response> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| Error::Http {
                url: url.to_string(),
                source,
            })?;

        if response.status() != StatusCode::OK {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: response.status(),
            });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid() -> ResumeId {
        ResumeId::parse("AbC123").unwrap()
    }

    #[test]
    fn test_meta_url() {
        let url = meta_url(&Endpoints::default(), &sid(), "2024-01-02T03:04:05Z").unwrap();
        assert_eq!(
            url.as_str(),
            "https://ssr.resume.tools/meta/ssid-AbC123?cache=2024-01-02T03%3A04%3A05Z"
        );
    }

    #[test]
    fn test_image_url() {
        let url = image_url(
            &Endpoints::default(),
            &sid(),
            2,
            "png",
            "2024-01-02T03:04:05+01:00",
            1800,
        )
        .unwrap();
        assert_eq!(url.path(), "/to-image/ssid-AbC123-2.png");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("cache".to_string(), "2024-01-02T03:04:05+01:00".to_string()),
                ("size".to_string(), "1800".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_base_is_rejected() {
        let endpoints = Endpoints {
            meta_base: "not a url".to_string(),
            image_base: "not a url".to_string(),
        };
        let err = meta_url(&endpoints, &sid(), "t").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_image_file_name_is_deterministic() {
        assert_eq!(image_file_name(&sid(), 1, "png"), "AbC123-1.png");
        assert_eq!(image_file_name(&sid(), 12, "png"), "AbC123-12.png");
        assert_eq!(image_file_name(&sid(), 3, "png"), image_file_name(&sid(), 3, "png"));
    }

    #[test]
    fn test_zero_pages_makes_no_requests() {
        let mut config = RunConfig::new(sid());
        config.endpoints = Endpoints::with_base("http://127.0.0.1:9");
        let fetcher = Fetcher::new(&config).unwrap();

        let dir = tempfile::TempDir::new().unwrap();
        let images = fetcher
            .fetch_images(&sid(), 0, dir.path(), CachePolicy::Reuse)
            .unwrap();
        assert!(images.paths.is_empty());
        assert_eq!(images.downloaded, 0);
    }

    #[test]
    fn test_cached_pages_are_reused_without_network() {
        let mut config = RunConfig::new(sid());
        // Nothing listens here; any request would fail
        config.endpoints = Endpoints::with_base("http://127.0.0.1:9");
        let fetcher = Fetcher::new(&config).unwrap();

        let dir = tempfile::TempDir::new().unwrap();
        for page in 1..=2 {
            std::fs::write(dir.path().join(image_file_name(&sid(), page, "png")), b"cached").unwrap();
        }

        let images = fetcher
            .fetch_images(&sid(), 2, dir.path(), CachePolicy::Reuse)
            .unwrap();
        assert_eq!(images.downloaded, 0);
        assert_eq!(images.reused(), 2);
        assert_eq!(images.paths[0], dir.path().join("AbC123-1.png"));
        assert_eq!(images.paths[1], dir.path().join("AbC123-2.png"));
    }
}
