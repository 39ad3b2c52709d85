//! Resume layout metadata as served by the rendering service

use serde::Deserialize;

use crate::error::Result;

/// Decoded metadata response: one entry per page, in page order
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetaInfo {
    pub pages: Vec<MetaPageInfo>,
}

/// Layout of a single rendered page
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetaPageInfo {
    pub viewport: Viewport,
    #[serde(default)]
    pub links: Vec<MetaLink>,
}

/// Page dimensions, in the same unit as the rendered image
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Clickable region, top-left origin relative to the viewport
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetaLink {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub url: String,
}

impl MetaInfo {
    /// Decode a metadata JSON body
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total number of links over all pages
    pub fn link_count(&self) -> usize {
        self.pages.iter().map(|p| p.links.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_decode_full_shape() {
        let body = r#"{
            "pages": [
                {
                    "viewport": {"width": 600, "height": 800.5},
                    "links": [
                        {"left": 10, "top": 20, "width": 100, "height": 30, "url": "https://example.com"}
                    ]
                },
                {"viewport": {"width": 600, "height": 800}, "links": []}
            ],
            "fonts": ["ignored"]
        }"#;

        let meta = MetaInfo::from_json(body).unwrap();
        assert_eq!(meta.page_count(), 2);
        assert_eq!(meta.link_count(), 1);
        assert_eq!(meta.pages[0].viewport.height, 800.5);

        let link = &meta.pages[0].links[0];
        assert_eq!(link.left, 10.0);
        assert_eq!(link.url, "https://example.com");
    }

    #[test]
    fn test_missing_links_is_empty() {
        let meta = MetaInfo::from_json(r#"{"pages":[{"viewport":{"width":1,"height":2}}]}"#).unwrap();
        assert!(meta.pages[0].links.is_empty());
    }

    #[test]
    fn test_missing_viewport_fails() {
        let err = MetaInfo::from_json(r#"{"pages":[{"links":[]}]}"#).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_not_json_fails() {
        let err = MetaInfo::from_json("<html>gateway timeout</html>").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
