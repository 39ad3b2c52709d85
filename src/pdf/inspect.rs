//! Read back page sizes, images and links of a generated PDF

use std::path::Path;

use lopdf::{Dictionary, Document, Object};

use crate::error::{Error, Result};

/// One link annotation
#[derive(Debug, Clone, PartialEq)]
pub struct LinkSummary {
    /// `[llx lly urx ury]`
    pub rect: [f32; 4],
    pub uri: Option<String>,
}

/// One page
#[derive(Debug, Clone, PartialEq)]
pub struct PageSummary {
    pub width: f32,
    pub height: f32,
    /// Image XObjects referenced by the page resources
    pub image_count: usize,
    pub links: Vec<LinkSummary>,
}

/// Whole document
#[derive(Debug, Clone, PartialEq)]
pub struct PdfSummary {
    pub pages: Vec<PageSummary>,
}

impl PdfSummary {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn link_count(&self) -> usize {
        self.pages.iter().map(|p| p.links.len()).sum()
    }
}

/// Summarize a PDF file
pub fn inspect_pdf(path: &Path) -> Result<PdfSummary> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;

    let mut pages = Vec::new();
    for (_num, page_id) in doc.get_pages() {
        let page = doc.get_dictionary(page_id)?;
        pages.push(summarize_page(&doc, page)?);
    }

    Ok(PdfSummary { pages })
}

fn summarize_page(doc: &Document, page: &Dictionary) -> Result<PageSummary> {
    let media_box = floats(doc, page.get(b"MediaBox")?)?;
    let (width, height) = match media_box.as_slice() {
        [llx, lly, urx, ury] => (urx - llx, ury - lly),
        _ => return Err(Error::MalformedPdf("MediaBox is not a rectangle".to_string())),
    };

    let image_count = match page.get(b"Resources") {
        Ok(res) => {
            let res = resolve_dict(doc, res)?;
            match res.get(b"XObject") {
                Ok(xobjects) => {
                    let xobjects = resolve_dict(doc, xobjects)?;
                    xobjects
                        .iter()
                        .filter(|(_, obj)| is_image(doc, obj))
                        .count()
                }
                Err(_) => 0,
            }
        }
        Err(_) => 0,
    };

    let mut links = Vec::new();
    if let Ok(annots) = page.get(b"Annots") {
        let annots = match annots {
            Object::Reference(id) => doc.get_object(*id)?,
            other => other,
        };
        for annot in annots.as_array()? {
            let annot = resolve_dict(doc, annot)?;
            if annot.get(b"Subtype").and_then(Object::as_name).ok() != Some(&b"Link"[..]) {
                continue;
            }

            let rect = floats(doc, annot.get(b"Rect")?)?;
            let rect = match rect.as_slice() {
                [a, b, c, d] => [*a, *b, *c, *d],
                _ => continue,
            };

            let uri = annot
                .get(b"A")
                .ok()
                .and_then(|a| resolve_dict(doc, a).ok())
                .and_then(|a| a.get(b"URI").ok())
                .and_then(|u| u.as_str().ok())
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned());

            links.push(LinkSummary { rect, uri });
        }
    }

    Ok(PageSummary {
        width,
        height,
        image_count,
        links,
    })
}

fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Dictionary> {
    match obj {
        Object::Reference(id) => Ok(doc.get_dictionary(*id)?),
        other => Ok(other.as_dict()?),
    }
}

fn is_image(doc: &Document, obj: &Object) -> bool {
    let stream = match obj {
        Object::Reference(id) => match doc.get_object(*id) {
            Ok(Object::Stream(stream)) => stream,
            _ => return false,
        },
        Object::Stream(stream) => stream,
        _ => return false,
    };
    stream.dict.get(b"Subtype").and_then(Object::as_name).ok() == Some(&b"Image"[..])
}

fn floats(doc: &Document, obj: &Object) -> Result<Vec<f32>> {
    let obj = match obj {
        Object::Reference(id) => doc.get_object(*id)?,
        other => other,
    };
    obj.as_array()?
        .iter()
        .map(|o| o.as_float().map_err(Error::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_nonexistent_file() {
        let result = inspect_pdf(Path::new("nonexistent.pdf"));
        assert!(matches!(result.unwrap_err(), Error::FileNotFound(_)));
    }

    #[test]
    fn test_inspect_not_a_pdf() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fake.pdf");
        std::fs::write(&path, b"plain text").unwrap();

        let result = inspect_pdf(&path);
        assert!(matches!(result.unwrap_err(), Error::Pdf(_)));
    }

    // Round trips through assemble_pdf live in tests/integration.rs
}
