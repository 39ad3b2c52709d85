//! PDF assembly from page renders and link metadata
//!
//! Every page is sized to its viewport, the render is stretched over the whole
//! page and each link of the page becomes a `/Link` annotation with a `/URI`
//! action placed over the same spot.

use std::path::{Path, PathBuf};

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use tracing::debug;

use super::page_image::PageImage;
use crate::error::{Error, Result};
use crate::layout::{LinkRect, PageDimensions};
use crate::meta::{MetaInfo, MetaPageInfo};

/// Resource name of the page render inside each page
const IMAGE_NAME: &str = "Im0";

/// Build a PDF with one page per metadata page and save it to `output`
///
/// `images[i]` is the render of `meta.pages[i]`; both must have the same
/// length. Nothing is written unless every page was built.
///
/// # Example
///
/// ```no_run
/// use resumeio_pdf::meta::MetaInfo;
/// use resumeio_pdf::pdf::assemble_pdf;
/// use std::path::{Path, PathBuf};
///
/// let meta = MetaInfo::from_json(r#"{"pages":[{"viewport":{"width":600,"height":800},"links":[]}]}"#)?;
/// assemble_pdf(Path::new("resume.pdf"), &meta, &[PathBuf::from("abc-1.png")])?;
/// # Ok::<(), resumeio_pdf::Error>(())
/// ```
pub fn assemble_pdf(output: &Path, meta: &MetaInfo, images: &[PathBuf]) -> Result<()> {
    if meta.pages.len() != images.len() {
        return Err(Error::PageCountMismatch {
            pages: meta.pages.len(),
            images: images.len(),
        });
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::with_capacity(images.len());
    for (i, (page_info, image_path)) in meta.pages.iter().zip(images).enumerate() {
        let page_id = add_page(&mut doc, pages_id, page_info, image_path)?;
        debug!(
            "Page {} built from {} with {} links",
            i + 1,
            image_path.display(),
            page_info.links.len()
        );
        kids.push(Object::Reference(page_id));
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Count" => kids.len() as i64,
        "Kids" => kids,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc.compress();
    doc.save(output)?;

    Ok(())
}

/// Add one page (render, content stream, link annotations) and return its id
fn add_page(
    doc: &mut Document,
    pages_id: ObjectId,
    page_info: &MetaPageInfo,
    image_path: &Path,
) -> Result<ObjectId> {
    let dims = PageDimensions::from_viewport(&page_info.viewport);

    let image_id = PageImage::load(image_path)?.embed(doc);

    // Unit square scaled to the full page
    let content = format!(
        "q\n{} 0 0 {} 0 0 cm\n/{} Do\nQ\n",
        dims.width, dims.height, IMAGE_NAME
    );
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let annots: Vec<Object> = page_info
        .links
        .iter()
        .map(|link| {
            let rect = LinkRect::from_top_left(link, dims.height);
            Object::Reference(add_link_annotation(doc, &rect, &link.url))
        })
        .collect();

    let mut xobjects = Dictionary::new();
    xobjects.set(IMAGE_NAME, Object::Reference(image_id));

    let mut page = dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => reals(&dims.media_box()),
        "Contents" => content_id,
        "Resources" => Object::Dictionary(dictionary! {
            "XObject" => Object::Dictionary(xobjects),
        }),
    };
    if !annots.is_empty() {
        page.set("Annots", Object::Array(annots));
    }

    Ok(doc.add_object(Object::Dictionary(page)))
}

/// Borderless link annotation opening `uri`
fn add_link_annotation(doc: &mut Document, rect: &LinkRect, uri: &str) -> ObjectId {
    let action = dictionary! {
        "Type" => "Action",
        "S" => "URI",
        "URI" => Object::string_literal(uri),
    };

    doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => reals(&rect.corners()),
        "Border" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(0)],
        "A" => Object::Dictionary(action),
    })
}

fn reals(values: &[f32]) -> Object {
    Object::Array(values.iter().map(|&v| Object::Real(v)).collect())
}
