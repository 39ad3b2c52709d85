//! Page image embedding
//!
//! Page renders are decoded to raw 8-bit RGB and stored as an Image XObject.
//! Transparency, if any, goes into a separate DeviceGray soft mask. The pixel
//! streams are left uncompressed here; `Document::compress` deflates them
//! before saving.

use std::path::Path;

use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::error::{Error, Result};

/// A decoded page render ready to be embedded
#[derive(Debug, Clone)]
pub struct PageImage {
    pub width: u32,
    pub height: u32,
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl PageImage {
    /// Decode a PNG or JPEG file
    pub fn load(path: &Path) -> Result<Self> {
        let img = image::open(path).map_err(|source| Error::Image {
            path: path.to_path_buf(),
            source,
        })?;

        let (width, height) = (img.width(), img.height());

        if !img.color().has_alpha() {
            return Ok(Self {
                width,
                height,
                rgb: img.to_rgb8().into_raw(),
                alpha: None,
            });
        }

        let rgba = img.to_rgba8();
        let pixels = (width as usize) * (height as usize);
        let mut rgb = Vec::with_capacity(pixels * 3);
        let mut alpha = Vec::with_capacity(pixels);
        for px in rgba.pixels() {
            rgb.extend_from_slice(&px.0[..3]);
            alpha.push(px.0[3]);
        }

        // Fully opaque renders don't need a mask
        let alpha = if alpha.iter().all(|&a| a == u8::MAX) {
            None
        } else {
            Some(alpha)
        };

        Ok(Self { width, height, rgb, alpha })
    }

    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }

    /// Add the image (and its soft mask) to the document
    pub fn embed(self, doc: &mut Document) -> ObjectId {
        let mut image_dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => self.width as i64,
            "Height" => self.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8i64,
        };

        if let Some(alpha) = self.alpha {
            let mask_dict = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => self.width as i64,
                "Height" => self.height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8i64,
            };
            let mask_id = doc.add_object(Object::Stream(Stream::new(mask_dict, alpha)));
            image_dict.set("SMask", Object::Reference(mask_id));
        }

        doc.add_object(Object::Stream(Stream::new(image_dict, self.rgb)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    #[test]
    fn test_load_opaque_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.png");
        RgbImage::from_pixel(4, 3, Rgb([10, 20, 30])).save(&path).unwrap();

        let page = PageImage::load(&path).unwrap();
        assert_eq!((page.width, page.height), (4, 3));
        assert!(!page.has_alpha());
        assert_eq!(page.rgb.len(), 4 * 3 * 3);
        assert_eq!(&page.rgb[..3], &[10, 20, 30]);
    }

    #[test]
    fn test_opaque_rgba_drops_mask() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.png");
        RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255])).save(&path).unwrap();

        let page = PageImage::load(&path).unwrap();
        assert!(!page.has_alpha());
    }

    #[test]
    fn test_transparent_png_gets_soft_mask() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.png");
        RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 128])).save(&path).unwrap();

        let page = PageImage::load(&path).unwrap();
        assert!(page.has_alpha());

        let mut doc = Document::with_version("1.5");
        let image_id = page.embed(&mut doc);
        let dict = &doc.get_object(image_id).unwrap().as_stream().unwrap().dict;
        let mask_id = dict.get(b"SMask").unwrap().as_reference().unwrap();
        let mask = doc.get_object(mask_id).unwrap().as_stream().unwrap();
        assert_eq!(mask.content, vec![128u8; 4]);
    }

    #[test]
    fn test_garbage_file_is_image_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.png");
        std::fs::write(&path, b"<html>not an image</html>").unwrap();

        let err = PageImage::load(&path).unwrap_err();
        assert!(matches!(err, Error::Image { .. }));
    }
}
