//! PDF creation and inspection

pub mod assemble;
pub mod inspect;
pub mod page_image;

// Re-export commonly used items
pub use assemble::assemble_pdf;
pub use inspect::{inspect_pdf, LinkSummary, PageSummary, PdfSummary};
pub use page_image::PageImage;
