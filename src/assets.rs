//! Naming contract for the static files served alongside the booklet.
//!
//! Only paths are computed here; bytes are never read.

use crate::constants::{
    FIRST_PAGE, FULL_PDF_FILE, IMAGES_DIR, LAST_PAGE, PDFS_DIR, TEXT_DIR, TEXT_FILE,
};
use crate::error::AssetError;
use std::path::{Path, PathBuf};
use tracing::warn;

pub use crate::constants::FULL_DOWNLOAD_NAME;

#[derive(Debug, Clone)]
pub struct AssetLayout {
    root: PathBuf,
}

impl AssetLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn page_image(&self, page: u32) -> PathBuf {
        self.root.join(IMAGES_DIR).join(format!("page_{}.png", page))
    }

    pub fn page_pdf(&self, page: u32) -> PathBuf {
        self.root.join(PDFS_DIR).join(format!("page_{}.pdf", page))
    }

    pub fn full_pdf(&self) -> PathBuf {
        self.root.join(PDFS_DIR).join(FULL_PDF_FILE)
    }

    pub fn text_file(&self) -> PathBuf {
        self.root.join(TEXT_DIR).join(TEXT_FILE)
    }

    /// Existing image for `page`, or the reason it cannot be shown.
    pub fn resolve_page_image(&self, page: u32) -> Result<PathBuf, AssetError> {
        Self::check_page(page)?;
        Self::resolve(self.page_image(page))
    }

    pub fn resolve_page_pdf(&self, page: u32) -> Result<PathBuf, AssetError> {
        Self::check_page(page)?;
        Self::resolve(self.page_pdf(page))
    }

    pub fn resolve_full_pdf(&self) -> Result<PathBuf, AssetError> {
        Self::resolve(self.full_pdf())
    }

    fn check_page(page: u32) -> Result<(), AssetError> {
        if (FIRST_PAGE..=LAST_PAGE).contains(&page) {
            Ok(())
        } else {
            Err(AssetError::PageOutOfRange(page))
        }
    }

    fn resolve(path: PathBuf) -> Result<PathBuf, AssetError> {
        if path.is_file() {
            Ok(path)
        } else {
            warn!("Missing asset: {:?}", path);
            Err(AssetError::NotFound(path))
        }
    }
}

pub fn page_download_name(page: u32) -> String {
    format!("Page_{}_Sciences_Physiques.pdf", page)
}
