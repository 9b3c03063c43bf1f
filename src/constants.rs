// Page domain
pub const FIRST_PAGE: u32 = 1;
pub const LAST_PAGE: u32 = 120;
pub const COVER_PAGE: u32 = 1;
pub const CONTENTS_PAGE: u32 = 2;

// Zoom
pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.25;
pub const DEFAULT_ZOOM: f64 = 1.0;

// Quick-select strip: 12 pages either side of the current one
pub const QUICK_SELECT_SPAN: u32 = 25;

// Terminals narrower than this collapse the chapter panel
pub const NARROW_VIEWPORT_COLUMNS: u16 = 100;

// Asset layout
pub const IMAGES_DIR: &str = "fascicule_images";
pub const PDFS_DIR: &str = "fascicule_pdfs";
pub const FULL_PDF_FILE: &str = "fascicule_complet.pdf";
pub const TEXT_DIR: &str = "download";
pub const TEXT_FILE: &str = "fascicule_text.json";
pub const FULL_DOWNLOAD_NAME: &str = "Fascicule_Sciences_Physiques_Complet.pdf";

// UI
pub const HEADER_HEIGHT: u16 = 4;
pub const FOOTER_HEIGHT: u16 = 5;
pub const SIDEBAR_WIDTH: u16 = 40;
pub const MAX_SIDEBAR_TITLE_GRAPHEMES: usize = 30;
