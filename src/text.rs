use crate::error::TextError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::{collections::HashMap, fs, path::Path, path::PathBuf};
use tracing::{debug, error, info};

pub const STATUS_OK: u16 = 200;
pub const STATUS_SERVER_ERROR: u16 = 500;
const LOAD_FAILURE_MESSAGE: &str = "Failed to load data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub page: u32,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct PageTextStore {
    pages: Vec<PageText>,
    by_page: HashMap<u32, usize>,
}

impl PageTextStore {
    /// Reads the whole text file. Any failure discards everything read so far.
    pub fn load(path: &Path) -> Result<Self, TextError> {
        debug!("Loading page text from {:?}", path);
        let contents = fs::read_to_string(path)?;
        let pages: Vec<PageText> = serde_json::from_str(&contents)?;
        info!("Loaded text for {} pages", pages.len());
        Ok(Self::from_pages(pages))
    }

    pub fn from_pages(pages: Vec<PageText>) -> Self {
        let mut by_page = HashMap::with_capacity(pages.len());
        for (index, entry) in pages.iter().enumerate() {
            // duplicates: first entry wins
            by_page.entry(entry.page).or_insert(index);
        }
        Self { pages, by_page }
    }

    pub fn pages(&self) -> &[PageText] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn text_for_page(&self, page: u32) -> Option<&str> {
        self.by_page
            .get(&page)
            .map(|&index| self.pages[index].text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextResponse {
    pub status: u16,
    pub body: Value,
}

impl TextResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Parameterless accessor returning every page's text, read from disk on
/// each call.
#[derive(Debug, Clone)]
pub struct TextEndpoint {
    path: PathBuf,
}

impl TextEndpoint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn respond(&self) -> TextResponse {
        match PageTextStore::load(&self.path) {
            Ok(store) => TextResponse {
                status: STATUS_OK,
                body: json!({ "pages": store.pages }),
            },
            Err(err) => {
                error!("Error loading fascicule data: {}", err);
                TextResponse {
                    status: STATUS_SERVER_ERROR,
                    body: json!({ "error": LOAD_FAILURE_MESSAGE }),
                }
            }
        }
    }
}
