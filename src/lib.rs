pub mod assets;
pub mod catalog;
pub mod constants;
pub mod error;
pub mod navigator;
pub mod text;
pub mod ui;

pub use assets::AssetLayout;
pub use catalog::{ChapterCatalog, ChapterRecord, Part};
pub use error::{AssetError, TextError, UiError};
pub use navigator::{NavigationObserver, NavigationState, PageNavigator, ViewMode, Viewport};
pub use text::{PageText, PageTextStore, TextEndpoint, TextResponse};
pub use ui::App;
