//! # Theme Module
//!
//! Single source of truth for the visual presentation: colors, typography,
//! rounding, background pattern, branding and custom CSS.
//!
//! ## Architecture
//!
//! - **[`ThemeStore`]** - owns the active [`ThemeConfig`] and writes every change
//!   through to a [`KeyValueStore`] before activating it
//! - **[`KeyValueStore`]** - durable string storage ([`MemoryStorage`], [`FileStorage`])
//! - **[`StyleHost`]** - receives the generated stylesheet in the
//!   `custom-theme-styles` slot ([`Document`], [`FileStyleHost`])
//! - **Validation** - closed value sets for enum fields, checked on import and load
//!
//! The store is an explicit handle. Share it as a [`SharedThemeStore`] rather
//! than through global state.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use zeropoint::theme::{FileStorage, FileStyleHost, ThemePatch, ThemeStore};
//! use std::path::Path;
//!
//! let dir = Path::new("/tmp/zeropoint");
//! let mut store = ThemeStore::load(
//!     Box::new(FileStorage::in_dir(dir)),
//!     Box::new(FileStyleHost::new(dir)),
//! )?;
//!
//! store.update(ThemePatch::default().brand_name("Acme"))?;
//! let exported = store.export_snapshot()?;
//! store.import_snapshot(&exported)?;
//! # Ok::<(), zeropoint::theme::ThemeError>(())
//! ```
//!
//! ## Error Handling
//!
//! A failed write or a malformed import leaves both the active theme and the
//! stored record untouched. A failing style host is logged and does not fail
//! the operation.

pub mod errors;
pub mod storage;
pub mod store;
pub mod style;
pub mod types;
pub mod validation;

pub use errors::{ThemeError, ThemeResult};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
pub use store::{EXPORT_FILE_NAME, STORAGE_KEY, SharedThemeStore, ThemeStore};
pub use style::{Document, FileStyleHost, STYLE_SLOT_ID, StyleHost, render_stylesheet};
pub use types::{
    BackgroundPattern, BorderRadius, ColorPreset, FontSize, ThemeConfig, ThemePatch,
};
