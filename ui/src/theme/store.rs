use crate::theme::errors::{ThemeError, ThemeResult};
use crate::theme::storage::KeyValueStore;
use crate::theme::style::{STYLE_SLOT_ID, StyleHost, render_stylesheet};
use crate::theme::types::{ThemeConfig, ThemePatch};
use crate::theme::validation::parse_snapshot;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Key the theme record is stored under.
pub const STORAGE_KEY: &str = "zero-point-theme";

/// Suggested name for exported theme files.
pub const EXPORT_FILE_NAME: &str = "zero-point-theme.json";

/// Handle through which consumers share one store.
pub type SharedThemeStore = Arc<Mutex<ThemeStore>>;

/// Owner of the active [`ThemeConfig`].
///
/// Every mutation is written through to durable storage before it becomes
/// active, then rendered into the style slot and announced to subscribers.
/// A failed write leaves the previous record active, so memory and storage
/// never disagree.
///
/// # Examples
///
/// ```no_run
/// use zeropoint::theme::{Document, MemoryStorage, ThemePatch, ThemeStore};
/// use zeropoint::theme::types::FontSize;
///
/// let mut store = ThemeStore::load(Box::new(MemoryStorage::new()), Box::new(Document::new()))?;
/// store.update(ThemePatch::default().font_size(FontSize::Lg))?;
/// assert_eq!(store.get().font_size, FontSize::Lg);
/// # Ok::<(), zeropoint::theme::ThemeError>(())
/// ```
pub struct ThemeStore {
    current: ThemeConfig,
    storage: Box<dyn KeyValueStore>,
    styles: Box<dyn StyleHost>,
    subscribers: Vec<Sender<ThemeConfig>>,
}

impl ThemeStore {
    /// Restores the theme from storage, falling back to the default record.
    ///
    /// The adopted record is persisted immediately and its stylesheet is
    /// installed, so storage, memory and document agree from the start.
    pub fn load(
        storage: Box<dyn KeyValueStore>,
        styles: Box<dyn StyleHost>,
    ) -> ThemeResult<Self> {
        let stored = storage.get_item(STORAGE_KEY).unwrap_or_else(|e| {
            log::warn!("Could not read stored theme, using defaults: {e}");
            None
        });

        let current = match stored {
            Some(text) => match parse_snapshot(&text) {
                Ok(patch) => {
                    log::info!("Restored theme from storage");
                    ThemeConfig::default().merged(&patch)
                }
                Err(e) => {
                    log::warn!("Stored theme is unreadable, using defaults: {e}");
                    ThemeConfig::default()
                }
            },
            None => {
                log::info!("No stored theme found, using defaults");
                ThemeConfig::default()
            }
        };

        let mut store = Self {
            current: current.clone(),
            storage,
            styles,
            subscribers: Vec::new(),
        };
        store.persist(&current)?;
        store.install_style();
        Ok(store)
    }

    pub fn into_shared(self) -> SharedThemeStore {
        Arc::new(Mutex::new(self))
    }

    /// Snapshot of the active theme.
    pub fn get(&self) -> ThemeConfig {
        self.current.clone()
    }

    /// Merges `patch` over the active theme.
    pub fn update(&mut self, patch: ThemePatch) -> ThemeResult<()> {
        let next = self.current.merged(&patch);
        self.activate(next)
    }

    /// Replaces the active theme with the default record.
    pub fn reset(&mut self) -> ThemeResult<()> {
        log::info!("Resetting theme to defaults");
        self.activate(ThemeConfig::default())
    }

    /// Pretty-printed JSON of the active theme.
    pub fn export_snapshot(&self) -> ThemeResult<String> {
        serde_json::to_string_pretty(&self.current)
            .map_err(|e| ThemeError::Serialize(e.to_string()))
    }

    /// Activates an exported theme.
    ///
    /// The parsed object is merged over the default record, not over the
    /// active one. On failure nothing changes and nothing is written.
    pub fn import_snapshot(&mut self, text: &str) -> ThemeResult<()> {
        let patch = parse_snapshot(text).inspect_err(|e| {
            log::warn!("Rejected theme import: {e}");
        })?;

        log::info!("Importing theme");
        self.activate(ThemeConfig::default().merged(&patch))
    }

    /// Writes the export to [`EXPORT_FILE_NAME`] inside `dir`.
    pub fn export_to_file(&self, dir: &Path) -> ThemeResult<PathBuf> {
        let path = dir.join(EXPORT_FILE_NAME);
        let content = self.export_snapshot()?;
        fs::write(&path, content).map_err(|e| ThemeError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        log::info!("Exported theme to {}", path.display());
        Ok(path)
    }

    pub fn import_from_file(&mut self, path: &Path) -> ThemeResult<()> {
        let content = fs::read_to_string(path).map_err(|e| ThemeError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        self.import_snapshot(&content)
    }

    /// Registers for theme changes. Each activated snapshot is sent once.
    pub fn subscribe(&mut self) -> Receiver<ThemeConfig> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Stylesheet for the active theme.
    pub fn stylesheet(&self) -> String {
        render_stylesheet(&self.current)
    }

    fn activate(&mut self, next: ThemeConfig) -> ThemeResult<()> {
        self.persist(&next)?;
        self.current = next;
        self.install_style();
        self.notify();
        Ok(())
    }

    fn persist(&mut self, theme: &ThemeConfig) -> ThemeResult<()> {
        let serialized =
            serde_json::to_string(theme).map_err(|e| ThemeError::Serialize(e.to_string()))?;
        self.storage
            .set_item(STORAGE_KEY, &serialized)
            .inspect_err(|e| log::error!("Failed to persist theme: {e}"))
    }

    fn install_style(&mut self) {
        let css = render_stylesheet(&self.current);
        if let Err(e) = self.styles.upsert_style(STYLE_SLOT_ID, &css) {
            // Derived data: the next mutation or start re-renders it
            log::warn!("Failed to install theme stylesheet: {e}");
        }
    }

    fn notify(&mut self) {
        let snapshot = &self.current;
        self.subscribers
            .retain(|subscriber| subscriber.send(snapshot.clone()).is_ok());
    }
}
