use crate::theme::errors::{ThemeError, ThemeResult};
use crate::theme::types::{BackgroundPattern, ThemeConfig};
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Identifier of the single style element the theme owns.
pub const STYLE_SLOT_ID: &str = "custom-theme-styles";

/// Surface that accepts generated stylesheets in named slots.
pub trait StyleHost: Send {
    /// Inserts the slot if absent, otherwise replaces its content.
    fn upsert_style(&mut self, id: &str, css: &str) -> ThemeResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleElement {
    pub id: String,
    pub content: String,
}

/// In-memory document head. Clones share the same head.
#[derive(Clone, Default)]
pub struct Document {
    head: Arc<Mutex<Vec<StyleElement>>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style_elements(&self) -> Vec<StyleElement> {
        self.head
            .lock()
            .map(|head| head.clone())
            .unwrap_or_default()
    }

    pub fn style_content(&self, id: &str) -> Option<String> {
        self.style_elements()
            .into_iter()
            .find(|element| element.id == id)
            .map(|element| element.content)
    }

    pub fn count_styles_with_id(&self, id: &str) -> usize {
        self.style_elements()
            .iter()
            .filter(|element| element.id == id)
            .count()
    }
}

impl StyleHost for Document {
    fn upsert_style(&mut self, id: &str, css: &str) -> ThemeResult<()> {
        let mut head = self
            .head
            .lock()
            .map_err(|e| ThemeError::Storage(format!("document lock poisoned: {e}")))?;

        match head.iter_mut().find(|element| element.id == id) {
            Some(element) => element.content = css.to_string(),
            None => head.push(StyleElement {
                id: id.to_string(),
                content: css.to_string(),
            }),
        }
        Ok(())
    }
}

/// Writes each slot to `<dir>/<id>.css`, for headless runs.
pub struct FileStyleHost {
    dir: PathBuf,
}

impl FileStyleHost {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub fn slot_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.css"))
    }
}

impl StyleHost for FileStyleHost {
    fn upsert_style(&mut self, id: &str, css: &str) -> ThemeResult<()> {
        let path = self.slot_path(id);
        fs::create_dir_all(&self.dir)
            .and_then(|_| fs::write(&path, css))
            .map_err(|e| ThemeError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
    }
}

/// Turns a gradient token list such as `from-orange-500 via-pink-500 to-purple-600`
/// into CSS variable references (`var(--orange-color-500)`, ...).
fn gradient_stops(expression: &str) -> Vec<String> {
    expression
        .split_whitespace()
        .map(|token| {
            let stop = ["from-", "via-", "to-"]
                .iter()
                .find_map(|prefix| token.strip_prefix(*prefix))
                .unwrap_or(token);
            format!("var(--{})", stop.replacen('-', "-color-", 1))
        })
        .collect()
}

fn pattern_rule(pattern: BackgroundPattern) -> Option<(&'static str, &'static str)> {
    match pattern {
        BackgroundPattern::None => None,
        BackgroundPattern::Dots => Some((
            "radial-gradient(circle, rgba(148, 163, 184, 0.25) 1px, transparent 1px)",
            "20px 20px",
        )),
        BackgroundPattern::Grid => Some((
            "linear-gradient(rgba(148, 163, 184, 0.15) 1px, transparent 1px), linear-gradient(90deg, rgba(148, 163, 184, 0.15) 1px, transparent 1px)",
            "24px 24px",
        )),
        BackgroundPattern::Waves => Some((
            "repeating-radial-gradient(circle at 0 0, transparent 0, rgba(148, 163, 184, 0.08) 10px, transparent 20px)",
            "40px 40px",
        )),
    }
}

/// Generates the stylesheet for a theme. `customCss` is appended verbatim last.
pub fn render_stylesheet(theme: &ThemeConfig) -> String {
    let mut css = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(css, ":root {{");
    let _ = writeln!(css, "  --font-size-base: {};", theme.font_size.pixels());
    let _ = writeln!(
        css,
        "  --border-radius-base: {};",
        theme.border_radius.pixels()
    );
    let _ = writeln!(css, "}}\n");

    let _ = writeln!(css, "body {{");
    let _ = writeln!(
        css,
        "  font-family: {}, system-ui, sans-serif;",
        theme.font_family
    );
    let _ = writeln!(css, "  font-size: var(--font-size-base);");
    if let Some((image, size)) = pattern_rule(theme.background_pattern) {
        let _ = writeln!(css, "  background-image: {image};");
        let _ = writeln!(css, "  background-size: {size};");
    }
    let _ = writeln!(css, "}}\n");

    for (class, expression) in [
        ("theme-primary-gradient", &theme.primary_color),
        ("theme-secondary-gradient", &theme.secondary_color),
        ("theme-accent-gradient", &theme.accent_color),
    ] {
        let stops = gradient_stops(expression);
        if stops.is_empty() {
            continue;
        }
        let _ = writeln!(css, ".{class} {{");
        let _ = writeln!(
            css,
            "  background: linear-gradient(135deg, {});",
            stops.join(", ")
        );
        let _ = writeln!(css, "}}\n");
    }

    if !theme.custom_css.is_empty() {
        css.push_str(&theme.custom_css);
        css.push('\n');
    }

    css
}
