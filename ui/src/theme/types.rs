use super::errors::ThemeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Closed token sets shared by the persisted form, the CLI and style synthesis.
macro_rules! theme_enum {
    ($(#[$meta:meta])* $name:ident, $field:literal { $($variant:ident => $token:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $token)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $token,)+
                }
            }

            pub fn allowed_values() -> String {
                Self::ALL
                    .iter()
                    .map(|value| value.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ThemeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token => Ok($name::$variant),)+
                    _ => Err(ThemeError::InvalidValue {
                        field: $field,
                        value: s.to_string(),
                        allowed: Self::allowed_values(),
                    }),
                }
            }
        }
    };
}

theme_enum!(
    /// Base text scale
    FontSize, "fontSize" {
        Sm => "sm",
        Md => "md",
        Lg => "lg",
    }
);

theme_enum!(
    /// Corner rounding scale
    BorderRadius, "borderRadius" {
        None => "none",
        Sm => "sm",
        Md => "md",
        Lg => "lg",
        Xl => "xl",
    }
);

theme_enum!(
    /// Decorative page background
    BackgroundPattern, "backgroundPattern" {
        None => "none",
        Dots => "dots",
        Grid => "grid",
        Waves => "waves",
    }
);

theme_enum!(
    /// Named primary gradients offered by the customizer
    ColorPreset, "preset" {
        ZeroPoint => "zero-point",
        OceanBlue => "ocean-blue",
        Sunset => "sunset",
        Forest => "forest",
        Royal => "royal",
        Fire => "fire",
    }
);

impl ColorPreset {
    pub fn label(self) -> &'static str {
        match self {
            ColorPreset::ZeroPoint => "Zero-Point Gradient",
            ColorPreset::OceanBlue => "Ocean Blue",
            ColorPreset::Sunset => "Sunset",
            ColorPreset::Forest => "Forest",
            ColorPreset::Royal => "Royal",
            ColorPreset::Fire => "Fire",
        }
    }

    pub fn gradient(self) -> &'static str {
        match self {
            ColorPreset::ZeroPoint => "from-orange-500 via-pink-500 to-purple-600",
            ColorPreset::OceanBlue => "from-blue-500 via-cyan-500 to-teal-500",
            ColorPreset::Sunset => "from-orange-400 via-red-500 to-pink-600",
            ColorPreset::Forest => "from-green-400 via-emerald-500 to-teal-600",
            ColorPreset::Royal => "from-purple-500 via-indigo-500 to-blue-600",
            ColorPreset::Fire => "from-red-500 via-orange-500 to-yellow-500",
        }
    }

    /// Applying a preset only sets the primary color.
    pub fn patch(self) -> ThemePatch {
        ThemePatch::default().primary_color(self.gradient())
    }
}

impl FontSize {
    pub fn pixels(self) -> &'static str {
        match self {
            FontSize::Sm => "14px",
            FontSize::Md => "16px",
            FontSize::Lg => "18px",
        }
    }
}

impl BorderRadius {
    pub fn pixels(self) -> &'static str {
        match self {
            BorderRadius::None => "0px",
            BorderRadius::Sm => "4px",
            BorderRadius::Md => "8px",
            BorderRadius::Lg => "12px",
            BorderRadius::Xl => "16px",
        }
    }
}

impl Default for FontSize {
    fn default() -> Self {
        FontSize::Md
    }
}

impl Default for BorderRadius {
    fn default() -> Self {
        BorderRadius::Lg
    }
}

impl Default for BackgroundPattern {
    fn default() -> Self {
        BackgroundPattern::None
    }
}

/// Visual presentation settings.
///
/// Serialized as a flat camelCase JSON object. Field order here is the
/// order of every export, which keeps exported files diff-friendly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub font_family: String,
    pub font_size: FontSize,
    pub border_radius: BorderRadius,
    pub background_pattern: BackgroundPattern,
    pub brand_name: String,
    pub logo_url: String,
    pub custom_css: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary_color: ColorPreset::ZeroPoint.gradient().to_string(),
            secondary_color: "from-blue-500 to-indigo-600".to_string(),
            accent_color: "from-pink-400 to-purple-500".to_string(),
            font_family: "Inter".to_string(),
            font_size: FontSize::default(),
            border_radius: BorderRadius::default(),
            background_pattern: BackgroundPattern::default(),
            brand_name: "Zero-Point.AI".to_string(),
            logo_url: "/LOGO.PNG".to_string(),
            custom_css: String::new(),
        }
    }
}

/// Partial update of a [`ThemeConfig`]. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<BorderRadius>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_pattern: Option<BackgroundPattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
}

fn overwrite<T>(slot: &mut T, value: &Option<T>)
where
    T: Clone,
{
    if let Some(value) = value {
        *slot = value.clone();
    }
}

impl ThemeConfig {
    /// Shallow merge: every field set in `patch` replaces the current value.
    pub fn merged(&self, patch: &ThemePatch) -> ThemeConfig {
        let mut next = self.clone();
        overwrite(&mut next.primary_color, &patch.primary_color);
        overwrite(&mut next.secondary_color, &patch.secondary_color);
        overwrite(&mut next.accent_color, &patch.accent_color);
        overwrite(&mut next.font_family, &patch.font_family);
        overwrite(&mut next.font_size, &patch.font_size);
        overwrite(&mut next.border_radius, &patch.border_radius);
        overwrite(&mut next.background_pattern, &patch.background_pattern);
        overwrite(&mut next.brand_name, &patch.brand_name);
        overwrite(&mut next.logo_url, &patch.logo_url);
        overwrite(&mut next.custom_css, &patch.custom_css);
        next
    }
}

impl ThemePatch {
    pub fn is_empty(&self) -> bool {
        *self == ThemePatch::default()
    }

    pub fn font_size(mut self, value: FontSize) -> Self {
        self.font_size = Some(value);
        self
    }

    pub fn border_radius(mut self, value: BorderRadius) -> Self {
        self.border_radius = Some(value);
        self
    }

    pub fn background_pattern(mut self, value: BackgroundPattern) -> Self {
        self.background_pattern = Some(value);
        self
    }

    pub fn brand_name(mut self, value: impl Into<String>) -> Self {
        self.brand_name = Some(value.into());
        self
    }

    pub fn primary_color(mut self, value: impl Into<String>) -> Self {
        self.primary_color = Some(value.into());
        self
    }

    pub fn font_family(mut self, value: impl Into<String>) -> Self {
        self.font_family = Some(value.into());
        self
    }

    pub fn custom_css(mut self, value: impl Into<String>) -> Self {
        self.custom_css = Some(value.into());
        self
    }
}

impl From<ThemeConfig> for ThemePatch {
    fn from(config: ThemeConfig) -> Self {
        Self {
            primary_color: Some(config.primary_color),
            secondary_color: Some(config.secondary_color),
            accent_color: Some(config.accent_color),
            font_family: Some(config.font_family),
            font_size: Some(config.font_size),
            border_radius: Some(config.border_radius),
            background_pattern: Some(config.background_pattern),
            brand_name: Some(config.brand_name),
            logo_url: Some(config.logo_url),
            custom_css: Some(config.custom_css),
        }
    }
}
