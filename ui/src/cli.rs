use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use zeropoint::theme::{BackgroundPattern, BorderRadius, ColorPreset, FontSize, ThemePatch};

#[derive(Parser, Debug)]
#[command(
    name = "zeropoint",
    version,
    about = "Theme and session manager for the Zero-Point dashboard"
)]
pub struct Cli {
    /// Configuration file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the storage directory
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inspect and change the theme
    #[command(subcommand)]
    Theme(ThemeCommand),
    /// Sign in, sign up and sign out
    #[command(subcommand)]
    Auth(AuthCommand),
    /// Show which view a path resolves to for the current session
    Route {
        /// Path such as /dashboard or /signin
        path: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommand {
    /// Print the active theme as JSON
    Show,
    /// Change one or more theme fields
    Set(ThemeSetArgs),
    /// List the named primary color presets
    Presets,
    /// Restore the default theme
    Reset,
    /// Write the active theme to zero-point-theme.json
    Export {
        /// Target directory (defaults to the working directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Activate a theme from an exported file
    Import {
        file: PathBuf,
    },
    /// Print the generated stylesheet
    Css,
}

#[derive(Args, Debug, Default)]
pub struct ThemeSetArgs {
    /// Gradient token list, e.g. "from-orange-500 via-pink-500 to-purple-600"
    #[arg(long)]
    pub primary_color: Option<String>,
    /// Named primary gradient: zero-point, ocean-blue, sunset, forest, royal or fire
    #[arg(long, conflicts_with = "primary_color")]
    pub preset: Option<ColorPreset>,
    #[arg(long)]
    pub secondary_color: Option<String>,
    #[arg(long)]
    pub accent_color: Option<String>,
    #[arg(long)]
    pub font_family: Option<String>,
    /// sm, md or lg
    #[arg(long)]
    pub font_size: Option<FontSize>,
    /// none, sm, md, lg or xl
    #[arg(long)]
    pub border_radius: Option<BorderRadius>,
    /// none, dots, grid or waves
    #[arg(long)]
    pub background_pattern: Option<BackgroundPattern>,
    #[arg(long)]
    pub brand_name: Option<String>,
    #[arg(long)]
    pub logo_url: Option<String>,
    /// Raw CSS appended after the generated rules
    #[arg(long)]
    pub custom_css: Option<String>,
}

impl ThemeSetArgs {
    pub fn into_patch(self) -> ThemePatch {
        let primary_color = self
            .preset
            .map(|preset| preset.gradient().to_string())
            .or(self.primary_color);
        ThemePatch {
            primary_color,
            secondary_color: self.secondary_color,
            accent_color: self.accent_color,
            font_family: self.font_family,
            font_size: self.font_size,
            border_radius: self.border_radius,
            background_pattern: self.background_pattern,
            brand_name: self.brand_name,
            logo_url: self.logo_url,
            custom_css: self.custom_css,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Show the current session
    Status,
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    SignUp {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Full name shown in the dashboard
        #[arg(long)]
        name: String,
    },
    SignOut,
}
