use std::fs;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::DEFAULT_THEME;

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_correct: String,
    pub text_incorrect: String,
    pub text_incorrect_bg: String,
    pub text_pending: String,
    pub text_cursor_bg: String,
    pub text_cursor_fg: String,
    pub accent: String,
    pub accent_dim: String,
    pub border: String,
    pub header_bg: String,
    pub header_fg: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

fn user_themes_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("keysprint").join("themes"))
}

fn parse_theme(content: &str) -> Option<Theme> {
    toml::from_str::<Theme>(content).ok()
}

impl Theme {
    /// Looks up a theme by tag, preferring a user file over the bundled one.
    pub fn load(name: &str) -> Option<Self> {
        Self::load_from(user_themes_dir().as_deref(), name)
    }

    /// Tags of every theme the selector can offer, sorted.
    pub fn available_themes() -> Vec<String> {
        Self::available_in(user_themes_dir().as_deref())
    }

    /// The tag after `current` in `available_themes`, wrapping around.
    pub fn next_after(current: &str) -> Option<String> {
        Self::next_after_in(user_themes_dir().as_deref(), current)
    }

    pub fn load_from(user_dir: Option<&Path>, name: &str) -> Option<Self> {
        if let Some(dir) = user_dir {
            if let Ok(content) = fs::read_to_string(dir.join(format!("{name}.toml"))) {
                if let Some(theme) = parse_theme(&content) {
                    return Some(theme);
                }
            }
        }

        let file = ThemeAssets::get(&format!("{name}.toml"))?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        parse_theme(content)
    }

    /// Bundled tags plus the user files in `user_dir` that parse. A broken
    /// user file is skipped so the selector never offers a tag it can't load.
    pub fn available_in(user_dir: Option<&Path>) -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect();

        if let Some(dir) = user_dir {
            if let Ok(entries) = fs::read_dir(dir) {
                for entry in entries.filter_map(|e| e.ok()) {
                    let file_name = entry.file_name().to_string_lossy().to_string();
                    let Some(name) = file_name.strip_suffix(".toml") else {
                        continue;
                    };
                    let parses = fs::read_to_string(entry.path())
                        .ok()
                        .and_then(|content| parse_theme(&content))
                        .is_some();
                    if parses {
                        names.push(name.to_string());
                    } else {
                        warn!(theme = name, "skipping unreadable user theme");
                    }
                }
            }
        }

        names.sort();
        names.dedup();
        names
    }

    pub fn next_after_in(user_dir: Option<&Path>, current: &str) -> Option<String> {
        let themes = Self::available_in(user_dir);
        match themes.iter().position(|t| t == current) {
            Some(idx) => themes.get((idx + 1) % themes.len()).cloned(),
            None => themes.first().cloned(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#0b0f1a".to_string(),
            fg: "#d6e2ff".to_string(),
            text_correct: "#39ff14".to_string(),
            text_incorrect: "#ff2e63".to_string(),
            text_incorrect_bg: "#3a0d1c".to_string(),
            text_pending: "#5c6b8a".to_string(),
            text_cursor_bg: "#00e5ff".to_string(),
            text_cursor_fg: "#0b0f1a".to_string(),
            accent: "#00e5ff".to_string(),
            accent_dim: "#1b2a4a".to_string(),
            border: "#1b2a4a".to_string(),
            header_bg: "#121a2e".to_string(),
            header_fg: "#d6e2ff".to_string(),
            error: "#ff2e63".to_string(),
            warning: "#ffd319".to_string(),
            success: "#39ff14".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn text_correct(&self) -> Color { Self::parse_color(&self.text_correct) }
    pub fn text_incorrect(&self) -> Color { Self::parse_color(&self.text_incorrect) }
    pub fn text_incorrect_bg(&self) -> Color { Self::parse_color(&self.text_incorrect_bg) }
    pub fn text_pending(&self) -> Color { Self::parse_color(&self.text_pending) }
    pub fn text_cursor_bg(&self) -> Color { Self::parse_color(&self.text_cursor_bg) }
    pub fn text_cursor_fg(&self) -> Color { Self::parse_color(&self.text_cursor_fg) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn accent_dim(&self) -> Color { Self::parse_color(&self.accent_dim) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
}
