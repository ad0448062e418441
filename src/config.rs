use crate::color::{DEFAULT_LABEL_COLOR, DEFAULT_MESSAGE_COLOR, NEUTRAL_COLOR};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_PRIMARY_FAMILY: &str = "Verdana";
const DEFAULT_FALLBACK_FAMILY: &str = "DejaVu Sans";
const DEFAULT_CACHE_CAPACITY: usize = 16_384;
const DEFAULT_LOGO_WIDTH: u32 = 14;

/// How anchors over the badge segments are serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    /// Byte-compatible with the published badges: label/message anchor rects
    /// carry `width="NaN"` / `width="undefined"`, and the social style swaps
    /// the two slots.
    #[default]
    Legacy,
    /// Anchor rects carry the real segment geometry and slot order is always
    /// label first.
    Corrected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    pub fast_text_metrics: bool,
    pub cache_capacity: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            fast_text_metrics: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    pub primary_path: Option<PathBuf>,
    pub fallback_path: Option<PathBuf>,
    pub primary_family: String,
    pub fallback_family: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            primary_path: None,
            fallback_path: None,
            primary_family: DEFAULT_PRIMARY_FAMILY.to_string(),
            fallback_family: DEFAULT_FALLBACK_FAMILY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeDefaults {
    pub label_color: String,
    pub message_color: String,
    /// Substituted when a supplied message colour does not resolve.
    pub invalid_color: String,
    pub logo_width: u32,
    pub link_mode: LinkMode,
}

impl Default for BadgeDefaults {
    fn default() -> Self {
        Self {
            label_color: DEFAULT_LABEL_COLOR.to_string(),
            message_color: DEFAULT_MESSAGE_COLOR.to_string(),
            invalid_color: NEUTRAL_COLOR.to_string(),
            logo_width: DEFAULT_LOGO_WIDTH,
            link_mode: LinkMode::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub text: TextConfig,
    pub fonts: FontConfig,
    pub badge: BadgeDefaults,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct TextConfigFile {
    fast_text_metrics: Option<bool>,
    cache_capacity: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct FontConfigFile {
    primary_path: Option<PathBuf>,
    fallback_path: Option<PathBuf>,
    primary_family: Option<String>,
    fallback_family: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct BadgeConfigFile {
    label_color: Option<String>,
    message_color: Option<String>,
    invalid_color: Option<String>,
    logo_width: Option<u32>,
    link_mode: Option<LinkMode>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    text: Option<TextConfigFile>,
    fonts: Option<FontConfigFile>,
    badge: Option<BadgeConfigFile>,
}

/// Loads a JSON (or JSON5) config file on top of [`Config::default`].
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = json5::from_str(contents)?;
    let mut config = Config::default();

    if let Some(text) = parsed.text {
        if let Some(v) = text.fast_text_metrics {
            config.text.fast_text_metrics = v;
        }
        if let Some(v) = text.cache_capacity {
            config.text.cache_capacity = v;
        }
    }

    if let Some(fonts) = parsed.fonts {
        if fonts.primary_path.is_some() {
            config.fonts.primary_path = fonts.primary_path;
        }
        if fonts.fallback_path.is_some() {
            config.fonts.fallback_path = fonts.fallback_path;
        }
        if let Some(v) = fonts.primary_family {
            config.fonts.primary_family = v;
        }
        if let Some(v) = fonts.fallback_family {
            config.fonts.fallback_family = v;
        }
    }

    if let Some(badge) = parsed.badge {
        if let Some(v) = badge.label_color {
            config.badge.label_color = resolve_default(&v)?;
        }
        if let Some(v) = badge.message_color {
            config.badge.message_color = resolve_default(&v)?;
        }
        if let Some(v) = badge.invalid_color {
            config.badge.invalid_color = resolve_default(&v)?;
        }
        if let Some(v) = badge.logo_width {
            config.badge.logo_width = v;
        }
        if let Some(v) = badge.link_mode {
            config.badge.link_mode = v;
        }
    }

    Ok(config)
}

// An unresolvable default is a config error.
fn resolve_default(token: &str) -> anyhow::Result<String> {
    crate::color::resolve(token).map_err(|err| anyhow::anyhow!("config: {err}"))
}
