use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BadgeError;

/// The five badge templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StyleId {
    #[default]
    Flat,
    FlatSquare,
    Plastic,
    Social,
    ForTheBadge,
}

impl StyleId {
    pub const ALL: [StyleId; 5] = [
        StyleId::Flat,
        StyleId::FlatSquare,
        StyleId::Plastic,
        StyleId::Social,
        StyleId::ForTheBadge,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "flat" => Some(Self::Flat),
            "flat-square" => Some(Self::FlatSquare),
            "plastic" => Some(Self::Plastic),
            "social" => Some(Self::Social),
            "for-the-badge" => Some(Self::ForTheBadge),
            _ => None,
        }
    }

    /// Unknown names fall back to [`StyleId::Flat`] instead of failing the render.
    pub fn parse_or_default(token: &str) -> Self {
        token.parse().unwrap_or_else(|err: BadgeError| {
            tracing::warn!(%err, "falling back to flat style");
            Self::Flat
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::FlatSquare => "flat-square",
            Self::Plastic => "plastic",
            Self::Social => "social",
            Self::ForTheBadge => "for-the-badge",
        }
    }
}

impl FromStr for StyleId {
    type Err = BadgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| BadgeError::InvalidStyle {
            name: s.to_string(),
        })
    }
}

impl From<String> for StyleId {
    fn from(value: String) -> Self {
        Self::parse_or_default(&value)
    }
}

impl From<StyleId> for String {
    fn from(value: StyleId) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputFormat {
    #[default]
    Svg,
    Json,
}

impl OutputFormat {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "svg" => Some(Self::Svg),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = BadgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| BadgeError::InvalidFormat {
            name: s.to_string(),
        })
    }
}

impl From<String> for OutputFormat {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|err: BadgeError| {
            tracing::warn!(%err, "falling back to svg output");
            Self::Svg
        })
    }
}

impl From<OutputFormat> for String {
    fn from(value: OutputFormat) -> Self {
        value.as_str().to_string()
    }
}

/// Either a key into the named logo table or a payload to embed as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogoRef {
    Named(String),
    Inline(String),
}

impl LogoRef {
    pub fn from_token(token: &str) -> Self {
        let trimmed = token.trim();
        if trimmed.starts_with("data:") || trimmed.starts_with('<') {
            Self::Inline(trimmed.to_string())
        } else {
            Self::Named(trimmed.to_ascii_lowercase())
        }
    }
}

impl From<String> for LogoRef {
    fn from(value: String) -> Self {
        Self::from_token(&value)
    }
}

impl From<LogoRef> for String {
    fn from(value: LogoRef) -> Self {
        match value {
            LogoRef::Named(name) => name,
            LogoRef::Inline(payload) => payload,
        }
    }
}

/// Two anchor slots: index 0 belongs to the label segment, index 1 to the message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Option<String>>", into = "Vec<Option<String>>")]
pub struct Links {
    pub label: Option<String>,
    pub message: Option<String>,
}

impl Links {
    pub fn new(label: Option<&str>, message: Option<&str>) -> Self {
        let keep = |url: Option<&str>| {
            url.map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
        };
        Self {
            label: keep(label),
            message: keep(message),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.message.is_none()
    }
}

impl From<Vec<Option<String>>> for Links {
    fn from(value: Vec<Option<String>>) -> Self {
        let mut slots = value.into_iter();
        let label = slots.next().flatten();
        let message = slots.next().flatten();
        Self::new(label.as_deref(), message.as_deref())
    }
}

impl From<Links> for Vec<Option<String>> {
    fn from(value: Links) -> Self {
        vec![value.label, value.message]
    }
}

/// One badge request, as handed over by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeSpec {
    #[serde(default)]
    pub label: String,
    pub message: String,
    /// Message background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_color: Option<String>,
    #[serde(default)]
    pub style: StyleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<LogoRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_width: Option<u32>,
    /// Overrides the style's badge height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
    #[serde(default)]
    pub format: OutputFormat,
}

impl BadgeSpec {
    pub fn new(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            message: message.into(),
            color: None,
            label_color: None,
            style: StyleId::default(),
            logo: None,
            logo_color: None,
            logo_width: None,
            height: None,
            links: Links::default(),
            format: OutputFormat::default(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_label_color(mut self, color: impl Into<String>) -> Self {
        self.label_color = Some(color.into());
        self
    }

    pub fn with_style(mut self, style: StyleId) -> Self {
        self.style = style;
        self
    }

    pub fn with_logo(mut self, logo: LogoRef) -> Self {
        self.logo = Some(logo);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_links(mut self, links: Links) -> Self {
        self.links = links;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}
