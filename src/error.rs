/// Everything that can go wrong while turning a [`crate::BadgeSpec`] into output.
///
/// Only `Io`, `Json` and `FontLoad` ever escape the crate; the cosmetic
/// variants are produced by the resolvers and recovered by the renderer.
#[derive(Debug, thiserror::Error)]
pub enum BadgeError {
    #[error("invalid color: {token:?}")]
    InvalidColor { token: String },
    #[error("unknown logo: {name:?}")]
    UnknownLogo { name: String },
    #[error("invalid logo payload: {reason}")]
    InvalidLogo { reason: String },
    #[error("no font supplies a glyph for {ch:?}")]
    UnsupportedGlyph { ch: char },
    #[error("invalid style: {name:?}")]
    InvalidStyle { name: String },
    #[error("invalid output format: {name:?}")]
    InvalidFormat { name: String },
    #[error("failed to load font {font}: {reason}")]
    FontLoad { font: String, reason: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("badge spec JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BadgeError>;
