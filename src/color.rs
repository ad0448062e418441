use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::config::BadgeDefaults;
use crate::error::{BadgeError, Result};

pub const DEFAULT_LABEL_COLOR: &str = "#555";
pub const DEFAULT_MESSAGE_COLOR: &str = "#4c1";
pub const NEUTRAL_COLOR: &str = "#9f9f9f";

static PALETTE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("brightgreen", "#4c1"),
        ("green", "#97ca00"),
        ("yellow", "#dfb317"),
        ("yellowgreen", "#a4a61d"),
        ("orange", "#fe7d37"),
        ("red", "#e05d44"),
        ("blue", "#007ec6"),
        ("grey", "#555"),
        ("gray", "#555"),
        ("lightgrey", "#9f9f9f"),
        ("lightgray", "#9f9f9f"),
        // semantic aliases
        ("success", "#4c1"),
        ("important", "#fe7d37"),
        ("critical", "#e05d44"),
        ("informational", "#007ec6"),
        ("inactive", "#9f9f9f"),
    ])
});

static HEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex regex"));
static RGB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^rgba?\(\s*\d{1,3}%?\s*,\s*\d{1,3}%?\s*,\s*\d{1,3}%?\s*(,\s*(0|1|0?\.\d+)\s*)?\)$",
    )
    .expect("valid rgb regex")
});
static HSL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^hsla?\(\s*\d{1,3}(deg)?\s*,\s*\d{1,3}%\s*,\s*\d{1,3}%\s*(,\s*(0|1|0?\.\d+)\s*)?\)$",
    )
    .expect("valid hsl regex")
});

static CSS_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
        "blanchedalmond", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
        "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
        "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
        "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
        "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
        "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue",
        "firebrick", "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold",
        "goldenrod", "greenyellow", "honeydew", "hotpink", "indianred", "indigo", "ivory",
        "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
        "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgreen", "lightpink",
        "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray", "lightslategrey",
        "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta", "maroon",
        "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple", "mediumseagreen",
        "mediumslateblue", "mediumspringgreen", "mediumturquoise", "mediumvioletred",
        "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite", "navy", "oldlace",
        "olive", "olivedrab", "orangered", "orchid", "palegoldenrod", "palegreen",
        "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink", "plum",
        "powderblue", "purple", "rebeccapurple", "rosybrown", "royalblue", "saddlebrown",
        "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver", "skyblue",
        "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan", "teal",
        "thistle", "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke",
    ]
    .into_iter()
    .collect()
});

/// Maps a colour token to the string written into `fill` attributes.
///
/// Palette names win over CSS keywords (`green` is `#97ca00`, not `#008000`).
/// Bare hex digits gain a leading `#`; functional forms pass through trimmed.
pub fn resolve(token: &str) -> Result<String> {
    let trimmed = token.trim();
    let lower = trimmed.to_ascii_lowercase();
    if let Some(hex) = PALETTE.get(lower.as_str()) {
        return Ok((*hex).to_string());
    }
    if HEX_RE.is_match(trimmed) {
        return Ok(if trimmed.starts_with('#') {
            trimmed.to_string()
        } else {
            format!("#{trimmed}")
        });
    }
    if RGB_RE.is_match(&lower) || HSL_RE.is_match(&lower) {
        return Ok(trimmed.to_string());
    }
    if CSS_KEYWORDS.contains(lower.as_str()) {
        return Ok(lower);
    }
    Err(BadgeError::InvalidColor {
        token: token.to_string(),
    })
}

/// Resolved background colours for both segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentColors {
    pub label: String,
    pub message: String,
}

/// Resolves the label/message pair, substituting defaults for missing or bad tokens.
///
/// An absent label colour means the neutral dark gray when a label is shown,
/// and the message colour when it is not (the collapsed label rect then
/// carries no colour of its own).
pub fn resolve_segment_colors(
    label_color: Option<&str>,
    message_color: Option<&str>,
    has_label: bool,
    defaults: &BadgeDefaults,
) -> SegmentColors {
    let message = match message_color {
        Some(token) => resolve(token).unwrap_or_else(|err| {
            tracing::warn!(%err, "substituting neutral message color");
            defaults.invalid_color.clone()
        }),
        None => defaults.message_color.clone(),
    };
    let label = match label_color {
        Some(token) => resolve(token).unwrap_or_else(|err| {
            tracing::warn!(%err, "substituting default label color");
            defaults.label_color.clone()
        }),
        None if has_label => defaults.label_color.clone(),
        None => message.clone(),
    };
    SegmentColors { label, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_palette_names_case_insensitively() {
        assert_eq!(resolve("brightgreen").unwrap(), "#4c1");
        assert_eq!(resolve("LightGray").unwrap(), "#9f9f9f");
        assert_eq!(resolve("critical").unwrap(), "#e05d44");
    }

    #[test]
    fn palette_shadows_css_keywords() {
        assert_eq!(resolve("green").unwrap(), "#97ca00");
        assert_eq!(resolve("papayawhip").unwrap(), "papayawhip");
    }

    #[test]
    fn hex_gets_a_hash_prefix() {
        assert_eq!(resolve("4c1").unwrap(), "#4c1");
        assert_eq!(resolve("#B3E").unwrap(), "#B3E");
        assert_eq!(resolve("abcdef").unwrap(), "#abcdef");
        assert!(resolve("abcd").is_err());
    }

    #[test]
    fn functional_forms_pass_through() {
        assert_eq!(resolve("rgb(0, 128, 255)").unwrap(), "rgb(0, 128, 255)");
        assert_eq!(resolve("rgba(0,0,0,.5)").unwrap(), "rgba(0,0,0,.5)");
        assert_eq!(resolve("hsl(120deg, 50%, 50%)").unwrap(), "hsl(120deg, 50%, 50%)");
        assert!(resolve("rgb(1,2)").is_err());
    }

    #[test]
    fn unknown_tokens_are_invalid() {
        assert!(matches!(
            resolve("not-a-color"),
            Err(BadgeError::InvalidColor { .. })
        ));
        assert!(resolve("\"><script>").is_err());
    }

    #[test]
    fn label_side_defaults_to_neutral_when_label_present() {
        let colors = resolve_segment_colors(None, Some("blue"), true, &BadgeDefaults::default());
        assert_eq!(colors.label, DEFAULT_LABEL_COLOR);
        assert_eq!(colors.message, "#007ec6");
    }

    #[test]
    fn missing_label_reuses_message_color() {
        let colors = resolve_segment_colors(None, Some("#b3e"), false, &BadgeDefaults::default());
        assert_eq!(colors.label, "#b3e");
    }

    #[test]
    fn invalid_tokens_fall_back_per_slot() {
        let colors =
            resolve_segment_colors(Some("bogus"), Some("bogus"), true, &BadgeDefaults::default());
        assert_eq!(colors.label, DEFAULT_LABEL_COLOR);
        assert_eq!(colors.message, NEUTRAL_COLOR);
    }

    #[test]
    fn absent_message_color_is_bright_green() {
        let colors = resolve_segment_colors(None, None, true, &BadgeDefaults::default());
        assert_eq!(colors.message, DEFAULT_MESSAGE_COLOR);
    }
}
