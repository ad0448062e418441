use serde::Serialize;

use crate::color::SegmentColors;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BadgeJson<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    label: &'a str,
    message: &'a str,
    color: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    label_color: Option<&'a str>,
}

/// Serializes the badge's text content and resolved colours.
///
/// `labelColor` only appears when the request supplied one.
pub fn render_json(
    label: &str,
    message: &str,
    colors: &SegmentColors,
    explicit_label_color: bool,
) -> String {
    let body = BadgeJson {
        label: label.trim(),
        message: message.trim(),
        color: &colors.message,
        label_color: explicit_label_color.then_some(colors.label.as_str()),
    };
    serde_json::to_string(&body).unwrap_or_else(|err| {
        tracing::warn!(%err, "badge json serialization failed");
        String::from("{}")
    })
}
