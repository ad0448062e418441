use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use crate::color;
use crate::error::{BadgeError, Result};
use crate::ir::LogoRef;

const SVG_DATA_PREFIX: &str = "data:image/svg+xml;base64,";

static DATA_URI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:image/(svg\+xml|png|jpeg|gif);base64,([A-Za-z0-9+/]+={0,2})$")
        .expect("valid data uri regex")
});

/// Built-in monochrome icons, drawn on a 14×14 grid with no fill of their own.
static NAMED_LOGOS: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        (
            "check",
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 14 14"><path d="M5.5 10.6 2.2 7.3l1.1-1.1 2.2 2.2 5.2-5.2 1.1 1.1z"/></svg>"#,
        ),
        (
            "clock",
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 14 14"><path d="M7 1a6 6 0 1 0 0 12A6 6 0 0 0 7 1zm0 1.5a4.5 4.5 0 1 1 0 9 4.5 4.5 0 0 1 0-9zM6.3 4v3.3l2.6 1.6.7-1.1-2-1.2V4z"/></svg>"#,
        ),
        (
            "cross",
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 14 14"><path d="m3.3 2.2 3.7 3.7 3.7-3.7 1.1 1.1L8.1 7l3.7 3.7-1.1 1.1L7 8.1l-3.7 3.7-1.1-1.1L5.9 7 2.2 3.3z"/></svg>"#,
        ),
        (
            "download",
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 14 14"><path d="M6.2 1h1.6v6.1l2.1-2.1 1.1 1.1L7 10.1 3 6.1l1.1-1.1 2.1 2.1zM2 11.5h10V13H2z"/></svg>"#,
        ),
        (
            "heart",
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 14 14"><path d="M7 12.5 1.9 7.4A3.1 3.1 0 0 1 7 3.3a3.1 3.1 0 0 1 5.1 4.1z"/></svg>"#,
        ),
        (
            "info",
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 14 14"><path d="M7 1a6 6 0 1 0 0 12A6 6 0 0 0 7 1zm-.8 2.6h1.6v1.6H6.2zm0 2.8h1.6v4H6.2z"/></svg>"#,
        ),
        (
            "lock",
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 14 14"><path d="M7 1a3 3 0 0 0-3 3v2H3v7h8V6h-1V4a3 3 0 0 0-3-3zm0 1.5A1.5 1.5 0 0 1 8.5 4v2h-3V4A1.5 1.5 0 0 1 7 2.5z"/></svg>"#,
        ),
        (
            "star",
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 14 14"><path d="m7 1 1.8 3.9 4.2.5-3.1 2.9.8 4.2L7 10.4l-3.7 2.1.8-4.2L1 5.4l4.2-.5z"/></svg>"#,
        ),
        (
            "tag",
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 14 14"><path d="M1 1h5.6L13 7.4 7.4 13 1 6.6zm2.8 1.6a1.2 1.2 0 1 0 0 2.4 1.2 1.2 0 0 0 0-2.4z"/></svg>"#,
        ),
        (
            "warning",
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 14 14"><path d="M7 1 .5 12.5h13zm-.8 4h1.6v4H6.2zm0 4.8h1.6v1.5H6.2z"/></svg>"#,
        ),
    ])
});

/// Names accepted as [`LogoRef::Named`], in sorted order.
pub fn named_logos() -> impl Iterator<Item = &'static str> {
    NAMED_LOGOS.keys().copied()
}

/// Turns a logo reference into an `xlink:href` value.
///
/// Named logos are looked up, optionally recoloured and base64-encoded.
/// Inline `data:` URIs must carry a supported image type and valid base64;
/// inline `<svg>` markup must parse. `logo_color` only applies to named logos.
pub fn embed_logo(logo: &LogoRef, logo_color: Option<&str>) -> Result<String> {
    match logo {
        LogoRef::Named(name) => {
            let svg = NAMED_LOGOS
                .get(name.as_str())
                .ok_or_else(|| BadgeError::UnknownLogo { name: name.clone() })?;
            let svg = match logo_color.map(color::resolve).transpose() {
                Ok(Some(fill)) => recolor(svg, &fill)?,
                Ok(None) => (*svg).to_string(),
                Err(err) => {
                    tracing::warn!(%err, logo = %name, "keeping logo's own colour");
                    (*svg).to_string()
                }
            };
            Ok(svg_data_uri(&svg))
        }
        LogoRef::Inline(payload) if payload.starts_with("data:") => {
            validate_data_uri(payload)?;
            Ok(payload.clone())
        }
        LogoRef::Inline(markup) => {
            validate_svg_markup(markup)?;
            Ok(svg_data_uri(markup))
        }
    }
}

fn svg_data_uri(svg: &str) -> String {
    format!("{SVG_DATA_PREFIX}{}", BASE64_STANDARD.encode(svg))
}

fn validate_data_uri(uri: &str) -> Result<()> {
    let caps = DATA_URI_RE.captures(uri).ok_or_else(|| BadgeError::InvalidLogo {
        reason: "expected data:image/{svg+xml,png,jpeg,gif};base64,…".to_string(),
    })?;
    BASE64_STANDARD
        .decode(&caps[2])
        .map_err(|err| BadgeError::InvalidLogo {
            reason: format!("bad base64 payload: {err}"),
        })?;
    Ok(())
}

fn validate_svg_markup(markup: &str) -> Result<()> {
    let doc = roxmltree::Document::parse(markup).map_err(|err| BadgeError::InvalidLogo {
        reason: format!("unparseable svg: {err}"),
    })?;
    if doc.root_element().tag_name().name() != "svg" {
        return Err(BadgeError::InvalidLogo {
            reason: format!(
                "root element is <{}>, expected <svg>",
                doc.root_element().tag_name().name()
            ),
        });
    }
    Ok(())
}

/// Writes `fill` onto the root `<svg>` element.
fn recolor(svg: &str, fill: &str) -> Result<String> {
    let doc = roxmltree::Document::parse(svg).map_err(|err| BadgeError::InvalidLogo {
        reason: format!("unparseable svg: {err}"),
    })?;
    let root = doc.root_element();
    // Insert right after the tag name so existing attributes stay untouched.
    let insert_at = root.range().start + "<svg".len();
    let mut out = String::with_capacity(svg.len() + fill.len() + 8);
    out.push_str(&svg[..insert_at]);
    out.push_str(&format!(" fill=\"{}\"", crate::render::escape_xml(fill)));
    out.push_str(&svg[insert_at..]);
    Ok(out)
}
