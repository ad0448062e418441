mod classic;
mod json;
mod links;
mod social;

pub use json::render_json;
pub use links::LinkOverlay;

use anyhow::Result;
use std::fmt;
use std::path::Path;

use crate::config::LinkMode;
use crate::ir::{Links, StyleId};
use crate::layout::{BadgeLayout, LogoPlacement};

/// Final output of one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedBadge {
    Svg(String),
    Json(String),
}

impl RenderedBadge {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Svg(body) | Self::Json(body) => body,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Svg(body) | Self::Json(body) => body,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Svg(_) => "image/svg+xml;charset=utf-8",
            Self::Json(_) => "application/json",
        }
    }
}

impl fmt::Display for RenderedBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn render_svg(layout: &BadgeLayout, links: &Links, link_mode: LinkMode) -> String {
    let overlay = LinkOverlay::new(links, link_mode);
    match layout.style {
        StyleId::Flat => classic::flat(layout, &overlay),
        StyleId::Plastic => classic::plastic(layout, &overlay),
        StyleId::FlatSquare | StyleId::ForTheBadge => classic::crisp(layout, &overlay),
        StyleId::Social => social::social(layout, &overlay),
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

fn svg_open(svg: &mut String, width: u32, height: u32) {
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{width}\" height=\"{height}\">"
    ));
}

fn logo_image(logo: &LogoPlacement) -> String {
    format!(
        "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" xlink:href=\"{}\"/>",
        logo.x,
        logo.y,
        logo.width,
        logo.height,
        escape_xml(&logo.href)
    )
}

/// Formats a ×10 fixed-point value as the shortest decimal (`535` → `53.5`).
fn tenths(value: u32) -> String {
    if value % 10 == 0 {
        (value / 10).to_string()
    } else {
        format!("{}.{}", value / 10, value % 10)
    }
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
