//! Two-rectangle templates: flat, plastic, flat-square and for-the-badge.

use std::iter;

use crate::layout::{BadgeLayout, TextRun};
use crate::theme::TemplateGeometry;

use super::links::LinkOverlay;
use super::{escape_xml, logo_image, svg_open};

const FLAT_GRADIENT: &str = "<linearGradient id=\"s\" x2=\"0\" y2=\"100%\"><stop offset=\"0\" stop-color=\"#bbb\" stop-opacity=\".1\"/><stop offset=\"1\" stop-opacity=\".1\"/></linearGradient>";

// Double spaces are part of the published markup.
const PLASTIC_GRADIENT: &str = "<linearGradient id=\"s\" x2=\"0\" y2=\"100%\"><stop offset=\"0\"  stop-color=\"#fff\" stop-opacity=\".7\"/><stop offset=\".1\" stop-color=\"#aaa\" stop-opacity=\".1\"/><stop offset=\".9\" stop-color=\"#000\" stop-opacity=\".3\"/><stop offset=\"1\"  stop-color=\"#000\" stop-opacity=\".5\"/></linearGradient>";

const SHADOW_FILL: &str = "#010101";

pub(super) fn flat(layout: &BadgeLayout, overlay: &LinkOverlay<'_>) -> String {
    rounded(layout, FLAT_GRADIENT, overlay)
}

pub(super) fn plastic(layout: &BadgeLayout, overlay: &LinkOverlay<'_>) -> String {
    rounded(layout, PLASTIC_GRADIENT, overlay)
}

/// Gradient overlay clipped to a rounded rect.
fn rounded(layout: &BadgeLayout, gradient: &str, overlay: &LinkOverlay<'_>) -> String {
    let geometry = TemplateGeometry::for_style(layout.style);
    let (width, height) = (layout.width, layout.height);
    let rx = geometry.corner_radius.unwrap_or(0);

    let mut svg = String::new();
    svg_open(&mut svg, width, height);
    svg.push_str(gradient);
    svg.push_str(&format!(
        "<clipPath id=\"r\"><rect width=\"{width}\" height=\"{height}\" rx=\"{rx}\" fill=\"#fff\"/></clipPath>"
    ));
    svg.push_str("<g clip-path=\"url(#r)\">");
    push_segment_rects(&mut svg, layout);
    svg.push_str(&format!(
        "<rect width=\"{width}\" height=\"{height}\" fill=\"url(#s)\"/>"
    ));
    svg.push_str("</g>");
    push_text_group(&mut svg, layout, geometry);
    svg.push_str(&overlay.segment_anchors(layout));
    svg.push_str("</svg>");
    svg
}

/// Square corners, no gradient, single-pass text (flat-square, for-the-badge).
pub(super) fn crisp(layout: &BadgeLayout, overlay: &LinkOverlay<'_>) -> String {
    let geometry = TemplateGeometry::for_style(layout.style);
    let mut svg = String::new();
    svg_open(&mut svg, layout.width, layout.height);
    svg.push_str("<g shape-rendering=\"crispEdges\">");
    push_segment_rects(&mut svg, layout);
    svg.push_str("</g>");
    push_text_group(&mut svg, layout, geometry);
    svg.push_str(&overlay.segment_anchors(layout));
    svg.push_str("</svg>");
    svg
}

fn push_segment_rects(svg: &mut String, layout: &BadgeLayout) {
    let height = layout.height;
    svg.push_str(&format!(
        "<rect width=\"{}\" height=\"{height}\" fill=\"{}\"/>",
        layout.label.width, layout.colors.label
    ));
    svg.push_str(&format!(
        "<rect x=\"{}\" width=\"{}\" height=\"{height}\" fill=\"{}\"/>",
        layout.message.x, layout.message.width, layout.colors.message
    ));
}

fn push_text_group(svg: &mut String, layout: &BadgeLayout, geometry: &TemplateGeometry) {
    svg.push_str(&format!(
        "<g fill=\"#fff\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\">",
        geometry.label_font.family, geometry.font_size_basis
    ));
    if let Some(logo) = &layout.logo {
        svg.push_str(&logo_image(logo));
    }
    let runs = layout.label_text.iter().chain(iter::once(&layout.message_text));
    for run in runs {
        if let Some(shadow_y) = layout.shadow_baseline {
            svg.push_str(&text(run, shadow_y, true));
        }
        svg.push_str(&text(run, layout.baseline, false));
    }
    svg.push_str("</g>");
}

fn text(run: &TextRun, y: u32, shadow: bool) -> String {
    let shadow = if shadow {
        format!(" fill=\"{SHADOW_FILL}\" fill-opacity=\".3\"")
    } else {
        String::new()
    };
    let weight = if run.bold { " font-weight=\"bold\"" } else { "" };
    format!(
        "<text x=\"{}\" y=\"{y}\"{shadow}{weight} transform=\"scale(.1)\" textLength=\"{}\">{}</text>",
        run.x,
        run.text_length,
        escape_xml(&run.content)
    )
}
