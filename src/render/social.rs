//! GitHub-style button plus speech-bubble counter.

use crate::layout::{BadgeLayout, TextRun};
use crate::theme::TemplateGeometry;

use super::links::{LinkOverlay, wrap};
use super::{escape_xml, logo_image, svg_open, tenths};

const HOVER_STYLE: &str = "<style>a #llink:hover{fill:url(#b);stroke:#ccc}a #rlink:hover{fill:#4183c4}</style>";
const GRADIENTS: &str = "<linearGradient id=\"a\" x2=\"0\" y2=\"100%\"><stop offset=\"0\" stop-color=\"#fcfcfc\" stop-opacity=\"0\"/><stop offset=\"1\" stop-opacity=\".1\"/></linearGradient><linearGradient id=\"b\" x2=\"0\" y2=\"100%\"><stop offset=\"0\" stop-color=\"#ccc\" stop-opacity=\".1\"/><stop offset=\"1\" stop-opacity=\".1\"/></linearGradient>";

pub(super) fn social(layout: &BadgeLayout, overlay: &LinkOverlay<'_>) -> String {
    let geometry = TemplateGeometry::for_style(layout.style);
    let box_height = layout.height.saturating_sub(1);
    let label_width = layout.label.width;
    let radius = geometry.corner_radius.unwrap_or(0);
    // Bubble sits 1.5px into the message segment; its tail points back at the button.
    let bubble_x = tenths(layout.message.x * 10 + 15);
    let divider_x = tenths(layout.message.x * 10 + 10);
    // Notch is centred vertically: 5px divider, 7px pointer.
    let divider_y = tenths((layout.height * 5).saturating_sub(25));
    let notch_y = tenths((layout.height * 5).saturating_sub(35));

    let mut svg = String::new();
    svg_open(&mut svg, layout.width, layout.height);
    svg.push_str(HOVER_STYLE);
    svg.push_str(GRADIENTS);
    svg.push_str("<g stroke=\"#d5d5d5\">");
    svg.push_str(&format!(
        "<rect stroke=\"none\" fill=\"#fcfcfc\" x=\"0.5\" y=\"0.5\" width=\"{label_width}\" height=\"{box_height}\" rx=\"{radius}\"/>"
    ));
    svg.push_str(&format!(
        "<rect x=\"{bubble_x}\" y=\"0.5\" width=\"{}\" height=\"{box_height}\" rx=\"{radius}\" fill=\"#fafafa\"/>",
        layout.message.width.saturating_sub(2)
    ));
    svg.push_str(&format!(
        "<rect x=\"{divider_x}\" y=\"{divider_y}\" width=\"0.5\" height=\"5\" stroke=\"#fafafa\"/>"
    ));
    svg.push_str(&format!(
        "<path d=\"M{bubble_x} {notch_y} l-3 3v1 l3 3\" stroke=\"d5d5d5\" fill=\"#fafafa\"/>"
    ));
    svg.push_str("</g>");
    if let Some(logo) = &layout.logo {
        svg.push_str(&logo_image(logo));
    }

    svg.push_str(&format!(
        "<g fill=\"#333\" text-anchor=\"middle\" font-family=\"{}\" font-weight=\"700\" font-size=\"{}px\" line-height=\"14px\">",
        geometry.label_font.family, geometry.font_size_basis
    ));
    let shadow_y = layout.shadow_baseline.unwrap_or(layout.baseline);
    if let Some(label) = &layout.label_text {
        svg.push_str(&text(label, shadow_y, Some("fill=\"#fff\"")));
        svg.push_str(&text(label, layout.baseline, None));
    }
    svg.push_str(&text(&layout.message_text, shadow_y, Some("fill=\"#fff\"")));
    svg.push_str(&wrap(
        overlay.social_message_target(),
        &text_with_id(&layout.message_text, layout.baseline, "rlink"),
    ));
    svg.push_str("</g>");

    svg.push_str(&wrap(
        overlay.social_label_target(),
        &format!(
            "<rect id=\"llink\" stroke=\"#d5d5d5\" fill=\"url(#a)\" x=\".5\" y=\".5\" width=\"{label_width}\" height=\"{box_height}\" rx=\"{radius}\" />"
        ),
    ));
    svg.push_str("</svg>");
    svg
}

fn text(run: &TextRun, y: u32, extra: Option<&str>) -> String {
    let extra = extra.map(|attr| format!(" {attr}")).unwrap_or_default();
    format!(
        "<text x=\"{}\" y=\"{y}\"{extra} transform=\"scale(.1)\" textLength=\"{}\">{}</text>",
        run.x,
        run.text_length,
        escape_xml(&run.content)
    )
}

fn text_with_id(run: &TextRun, y: u32, id: &str) -> String {
    format!(
        "<text id=\"{id}\" x=\"{}\" y=\"{y}\" transform=\"scale(.1)\" textLength=\"{}\">{}</text>",
        run.x,
        run.text_length,
        escape_xml(&run.content)
    )
}
