pub mod text;
mod types;

pub use text::FastTextMeasurer;
pub use types::{BadgeLayout, LayoutInput, LogoPlacement, Segment, TextRun};

use crate::text_metrics::{FontSpec, FontWeight, TextMeasurer};
use crate::theme::{
    EmptyLabel, LOGO_HEIGHT, LOGO_PADDING, LOGO_SOLO_PADDING, MAX_LOGO_WIDTH, TemplateGeometry,
    logo_y,
};

/// Upper bound on one run's pixel width; keeps ×10 coordinates inside `u32`.
const MAX_TEXT_WIDTH: u32 = 1_000_000;

/// Rounds a measured width onto the pixel grid.
///
/// With `odd` set, even results are bumped to the next odd value so that a
/// centred run starts on a whole pixel; an empty run therefore still takes 1px.
pub fn pixel_text_width(measured: f32, odd: bool) -> u32 {
    let rounded = (measured.max(0.0).round() as u32).min(MAX_TEXT_WIDTH);
    if odd && rounded % 2 == 0 {
        rounded + 1
    } else {
        rounded
    }
}

/// Trims surrounding whitespace and applies the style's case transform.
pub fn prepare_text(raw: &str, geometry: &TemplateGeometry) -> String {
    let trimmed = raw.trim();
    if geometry.uppercase {
        trimmed.to_uppercase()
    } else {
        trimmed.to_string()
    }
}

/// Measured width of `text` plus the style's per-character tracking.
fn spaced_width(
    measurer: &dyn TextMeasurer,
    text: &str,
    font: &FontSpec,
    geometry: &TemplateGeometry,
) -> f32 {
    let width = measurer.measure(text, font);
    if geometry.letter_spacing == 0.0 {
        return width;
    }
    width + geometry.letter_spacing * text.chars().filter(|ch| !ch.is_control()).count() as f32
}

pub fn compute_layout(input: LayoutInput<'_>, measurer: &dyn TextMeasurer) -> BadgeLayout {
    let geometry = TemplateGeometry::for_style(input.style);
    let label = prepare_text(input.label, geometry);
    let message = prepare_text(input.message, geometry);
    let has_label = !label.is_empty();
    let has_logo = input.logo_href.is_some();

    let label_width = pixel_text_width(
        spaced_width(measurer, &label, &geometry.label_font, geometry),
        geometry.odd_text_widths,
    );
    let message_width = pixel_text_width(
        spaced_width(measurer, &message, &geometry.message_font, geometry),
        geometry.odd_text_widths,
    );

    let padding = 2 * geometry.horizontal_padding;
    let logo_width = if has_logo {
        input.logo_width.min(MAX_LOGO_WIDTH)
    } else {
        0
    };
    let logo_padding = if has_logo && has_label { LOGO_PADDING } else { 0 };
    let solo_logo = if has_logo {
        logo_width + LOGO_SOLO_PADDING
    } else {
        0
    };
    let message_text_width = message_width + padding;

    // `logo_lead` is logo room that sits inside the message segment.
    let (label_segment, logo_lead) = match (has_label, geometry.empty_label) {
        (true, _) | (false, EmptyLabel::Keep) => {
            (label_width + padding + logo_width + logo_padding, 0)
        }
        (false, EmptyLabel::Collapse) => (0, solo_logo),
        (false, EmptyLabel::LogoOnly) => (solo_logo, 0),
    };
    let draws_label = has_label || geometry.empty_label == EmptyLabel::Keep;
    let nudge = if geometry.nudge_towards_divider && has_label {
        10
    } else {
        0
    };

    let label_text = draws_label.then(|| TextRun {
        x: (label_segment + logo_width + logo_padding) * 5 + nudge,
        text_length: label_width * 10,
        bold: geometry.label_font.weight == FontWeight::Bold,
        content: label,
    });

    let message_start = label_segment + geometry.segment_gap;
    let message_text = TextRun {
        x: (message_start + logo_lead) * 10 + message_text_width * 5 - nudge,
        text_length: message_width * 10,
        bold: geometry.message_font.weight == FontWeight::Bold,
        content: message,
    };

    let label = Segment {
        x: 0,
        width: label_segment,
    };
    let message = Segment {
        x: message_start,
        width: message_text_width + logo_lead,
    };

    let height = geometry.resolve_height(input.height_override);
    let (baseline, shadow_baseline) = geometry.baselines(height);
    let logo = input.logo_href.map(|href| LogoPlacement {
        href,
        x: geometry.logo_x,
        y: logo_y(height),
        width: logo_width,
        height: LOGO_HEIGHT,
    });

    BadgeLayout {
        style: input.style,
        width: message.end(),
        height,
        baseline,
        shadow_baseline,
        label,
        message,
        colors: input.colors,
        label_text,
        message_text,
        logo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::SegmentColors;
    use crate::ir::StyleId;
    use crate::text_metrics::FontSpec;

    /// Measures every character as 5px, so widths are predictable.
    struct FixedWidth;

    impl TextMeasurer for FixedWidth {
        fn measure(&self, text: &str, _font: &FontSpec) -> f32 {
            text.chars().count() as f32 * 5.0
        }
    }

    fn input<'a>(style: StyleId, label: &'a str, message: &'a str) -> LayoutInput<'a> {
        LayoutInput {
            style,
            label,
            message,
            colors: SegmentColors {
                label: "#555".to_string(),
                message: "#4c1".to_string(),
            },
            logo_href: None,
            logo_width: 14,
            height_override: None,
        }
    }

    fn with_logo(mut input: LayoutInput<'_>) -> LayoutInput<'_> {
        input.logo_href = Some("data:image/svg+xml;base64,PHN2Zz4=".to_string());
        input
    }

    #[test]
    fn pixel_width_bumps_even_values_to_odd() {
        assert_eq!(pixel_text_width(33.94, true), 35);
        assert_eq!(pixel_text_width(35.09, true), 35);
        assert_eq!(pixel_text_width(0.0, true), 1);
        assert_eq!(pixel_text_width(33.94, false), 34);
    }

    #[test]
    fn flat_segments_are_text_plus_padding() {
        // "build" 25px, "passing" 35px
        let layout = compute_layout(input(StyleId::Flat, "build", "passing"), &FixedWidth);
        assert_eq!(layout.label, Segment { x: 0, width: 35 });
        assert_eq!(layout.message, Segment { x: 35, width: 45 });
        assert_eq!(layout.width, 80);
        assert_eq!(layout.height, 20);
        let label = layout.label_text.expect("label run");
        assert_eq!(label.x, 185);
        assert_eq!(label.text_length, 250);
        assert_eq!(layout.message_text.x, 565);
    }

    #[test]
    fn logo_widens_label_segment() {
        let layout = compute_layout(with_logo(input(StyleId::Flat, "build", "ok")), &FixedWidth);
        assert_eq!(layout.label.width, 25 + 10 + 14 + 3);
        let logo = layout.logo.expect("logo");
        assert_eq!((logo.x, logo.y, logo.width, logo.height), (5, 3, 14, 14));
    }

    #[test]
    fn empty_label_collapses_in_flat_family() {
        for style in [StyleId::Flat, StyleId::FlatSquare, StyleId::Plastic] {
            let layout = compute_layout(input(style, "  ", "passing"), &FixedWidth);
            assert_eq!(layout.label.width, 0, "{style}");
            assert!(layout.label_text.is_none(), "{style}");
            assert_eq!(layout.width, layout.message.width, "{style}");
            assert_eq!(layout.message_text.x, 225, "{style}");
        }
    }

    #[test]
    fn collapsed_label_moves_logo_into_message_segment() {
        let layout = compute_layout(with_logo(input(StyleId::Flat, "", "passing")), &FixedWidth);
        assert_eq!(layout.label.width, 0);
        assert_eq!(layout.message.width, 45 + 18);
        assert_eq!(layout.message_text.x, 180 + 225);
    }

    #[test]
    fn social_keeps_a_one_pixel_label_run() {
        let layout = compute_layout(input(StyleId::Social, "", "passing"), &FixedWidth);
        assert_eq!(layout.label.width, 11);
        let label = layout.label_text.expect("social always draws the label run");
        assert_eq!(label.content, "");
        assert_eq!(label.text_length, 10);
        assert_eq!(layout.message.x, 16);
        assert_eq!(layout.width, 11 + 5 + 45);
    }

    #[test]
    fn for_the_badge_upper_cases_and_skips_the_odd_bump() {
        // 10px of glyphs plus 1.5px tracking per character
        let layout = compute_layout(input(StyleId::ForTheBadge, "ab", "cd"), &FixedWidth);
        let label = layout.label_text.expect("label run");
        assert_eq!(label.content, "AB");
        assert_eq!(label.text_length, 130);
        assert!(layout.message_text.bold);
        assert_eq!(layout.label.width, 13 + 24);
        assert_eq!(layout.height, 28);
    }

    #[test]
    fn tracking_only_applies_to_for_the_badge() {
        let flat = compute_layout(input(StyleId::Flat, "abcd", "x"), &FixedWidth);
        assert_eq!(flat.label_text.expect("label run").text_length, 210);
        let badge = compute_layout(input(StyleId::ForTheBadge, "abcd", "x"), &FixedWidth);
        assert_eq!(badge.label_text.expect("label run").text_length, 260);
    }

    #[test]
    fn oversized_logo_width_is_capped() {
        let mut huge = with_logo(input(StyleId::Flat, "build", "ok"));
        huge.logo_width = u32::MAX;
        let layout = compute_layout(huge, &FixedWidth);
        let logo = layout.logo.expect("logo");
        assert_eq!(logo.width, MAX_LOGO_WIDTH);
        assert_eq!(layout.label.width, 25 + 10 + MAX_LOGO_WIDTH + 3);

        let mut solo = with_logo(input(StyleId::Plastic, "", "ok"));
        solo.logo_width = 1_000_000_000;
        let layout = compute_layout(solo, &FixedWidth);
        assert_eq!(layout.message.width, 11 + 10 + MAX_LOGO_WIDTH + 4);
    }

    #[test]
    fn runaway_measurements_are_capped() {
        assert_eq!(pixel_text_width(f32::INFINITY, false), MAX_TEXT_WIDTH);
        assert_eq!(pixel_text_width(f32::NAN, true), 1);
    }

    #[test]
    fn height_override_moves_logo_and_baselines() {
        let mut tall = with_logo(input(StyleId::Flat, "build", "ok"));
        tall.height_override = Some(30);
        let layout = compute_layout(tall, &FixedWidth);
        assert_eq!(layout.height, 30);
        assert_eq!(layout.baseline, 190);
        assert_eq!(layout.shadow_baseline, Some(200));
        assert_eq!(layout.logo.expect("logo").y, 8);

        let default = compute_layout(input(StyleId::Plastic, "build", "ok"), &FixedWidth);
        assert_eq!(
            (default.height, default.baseline, default.shadow_baseline),
            (18, 130, Some(140))
        );
    }

    #[test]
    fn for_the_badge_keeps_a_logo_only_label_box() {
        let layout = compute_layout(with_logo(input(StyleId::ForTheBadge, "", "cd")), &FixedWidth);
        assert_eq!(layout.label.width, 18);
        assert!(layout.label_text.is_none());
        assert_eq!(layout.message.x, 18);
    }

    #[test]
    fn text_is_trimmed_before_measuring() {
        let padded = compute_layout(input(StyleId::Flat, " build ", " ok "), &FixedWidth);
        let bare = compute_layout(input(StyleId::Flat, "build", "ok"), &FixedWidth);
        assert_eq!(padded, bare);
    }
}
