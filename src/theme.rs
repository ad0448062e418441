use crate::ir::StyleId;
use crate::text_metrics::{FontSpec, FontWeight};

pub const VERDANA_STACK: &str = "DejaVu Sans,Verdana,Geneva,sans-serif";
pub const HELVETICA_STACK: &str = "Helvetica Neue,Helvetica,Arial,sans-serif";

/// Height of the logo box; its width comes from `logoWidth`.
pub const LOGO_HEIGHT: u32 = 14;
/// Gap between logo and label text.
pub const LOGO_PADDING: u32 = 3;
/// Extra room a logo takes when there is no label text to pad against.
pub const LOGO_SOLO_PADDING: u32 = 4;
/// Requested logo widths are clamped to this.
pub const MAX_LOGO_WIDTH: u32 = 100;
/// Height overrides are clamped to `LOGO_HEIGHT..=MAX_BADGE_HEIGHT`.
pub const MAX_BADGE_HEIGHT: u32 = 200;

/// How a style treats an empty label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyLabel {
    /// Label segment is dropped; a logo moves into the message segment.
    Collapse,
    /// Label segment is dropped unless a logo needs it, then it only holds the logo.
    LogoOnly,
    /// Label segment keeps its padded box.
    Keep,
}

/// Per-style constants, one table per [`StyleId`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateGeometry {
    pub height: u32,
    pub corner_radius: Option<u32>,
    pub crisp_edges: bool,
    pub label_font: FontSpec,
    pub message_font: FontSpec,
    /// `font-size` attribute value under `scale(.1)`.
    pub font_size_basis: u32,
    pub horizontal_padding: u32,
    /// Tracking added after every character of a run, in pixels.
    pub letter_spacing: f32,
    /// Blank run between the label and message boxes.
    pub segment_gap: u32,
    /// Round even text widths up to odd ones.
    pub odd_text_widths: bool,
    pub uppercase: bool,
    /// Baselines in ×10 space; `shadow_y` is `None` when text is drawn once.
    pub text_y: u32,
    pub shadow_y: Option<u32>,
    /// Nudge both texts 1px towards the divider when both segments are shown.
    pub nudge_towards_divider: bool,
    pub logo_x: u32,
    pub empty_label: EmptyLabel,
}

impl TemplateGeometry {
    pub fn for_style(style: StyleId) -> &'static TemplateGeometry {
        match style {
            StyleId::Flat => &FLAT,
            StyleId::FlatSquare => &FLAT_SQUARE,
            StyleId::Plastic => &PLASTIC,
            StyleId::Social => &SOCIAL,
            StyleId::ForTheBadge => &FOR_THE_BADGE,
        }
    }

    /// Clamps a requested height, or falls back to the style's own.
    pub fn resolve_height(&self, height_override: Option<u32>) -> u32 {
        height_override.map_or(self.height, |height| {
            height.clamp(LOGO_HEIGHT, MAX_BADGE_HEIGHT)
        })
    }

    /// Text and shadow baselines for a badge `height` px tall, in ×10 space.
    ///
    /// Both keep their distance from the vertical centre.
    pub fn baselines(&self, height: u32) -> (u32, Option<u32>) {
        let shift = |y: u32| {
            y.saturating_add(height.saturating_mul(5))
                .saturating_sub(self.height * 5)
        };
        (shift(self.text_y), self.shadow_y.map(shift))
    }
}

/// Top edge of a logo centred in a badge `height` px tall.
pub fn logo_y(height: u32) -> u32 {
    height.saturating_sub(LOGO_HEIGHT) / 2
}

const VERDANA_11: FontSpec = FontSpec::new(VERDANA_STACK, 11.0, FontWeight::Normal);

const FLAT: TemplateGeometry = TemplateGeometry {
    height: 20,
    corner_radius: Some(3),
    crisp_edges: false,
    label_font: VERDANA_11,
    message_font: VERDANA_11,
    font_size_basis: 110,
    horizontal_padding: 5,
    letter_spacing: 0.0,
    segment_gap: 0,
    odd_text_widths: true,
    uppercase: false,
    text_y: 140,
    shadow_y: Some(150),
    nudge_towards_divider: true,
    logo_x: 5,
    empty_label: EmptyLabel::Collapse,
};

const FLAT_SQUARE: TemplateGeometry = TemplateGeometry {
    corner_radius: None,
    crisp_edges: true,
    shadow_y: None,
    ..FLAT
};

const PLASTIC: TemplateGeometry = TemplateGeometry {
    height: 18,
    corner_radius: Some(4),
    text_y: 130,
    shadow_y: Some(140),
    ..FLAT
};

const SOCIAL: TemplateGeometry = TemplateGeometry {
    corner_radius: Some(2),
    label_font: FontSpec::new(HELVETICA_STACK, 11.0, FontWeight::Bold),
    message_font: FontSpec::new(HELVETICA_STACK, 11.0, FontWeight::Bold),
    segment_gap: 5,
    nudge_towards_divider: false,
    empty_label: EmptyLabel::Keep,
    ..FLAT
};

const FOR_THE_BADGE: TemplateGeometry = TemplateGeometry {
    height: 28,
    corner_radius: None,
    crisp_edges: true,
    label_font: FontSpec::new(VERDANA_STACK, 10.0, FontWeight::Normal),
    message_font: FontSpec::new(VERDANA_STACK, 10.0, FontWeight::Bold),
    font_size_basis: 100,
    horizontal_padding: 12,
    letter_spacing: 1.5,
    segment_gap: 0,
    odd_text_widths: false,
    uppercase: true,
    text_y: 175,
    shadow_y: None,
    nudge_towards_divider: false,
    logo_x: 9,
    empty_label: EmptyLabel::LogoOnly,
};
