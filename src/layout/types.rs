use crate::color::SegmentColors;
use crate::ir::StyleId;

/// A horizontal band of the badge, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub x: u32,
    pub width: u32,
}

impl Segment {
    pub fn end(&self) -> u32 {
        self.x + self.width
    }
}

/// One text run, positioned in the ×10 coordinate space used under `scale(.1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub content: String,
    /// Horizontal centre (`text-anchor="middle"`), ×10.
    pub x: u32,
    /// Pixel width the run is stretched to, ×10.
    pub text_length: u32,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoPlacement {
    pub href: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Everything an emitter needs; no measuring happens after this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeLayout {
    pub style: StyleId,
    pub width: u32,
    pub height: u32,
    /// Text baseline, ×10.
    pub baseline: u32,
    /// Drop-shadow baseline, ×10; `None` when text is drawn once.
    pub shadow_baseline: Option<u32>,
    pub label: Segment,
    pub message: Segment,
    pub colors: SegmentColors,
    /// `None` when the style omits the label run.
    pub label_text: Option<TextRun>,
    pub message_text: TextRun,
    pub logo: Option<LogoPlacement>,
}

/// The resolved inputs of one layout pass.
#[derive(Debug, Clone)]
pub struct LayoutInput<'a> {
    pub style: StyleId,
    pub label: &'a str,
    pub message: &'a str,
    pub colors: SegmentColors,
    pub logo_href: Option<String>,
    pub logo_width: u32,
    pub height_override: Option<u32>,
}
