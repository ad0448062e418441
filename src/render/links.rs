use crate::config::LinkMode;
use crate::ir::Links;
use crate::layout::BadgeLayout;

use super::escape_xml;

const TRANSPARENT: &str = "rgba(0,0,0,0)";

/// Clickable regions layered over a rendered badge.
#[derive(Debug, Clone, Copy)]
pub struct LinkOverlay<'a> {
    links: &'a Links,
    mode: LinkMode,
}

impl<'a> LinkOverlay<'a> {
    pub fn new(links: &'a Links, mode: LinkMode) -> Self {
        Self { links, mode }
    }

    /// Transparent anchored rects over both segments, label slot first.
    ///
    /// Legacy mode writes the widths the published badges carry (`NaN` and
    /// `undefined`), which leave the rects unsized.
    pub fn segment_anchors(&self, layout: &BadgeLayout) -> String {
        let mut out = String::new();
        if let Some(href) = &self.links.label {
            let rect = match self.mode {
                LinkMode::Legacy => transparent_rect(None, "NaN", layout.height),
                LinkMode::Corrected => {
                    transparent_rect(None, &layout.label.width.to_string(), layout.height)
                }
            };
            out.push_str(&anchor(href, &rect));
        }
        if let Some(href) = &self.links.message {
            let rect = match self.mode {
                LinkMode::Legacy => transparent_rect(None, "undefined", layout.height),
                LinkMode::Corrected => transparent_rect(
                    Some(layout.message.x),
                    &layout.message.width.to_string(),
                    layout.height,
                ),
            };
            out.push_str(&anchor(href, &rect));
        }
        out
    }

    /// Target wrapping the social message run.
    ///
    /// Legacy mode hands the first slot to the message run and the second to
    /// the label box; corrected mode keeps slots with their own segment.
    pub fn social_message_target(&self) -> Option<&'a str> {
        match self.mode {
            LinkMode::Legacy => self.links.label.as_deref(),
            LinkMode::Corrected => self.links.message.as_deref(),
        }
    }

    /// Target wrapping the social label box.
    pub fn social_label_target(&self) -> Option<&'a str> {
        match self.mode {
            LinkMode::Legacy => self.links.message.as_deref(),
            LinkMode::Corrected => self.links.label.as_deref(),
        }
    }
}

/// Wraps `inner` in an anchor when a target is present.
pub(super) fn wrap(href: Option<&str>, inner: &str) -> String {
    match href {
        Some(href) => anchor(href, inner),
        None => inner.to_string(),
    }
}

fn anchor(href: &str, inner: &str) -> String {
    format!(
        "<a target=\"_blank\" xlink:href=\"{}\">{inner}</a>",
        escape_xml(href)
    )
}

fn transparent_rect(x: Option<u32>, width: &str, height: u32) -> String {
    let x = x.map(|x| format!("x=\"{x}\" ")).unwrap_or_default();
    format!("<rect {x}width=\"{width}\" height=\"{height}\" fill=\"{TRANSPARENT}\"/>")
}
