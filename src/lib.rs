#[cfg(feature = "cli")]
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod logo;
pub mod render;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LinkMode, load_config};
pub use error::{BadgeError, Result};
pub use ir::{BadgeSpec, Links, LogoRef, OutputFormat, StyleId};
pub use layout::{BadgeLayout, FastTextMeasurer};
pub use render::RenderedBadge;
pub use text_metrics::{ExactTextMeasurer, FontSpec, FontWeight, TextMeasurer};

use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::color::resolve_segment_colors;
use crate::layout::{LayoutInput, compute_layout};

#[derive(Clone)]
pub struct RenderOptions {
    pub config: Config,
    pub measurer: Arc<dyn TextMeasurer>,
}

impl RenderOptions {
    /// Picks the measurer the config asks for.
    ///
    /// Exact metrics need fonts; when they cannot be loaded the fast tables
    /// are used instead and a warning is logged.
    pub fn from_config(config: Config) -> Self {
        let measurer: Arc<dyn TextMeasurer> = if config.text.fast_text_metrics {
            Arc::new(FastTextMeasurer::new())
        } else {
            match exact_measurer(&config) {
                Ok(measurer) => Arc::new(measurer),
                Err(err) => {
                    tracing::warn!(%err, "exact text metrics unavailable, using fast tables");
                    Arc::new(FastTextMeasurer::with_cache(config.text.cache_capacity))
                }
            }
        };
        Self { config, measurer }
    }

    pub fn with_measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(Config::default())
    }
}

fn exact_measurer(config: &Config) -> Result<ExactTextMeasurer> {
    let capacity = config.text.cache_capacity;
    match &config.fonts.primary_path {
        Some(primary) => ExactTextMeasurer::from_paths(
            primary,
            config.fonts.fallback_path.as_deref(),
            capacity,
        ),
        None => ExactTextMeasurer::from_system(
            &config.fonts.primary_family,
            &config.fonts.fallback_family,
            capacity,
        ),
    }
}

/// Renders badges against one measurer and config; cheap to share across threads.
#[derive(Clone)]
pub struct BadgeRenderer {
    options: RenderOptions,
}

impl BadgeRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn config(&self) -> &Config {
        &self.options.config
    }

    /// Resolves colours and logo, then measures and positions everything.
    pub fn layout(&self, spec: &BadgeSpec) -> BadgeLayout {
        let defaults = &self.options.config.badge;
        let has_label = !spec.label.trim().is_empty();
        let colors = resolve_segment_colors(
            spec.label_color.as_deref(),
            spec.color.as_deref(),
            has_label,
            defaults,
        );
        let logo_href = spec.logo.as_ref().and_then(|logo_ref| {
            logo::embed_logo(logo_ref, spec.logo_color.as_deref())
                .map_err(|err| tracing::warn!(%err, "dropping logo"))
                .ok()
        });
        let input = LayoutInput {
            style: spec.style,
            label: &spec.label,
            message: &spec.message,
            colors,
            logo_href,
            logo_width: spec.logo_width.unwrap_or(defaults.logo_width),
            height_override: spec.height,
        };
        compute_layout(input, self.options.measurer.as_ref())
    }

    pub fn render(&self, spec: &BadgeSpec) -> RenderedBadge {
        match spec.format {
            OutputFormat::Svg => {
                let layout = self.layout(spec);
                RenderedBadge::Svg(render::render_svg(
                    &layout,
                    &spec.links,
                    self.options.config.badge.link_mode,
                ))
            }
            OutputFormat::Json => {
                let colors = resolve_segment_colors(
                    spec.label_color.as_deref(),
                    spec.color.as_deref(),
                    !spec.label.trim().is_empty(),
                    &self.options.config.badge,
                );
                RenderedBadge::Json(render::render_json(
                    &spec.label,
                    &spec.message,
                    &colors,
                    spec.label_color.is_some(),
                ))
            }
        }
    }
}

impl Default for BadgeRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

static DEFAULT_RENDERER: Lazy<BadgeRenderer> = Lazy::new(BadgeRenderer::default);

/// Renders with the fast measurer and default config.
pub fn render(spec: &BadgeSpec) -> RenderedBadge {
    DEFAULT_RENDERER.render(spec)
}

/// Parses a camelCase JSON [`BadgeSpec`] and renders it with the default renderer.
pub fn render_json_spec(json: &str) -> Result<RenderedBadge> {
    let spec: BadgeSpec = serde_json::from_str(json)?;
    Ok(render(&spec))
}
