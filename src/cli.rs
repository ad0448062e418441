use crate::config::load_config;
use crate::ir::{BadgeSpec, Links, LogoRef, OutputFormat, StyleId};
use crate::render::write_output_svg;
use crate::{BadgeRenderer, RenderOptions};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bdgr", version, about = "Render a status badge as SVG or JSON")]
pub struct Args {
    /// Left-hand text; omit for a message-only badge
    #[arg(short = 'l', long = "label", default_value = "")]
    pub label: String,

    /// Right-hand text
    pub message: String,

    /// Message background (palette name, hex, rgb()/hsl() or CSS keyword)
    #[arg(short = 'c', long = "color")]
    pub color: Option<String>,

    /// Label background
    #[arg(long = "label-color")]
    pub label_color: Option<String>,

    /// flat, flat-square, plastic, social or for-the-badge
    #[arg(short = 's', long = "style", default_value = "flat")]
    pub style: String,

    /// Named logo, data: URI or inline <svg> markup
    #[arg(long = "logo")]
    pub logo: Option<String>,

    /// Fill applied to named logos
    #[arg(long = "logo-color")]
    pub logo_color: Option<String>,

    #[arg(long = "logo-width")]
    pub logo_width: Option<u32>,

    /// Badge height in pixels, overriding the style's own
    #[arg(long = "height")]
    pub height: Option<u32>,

    /// Link target; pass twice for label and message
    #[arg(long = "link", num_args = 1, action = clap::ArgAction::Append)]
    pub links: Vec<String>,

    /// svg or json
    #[arg(short = 'f', long = "format", default_value = "svg")]
    pub format: String,

    /// Config JSON file
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Use the built-in width tables instead of font files
    #[arg(long = "fast-text", conflicts_with_all = ["font", "fallback_font"])]
    pub fast_text: bool,

    /// Primary font file for exact metrics
    #[arg(long = "font")]
    pub font: Option<PathBuf>,

    /// Font consulted for glyphs the primary font lacks
    #[arg(long = "fallback-font", requires = "font")]
    pub fallback_font: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

impl Args {
    fn spec(&self) -> Result<BadgeSpec> {
        let style: StyleId = self.style.parse()?;
        let format: OutputFormat = self.format.parse()?;
        let mut spec = BadgeSpec::new(self.label.clone(), self.message.clone())
            .with_style(style)
            .with_format(format)
            .with_links(Links::new(
                self.links.first().map(String::as_str),
                self.links.get(1).map(String::as_str),
            ));
        spec.color = self.color.clone();
        spec.label_color = self.label_color.clone();
        spec.logo = self.logo.as_deref().map(LogoRef::from_token);
        spec.logo_color = self.logo_color.clone();
        spec.logo_width = self.logo_width;
        spec.height = self.height;
        Ok(spec)
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if args.fast_text {
        config.text.fast_text_metrics = true;
    }
    if let Some(font) = &args.font {
        config.text.fast_text_metrics = false;
        config.fonts.primary_path = Some(font.clone());
        config.fonts.fallback_path = args.fallback_font.clone();
    }

    let spec = args.spec()?;
    tracing::debug!(style = %spec.style, format = %spec.format.as_str(), "rendering badge");
    let renderer = BadgeRenderer::new(RenderOptions::from_config(config));
    let badge = renderer.render(&spec);
    write_output_svg(badge.as_str(), args.output.as_deref())?;
    Ok(())
}
