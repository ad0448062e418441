use badge_rs_renderer::{BadgeRenderer, BadgeSpec, Config, LinkMode, RenderOptions};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BadgeRenderOptions {
    link_mode: Option<LinkMode>,
    logo_width: Option<u32>,
}

fn build_renderer(options: BadgeRenderOptions) -> BadgeRenderer {
    let mut config = Config::default();
    // No font files in the browser; the width tables are the only option.
    config.text.fast_text_metrics = true;
    if let Some(link_mode) = options.link_mode {
        config.badge.link_mode = link_mode;
    }
    if let Some(logo_width) = options.logo_width {
        config.badge.logo_width = logo_width;
    }
    BadgeRenderer::new(RenderOptions::from_config(config))
}

fn render_spec(spec_json: &str, options: BadgeRenderOptions) -> Result<String, String> {
    let spec: BadgeSpec = serde_json::from_str(spec_json).map_err(|error| error.to_string())?;
    Ok(build_renderer(options).render(&spec).into_string())
}

/// Renders a camelCase JSON badge spec; returns SVG or JSON per its `format`.
#[wasm_bindgen]
pub fn render_badge(spec_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<BadgeRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        BadgeRenderOptions::default()
    };

    render_spec(spec_json, options).map_err(|error| JsValue::from_str(&error))
}
