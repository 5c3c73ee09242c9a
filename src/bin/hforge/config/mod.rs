use std::fs;

use anyhow::{Context, Result};

use haworth_forge::{RenderConfig, default_style, load_style};

use crate::cli::StyleOptions;

/// Builds the render configuration from the drawing options.
pub fn build_render_config(opts: &StyleOptions) -> Result<RenderConfig> {
    let mut style = match &opts.style {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read style file: {}", path.display()))?;
            load_style(Some(&text))
                .with_context(|| format!("Invalid style file: {}", path.display()))?
        }
        None => default_style().clone(),
    };

    if let Some(epsilon) = opts.epsilon {
        style.gate.epsilon = epsilon;
    }

    Ok(RenderConfig {
        style,
        ..RenderConfig::with_scale(opts.bond_length, opts.font_size)
    })
}

/// Substeps describing the drawing settings, for the progress display.
pub fn describe(config: &RenderConfig, custom_style: bool) -> Vec<String> {
    vec![
        format!(
            "Bond length {:.1}, font size {:.1}",
            config.bond_length, config.font_size
        ),
        format!(
            "{} style, gate tolerance {:.2}",
            if custom_style { "Custom" } else { "Default" },
            config.style.gate.epsilon
        ),
    ]
}
