// ABOUTME: Command implementations for the herald CLI
// ABOUTME: Handles execution of render, validate and helpers commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::config::Config;
use crate::event::LogEvent;
use crate::template::helpers::HELPER_SIGNATURES;
use crate::template::TemplateEngine;

fn read_template(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read template '{}'", path.display()))
}

/// Render a template file against an event file
pub fn render_template(
    template_path: PathBuf,
    event_path: PathBuf,
    output: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let template = read_template(&template_path)?;
    let event = LogEvent::from_file(&event_path)
        .with_context(|| format!("Failed to load event '{}'", event_path.display()))?;
    info!("Rendering {} for event {}", template_path.display(), event.id);

    let engine = TemplateEngine::new(&config.template);
    let rendered = engine
        .render_event(&template, &event, &config.host)
        .map_err(|e| anyhow::anyhow!("Failed to render template: {}", e))?;
    debug!("Rendered {} characters", rendered.chars().count());

    match output {
        Some(output_path) => {
            std::fs::write(&output_path, &rendered).with_context(|| {
                format!("Failed to write output file '{}'", output_path.display())
            })?;
            info!("Rendered text written to: {}", output_path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// Validate a template file without rendering it
pub fn validate_template(template_path: PathBuf, config: &Config) -> Result<()> {
    let template = read_template(&template_path)?;
    let engine = TemplateEngine::new(&config.template);

    engine
        .validate_template(&template)
        .map_err(|e| anyhow::anyhow!("{}: {}", template_path.display(), e))?;

    println!("Template '{}' is valid", template_path.display());
    Ok(())
}

/// Print the helpers registered for notification templates
pub fn list_helpers() -> Result<()> {
    for (name, signature) in HELPER_SIGNATURES {
        println!("{:<10} {}", name, signature);
    }
    Ok(())
}
