mod render;
mod submit;

pub use render::RenderCommand;
pub use submit::SubmitCommand;

use anyhow::Context;
use dockhand_core::ProjectConfigPayload;
use std::path::Path;

/// Load a project settings file (YAML) into the document shape.
pub(crate) fn load_settings(path: &Path) -> anyhow::Result<ProjectConfigPayload> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings file {}", path.display()))?;
    parse_settings(&raw).with_context(|| format!("parsing settings file {}", path.display()))
}

fn parse_settings(raw: &str) -> anyhow::Result<ProjectConfigPayload> {
    Ok(serde_yaml::from_str(raw)?)
}
