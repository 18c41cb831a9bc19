use std::path::PathBuf;

use clap::Args;
use dockhand_core::nginx;
use dockhand_session::SettingSession;

/// Preview the nginx configuration a settings file produces.
#[derive(Args)]
pub struct RenderCommand {
    /// Path to the project settings file (YAML)
    #[arg(long, short = 'f')]
    file: PathBuf,
}

impl RenderCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let document = super::load_settings(&self.file)?;
        let session = SettingSession::from_document(document);
        print!("{}", nginx::render(&session.nginx().to_config()));
        Ok(())
    }
}
