use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use colored::Colorize;
use dockhand_console::{Navigator, SavePage, Tone, ERROR_RETURN_DELAY};
use dockhand_session::SettingSession;
use dockhand_submit::{SubmissionOutcome, SubmitClient, SubmitController};
use tracing::info;

/// Submit an assembled project configuration to the backend.
#[derive(Args)]
pub struct SubmitCommand {
    /// Path to the project settings file (YAML)
    #[arg(long, short = 'f')]
    file: PathBuf,

    /// Base URL of the backend server
    #[arg(long, env = "DOCKHAND_SERVER", default_value = "http://localhost:8080")]
    server: String,
}

struct TerminalNavigator;

#[async_trait::async_trait]
impl Navigator for TerminalNavigator {
    async fn to_start(&self) {
        println!("{}", "Returning to the settings start page.".yellow());
    }
}

impl SubmitCommand {
    pub async fn execute(self) -> anyhow::Result<()> {
        let document = super::load_settings(&self.file)?;
        let session = SettingSession::from_document(document);
        info!(
            project = %session.project_name(),
            locations = session.nginx().locations().len(),
            "loaded project settings"
        );

        let client = SubmitClient::new(self.server.as_str())?;
        let controller = SubmitController::new(Arc::new(client));
        let mut page = SavePage::new(controller, Arc::new(TerminalNavigator));

        page.save(&session);
        let outcome = page.wait_resolved().await;

        if let Some(status) = page.render() {
            match status.tone {
                Tone::Success => println!("{}", status.text.green()),
                Tone::Failure => println!("{}", status.text.red()),
            }
        }

        if outcome == SubmissionOutcome::Error {
            // Let the delayed return-to-start fire before exiting.
            tokio::time::sleep(ERROR_RETURN_DELAY + Duration::from_millis(50)).await;
            anyhow::bail!("configuration submit failed");
        }
        Ok(())
    }
}
