//! Submission controller: one write, one outcome resolution

use dockhand_core::ProjectConfigPayload;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::client::SubmitClient;
use crate::outcome::SubmissionOutcome;

/// Runs one submission attempt and resolves its outcome.
///
/// `submit` is non-blocking: the write runs on the runtime and the result
/// arrives on the outcome channel strictly after the write completes. The
/// controller offers no idempotency of its own; each call performs one
/// outbound write. Callers that must guard against duplicate submissions
/// do so above this layer.
pub struct SubmitController {
    client: Arc<SubmitClient>,
    outcome: watch::Sender<SubmissionOutcome>,
}

impl SubmitController {
    pub fn new(client: Arc<SubmitClient>) -> Self {
        let (outcome, _) = watch::channel(SubmissionOutcome::Unresolved);
        Self { client, outcome }
    }

    /// Subscribe to the outcome channel.
    pub fn outcome(&self) -> watch::Receiver<SubmissionOutcome> {
        self.outcome.subscribe()
    }

    /// Fire the single remote write for `payload`.
    ///
    /// Every failure mode (transport, non-success status, serialization)
    /// resolves uniformly to [`SubmissionOutcome::Error`]; the detail is
    /// logged for diagnostics only. The outcome transitions only from
    /// `Unresolved`: a late second resolution is dropped.
    pub fn submit(&self, payload: ProjectConfigPayload) {
        let client = self.client.clone();
        let outcome = self.outcome.clone();

        tokio::spawn(async move {
            let resolved = match client.submit_project(&payload).await {
                Ok(()) => {
                    info!(project = %payload.project_name, "project configuration saved");
                    SubmissionOutcome::Success
                }
                Err(err) => {
                    error!(error = %err, project = %payload.project_name, "project configuration submit failed");
                    SubmissionOutcome::Error
                }
            };

            let applied = outcome.send_if_modified(|current| {
                if *current == SubmissionOutcome::Unresolved {
                    *current = resolved;
                    true
                } else {
                    false
                }
            });
            if !applied {
                warn!(?resolved, "outcome already resolved, dropping late result");
            }
        });
    }
}
