//! Save page view-model: one submission attempt and its presentation

use std::sync::Arc;
use std::time::Duration;

use dockhand_session::SettingSession;
use dockhand_submit::{SubmissionOutcome, SubmitController};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::navigator::Navigator;

/// Delay before a failed save returns the user to the starting view.
pub const ERROR_RETURN_DELAY: Duration = Duration::from_millis(1000);

pub const SUCCESS_MESSAGE: &str = "Configuration saved";
pub const FAILURE_MESSAGE: &str = "Saving failed. Please revisit your settings.";

/// Visual treatment of a rendered status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Failure,
}

/// Message plus treatment, enough for any frontend to render the two
/// terminal states distinguishably.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine {
    pub text: &'static str,
    pub tone: Tone,
}

/// View-model for the save step.
///
/// Watches the controller's outcome channel in a background task. On
/// failure it schedules the one-shot delayed navigation back to the
/// starting view; the schedule races the page's cancellation token, and
/// dropping the page cancels the token, so a torn-down page never drives
/// navigation.
pub struct SavePage {
    controller: SubmitController,
    outcome: watch::Receiver<SubmissionOutcome>,
    teardown: CancellationToken,
    submitted: bool,
}

impl SavePage {
    pub fn new(controller: SubmitController, navigator: Arc<dyn Navigator>) -> Self {
        let outcome = controller.outcome();
        let teardown = CancellationToken::new();

        tokio::spawn(Self::watch_outcome(
            controller.outcome(),
            navigator,
            teardown.clone(),
        ));

        Self {
            controller,
            outcome,
            teardown,
            submitted: false,
        }
    }

    /// Trigger the save action, reading the session at this instant.
    ///
    /// Only the first call per page submits; the page models a single
    /// attempt, so repeat calls are ignored while the attempt is in
    /// flight or after it resolved.
    pub fn save(&mut self, session: &SettingSession) {
        if self.submitted {
            warn!("save already triggered for this page, ignoring");
            return;
        }
        self.submitted = true;
        self.controller.submit(session.snapshot());
    }

    /// Current status line: nothing while unresolved, a distinct fixed
    /// message per terminal state.
    pub fn render(&self) -> Option<StatusLine> {
        match *self.outcome.borrow() {
            SubmissionOutcome::Unresolved => None,
            SubmissionOutcome::Success => Some(StatusLine {
                text: SUCCESS_MESSAGE,
                tone: Tone::Success,
            }),
            SubmissionOutcome::Error => Some(StatusLine {
                text: FAILURE_MESSAGE,
                tone: Tone::Failure,
            }),
        }
    }

    /// Wait until the attempt resolves and return the terminal outcome.
    pub async fn wait_resolved(&mut self) -> SubmissionOutcome {
        while !self.outcome.borrow_and_update().is_resolved() {
            if self.outcome.changed().await.is_err() {
                break;
            }
        }
        *self.outcome.borrow()
    }

    async fn watch_outcome(
        mut outcome: watch::Receiver<SubmissionOutcome>,
        navigator: Arc<dyn Navigator>,
        teardown: CancellationToken,
    ) {
        loop {
            if outcome.borrow_and_update().is_resolved() {
                break;
            }
            tokio::select! {
                _ = teardown.cancelled() => return,
                changed = outcome.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
            }
        }

        if *outcome.borrow() != SubmissionOutcome::Error {
            return;
        }

        debug!("save failed, returning to start after delay");
        tokio::select! {
            _ = teardown.cancelled() => {
                debug!("page torn down before the delay, navigation dropped");
            }
            _ = tokio::time::sleep(ERROR_RETURN_DELAY) => {
                navigator.to_start().await;
            }
        }
    }
}

impl Drop for SavePage {
    fn drop(&mut self) {
        self.teardown.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockhand_core::ProjectId;
    use dockhand_submit::SubmitClient;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct RecordingNavigator {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Navigator for RecordingNavigator {
        async fn to_start(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn sample_session() -> SettingSession {
        let mut session = SettingSession::new(ProjectId(7), "shop");
        let store = session.nginx_mut().locations_mut();
        store.add_location();
        store.add_location();
        session
    }

    async fn page_against(
        mock_server: &MockServer,
        status: u16,
    ) -> (SavePage, Arc<RecordingNavigator>) {
        Mock::given(method("POST"))
            .and(path("/api/project"))
            .respond_with(ResponseTemplate::new(status))
            .mount(mock_server)
            .await;

        let client = SubmitClient::new(mock_server.uri()).unwrap();
        let controller = SubmitController::new(Arc::new(client));
        let navigator = Arc::new(RecordingNavigator::default());
        let page = SavePage::new(controller, navigator.clone());
        (page, navigator)
    }

    #[tokio::test]
    async fn nothing_rendered_while_unresolved() {
        let mock_server = MockServer::start().await;
        let (page, _navigator) = page_against(&mock_server, 200).await;
        assert!(page.render().is_none());
    }

    #[tokio::test]
    async fn successful_save_renders_success_and_stays_put() {
        let mock_server = MockServer::start().await;
        let (mut page, navigator) = page_against(&mock_server, 200).await;

        page.save(&sample_session());
        assert_eq!(page.wait_resolved().await, SubmissionOutcome::Success);

        let status = page.render().unwrap();
        assert_eq!(status.text, SUCCESS_MESSAGE);
        assert_eq!(status.tone, Tone::Success);

        // No navigation on success, even after the error delay has passed.
        tokio::time::sleep(ERROR_RETURN_DELAY + Duration::from_millis(300)).await;
        assert_eq!(navigator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_save_navigates_back_after_the_delay() {
        let mock_server = MockServer::start().await;
        let (mut page, navigator) = page_against(&mock_server, 500).await;

        page.save(&sample_session());
        assert_eq!(page.wait_resolved().await, SubmissionOutcome::Error);

        let status = page.render().unwrap();
        assert_eq!(status.text, FAILURE_MESSAGE);
        assert_eq!(status.tone, Tone::Failure);

        // Not yet: the delay has not elapsed.
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(navigator.calls.load(Ordering::SeqCst), 0);

        tokio::time::sleep(ERROR_RETURN_DELAY).await;
        assert_eq!(navigator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn teardown_before_the_delay_cancels_navigation() {
        let mock_server = MockServer::start().await;
        let (mut page, navigator) = page_against(&mock_server, 500).await;

        page.save(&sample_session());
        assert_eq!(page.wait_resolved().await, SubmissionOutcome::Error);

        drop(page);

        tokio::time::sleep(ERROR_RETURN_DELAY + Duration::from_millis(300)).await;
        assert_eq!(navigator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn repeat_save_calls_submit_once() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/project"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SubmitClient::new(mock_server.uri()).unwrap();
        let controller = SubmitController::new(Arc::new(client));
        let navigator = Arc::new(RecordingNavigator::default());
        let mut page = SavePage::new(controller, navigator);

        let session = sample_session();
        page.save(&session);
        page.save(&session);
        page.save(&session);

        assert_eq!(page.wait_resolved().await, SubmissionOutcome::Success);
        // The mock's expect(1) verifies on drop that one write went out.
    }
}
