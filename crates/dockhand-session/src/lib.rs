//! Editing session for a project deployment configuration
//!
//! One session owns the sub-configurations an operator fills in page by
//! page (build, git, proxy) and composes them into the submission document
//! on demand. The proxy location rules live in [`LocationStore`], the
//! authoritative ordered sequence; views only ever see derived snapshots.

mod session;
mod store;

pub use session::{NginxSettings, SettingSession};
pub use store::LocationStore;
