//! Outcome presentation for the save step of the settings flow
//!
//! [`SavePage`] watches the submission outcome, renders the terminal
//! status, and on failure schedules the delayed return to the starting
//! view — cancelled automatically if the page is torn down first.

mod navigator;
mod save_page;

pub use navigator::Navigator;
pub use save_page::{SavePage, StatusLine, Tone, ERROR_RETURN_DELAY, FAILURE_MESSAGE, SUCCESS_MESSAGE};
