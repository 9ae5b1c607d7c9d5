//! Activity log: record what happened on a board and render it for display.

pub mod format;
pub mod service;
pub mod store;

pub use format::{format, FormattedActivity, FormattedUser, UNKNOWN_USER};
pub use service::ActivityLog;
pub use store::{ActivityScope, ActivityStore, PgActivityStore};
