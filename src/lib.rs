pub mod access;
pub mod activity;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use activity::{format, ActivityLog, ActivityScope, ActivityStore, FormattedActivity};
pub use error::AppError;
pub use models::{ActivityDetails, EntityType, NewActivity};
