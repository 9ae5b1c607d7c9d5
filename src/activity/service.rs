use sqlx::PgPool;
use uuid::Uuid;

use crate::access;
use crate::activity::format::{format, FormattedActivity};
use crate::activity::store::{ActivityScope, ActivityStore, PgActivityStore};
use crate::error::AppError;
use crate::models::{Activity, NewActivity};

/// Records activities and serves formatted feeds on top of an [`ActivityStore`].
pub struct ActivityLog<S> {
    store: S,
}

impl ActivityLog<PgActivityStore> {
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(PgActivityStore::new(pool))
    }
}

impl<S: ActivityStore> ActivityLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist one activity. Storage failures are returned to the caller untouched.
    pub async fn record(&self, new: &NewActivity) -> Result<Activity, AppError> {
        self.store.insert(new).await
    }

    /// Persist one activity, logging and discarding any failure.
    ///
    /// For callers that must not fail the action being described just because
    /// its log entry could not be written.
    pub async fn record_or_warn(&self, new: &NewActivity) -> Option<Activity> {
        match self.store.insert(new).await {
            Ok(activity) => Some(activity),
            Err(e) => {
                tracing::error!(
                    "Failed to record {} activity on board {}: {e}",
                    new.action_type(),
                    new.board_id
                );
                None
            }
        }
    }

    pub async fn feed(
        &self,
        scope: ActivityScope,
        limit: Option<i64>,
    ) -> Result<Vec<FormattedActivity>, AppError> {
        let limit = limit.unwrap_or_else(|| scope.default_limit());
        if limit < 0 {
            return Err(AppError::BadRequest(format!(
                "Limit must not be negative, got {limit}"
            )));
        }

        let entries = self.store.list(scope, limit).await?;
        Ok(entries.iter().map(format).collect())
    }

    pub async fn board_feed(
        &self,
        board_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<FormattedActivity>, AppError> {
        self.feed(ActivityScope::Board(board_id), limit).await
    }

    pub async fn card_feed(
        &self,
        card_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<FormattedActivity>, AppError> {
        self.feed(ActivityScope::Card(card_id), limit).await
    }

    pub async fn user_feed(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<FormattedActivity>, AppError> {
        self.feed(ActivityScope::User(user_id), limit).await
    }

    /// Board feed as seen by `viewer`, who must be a member of the board.
    pub async fn board_feed_for(
        &self,
        viewer: Uuid,
        board_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<FormattedActivity>, AppError> {
        let role = self.store.board_role(board_id, viewer).await?;
        access::check_member(role)?;
        self.board_feed(board_id, limit).await
    }
}
