use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::error::AppError;
use crate::models::{Activity, ActivityEntry, BoardRole, NewActivity};

pub const BOARD_FEED_LIMIT: i64 = 20;
pub const CARD_FEED_LIMIT: i64 = 10;
pub const USER_FEED_LIMIT: i64 = 20;

/// Which slice of the log a read covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityScope {
    Board(Uuid),
    Card(Uuid),
    User(Uuid),
}

impl ActivityScope {
    pub fn default_limit(self) -> i64 {
        match self {
            ActivityScope::Board(_) => BOARD_FEED_LIMIT,
            ActivityScope::Card(_) => CARD_FEED_LIMIT,
            ActivityScope::User(_) => USER_FEED_LIMIT,
        }
    }
}

/// Storage capability behind [`crate::activity::ActivityLog`].
///
/// Reads return entries newest first, ties broken by insertion order, capped at `limit`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn insert(&self, new: &NewActivity) -> Result<Activity, AppError>;

    async fn list(
        &self,
        scope: ActivityScope,
        limit: i64,
    ) -> Result<Vec<ActivityEntry>, AppError>;

    async fn board_role(
        &self,
        board_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<BoardRole>, AppError>;
}

#[derive(Clone)]
pub struct PgActivityStore {
    pool: PgPool,
}

impl PgActivityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityStore for PgActivityStore {
    async fn insert(&self, new: &NewActivity) -> Result<Activity, AppError> {
        let activity = db::activities::create(&self.pool, new).await?;
        tracing::debug!(
            "Recorded activity {} ({}) on board {}",
            activity.id,
            activity.action_type,
            activity.board_id
        );
        Ok(activity)
    }

    async fn list(
        &self,
        scope: ActivityScope,
        limit: i64,
    ) -> Result<Vec<ActivityEntry>, AppError> {
        let entries = match scope {
            ActivityScope::Board(id) => db::activities::list_by_board(&self.pool, id, limit).await?,
            ActivityScope::Card(id) => db::activities::list_by_card(&self.pool, id, limit).await?,
            ActivityScope::User(id) => db::activities::list_by_user(&self.pool, id, limit).await?,
        };
        Ok(entries)
    }

    async fn board_role(
        &self,
        board_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<BoardRole>, AppError> {
        let member = db::board_members::find(&self.pool, board_id, user_id).await?;
        Ok(member.map(|m| m.board_role()))
    }
}
