use uuid::Uuid;

use crate::models::{Activity, ActivityEntry, NewActivity};

/// Insert one activity. Accepts any executor so the caller can tie the write
/// to the transaction of the action it describes.
pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    new: &NewActivity,
) -> Result<Activity, sqlx::Error> {
    sqlx::query_as::<_, Activity>(
        "INSERT INTO activities
         (user_id, board_id, card_id, list_id, action_type, entity_type, entity_id, details)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
    )
    .bind(new.user_id)
    .bind(new.board_id)
    .bind(new.card_id)
    .bind(new.list_id)
    .bind(new.action_type().to_string())
    .bind(new.entity_type.as_str())
    .bind(new.entity_id)
    .bind(new.details.to_value())
    .fetch_one(executor)
    .await
}

pub async fn list_by_board<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    board_id: Uuid,
    limit: i64,
) -> Result<Vec<ActivityEntry>, sqlx::Error> {
    sqlx::query_as::<_, ActivityEntry>(
        "SELECT a.*, u.username, u.avatar_url
         FROM activities a
         LEFT JOIN users u ON a.user_id = u.id
         WHERE a.board_id = $1
         ORDER BY a.created_at DESC, a.seq DESC
         LIMIT $2",
    )
    .bind(board_id)
    .bind(limit)
    .fetch_all(executor)
    .await
}

pub async fn list_by_card<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    card_id: Uuid,
    limit: i64,
) -> Result<Vec<ActivityEntry>, sqlx::Error> {
    sqlx::query_as::<_, ActivityEntry>(
        "SELECT a.*, u.username, u.avatar_url
         FROM activities a
         LEFT JOIN users u ON a.user_id = u.id
         WHERE a.card_id = $1
         ORDER BY a.created_at DESC, a.seq DESC
         LIMIT $2",
    )
    .bind(card_id)
    .bind(limit)
    .fetch_all(executor)
    .await
}

pub async fn list_by_user<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<ActivityEntry>, sqlx::Error> {
    sqlx::query_as::<_, ActivityEntry>(
        "SELECT a.*, b.title AS board_title, u.username, u.avatar_url
         FROM activities a
         JOIN boards b ON a.board_id = b.id
         LEFT JOIN users u ON a.user_id = u.id
         WHERE a.user_id = $1
         ORDER BY a.created_at DESC, a.seq DESC
         LIMIT $2",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(executor)
    .await
}
