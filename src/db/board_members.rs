use uuid::Uuid;

use crate::models::BoardMember;

pub async fn find<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    board_id: Uuid,
    user_id: Uuid,
) -> Result<Option<BoardMember>, sqlx::Error> {
    sqlx::query_as::<_, BoardMember>(
        "SELECT * FROM board_members WHERE board_id = $1 AND user_id = $2",
    )
    .bind(board_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn add<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    board_id: Uuid,
    user_id: Uuid,
    role: &str,
) -> Result<BoardMember, sqlx::Error> {
    sqlx::query_as::<_, BoardMember>(
        "INSERT INTO board_members (board_id, user_id, role)
         VALUES ($1, $2, $3)
         ON CONFLICT (board_id, user_id) DO UPDATE SET role = EXCLUDED.role
         RETURNING *",
    )
    .bind(board_id)
    .bind(user_id)
    .bind(role)
    .fetch_one(executor)
    .await
}
