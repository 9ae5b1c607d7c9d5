//! Board membership checks.

use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::error::AppError;
use crate::models::BoardRole;

pub fn check_member(role: Option<BoardRole>) -> Result<BoardRole, AppError> {
    role.ok_or_else(|| AppError::Forbidden("Not a board member".to_string()))
}

pub fn check_admin(role: Option<BoardRole>) -> Result<BoardRole, AppError> {
    let role = check_member(role)?;
    if role.is_admin() {
        Ok(role)
    } else {
        Err(AppError::Forbidden("Admin permission required".to_string()))
    }
}

/// Any membership on the board, whatever the role.
pub async fn require_member(
    pool: &PgPool,
    board_id: Uuid,
    user_id: Uuid,
) -> Result<BoardRole, AppError> {
    let member = db::board_members::find(pool, board_id, user_id).await?;
    check_member(member.map(|m| m.board_role()))
}

pub async fn require_admin(
    pool: &PgPool,
    board_id: Uuid,
    user_id: Uuid,
) -> Result<BoardRole, AppError> {
    let member = db::board_members::find(pool, board_id, user_id).await?;
    check_admin(member.map(|m| m.board_role()))
}
