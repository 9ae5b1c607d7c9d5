use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct BoardMember {
    pub board_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl BoardMember {
    pub fn board_role(&self) -> BoardRole {
        BoardRole::from_role(&self.role)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardRole {
    Admin,
    Member,
}

impl BoardRole {
    /// Only the literal `admin` grants admin rights; every other role is a plain member.
    pub fn from_role(role: &str) -> Self {
        match role {
            "admin" => BoardRole::Admin,
            _ => BoardRole::Member,
        }
    }

    pub fn is_admin(self) -> bool {
        self == BoardRole::Admin
    }
}
