use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::{ActivityDetails, ActivityEntry};

pub const UNKNOWN_USER: &str = "Unknown User";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedUser {
    pub id: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
}

/// An activity ready for display, with a synthesized `message`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedActivity {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub user: FormattedUser,
    pub action: String,
    #[serde(rename = "entityType")]
    pub entity_type: String,
    pub details: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_title: Option<String>,
    pub message: String,
}

/// Render one entry. Pure and total: missing users and details fall back to defaults.
pub fn format(entry: &ActivityEntry) -> FormattedActivity {
    let activity = &entry.activity;

    let username = entry
        .username
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_USER)
        .to_string();

    let details = match &activity.details {
        Value::Null => Value::Object(Map::new()),
        other => other.clone(),
    };

    let message = message(&username, &activity.typed_details());

    FormattedActivity {
        id: activity.id,
        timestamp: activity.created_at,
        user: FormattedUser {
            id: activity.user_id,
            username,
            avatar_url: entry.avatar_url.clone(),
        },
        action: activity.action_type.clone(),
        entity_type: activity.entity_type.clone(),
        details,
        board_title: entry.board_title.clone(),
        message,
    }
}

/// Human-readable sentence for an action performed by `username`.
pub fn message(username: &str, details: &ActivityDetails) -> String {
    match details {
        ActivityDetails::CreateBoard(_) => format!("{username} created this board"),
        ActivityDetails::CreateList(d) => format!("{username} created list \"{}\"", d.title),
        ActivityDetails::CreateCard(d) => format!("{username} created card \"{}\"", d.title),
        ActivityDetails::MoveCard(d) => format!(
            "{username} moved card \"{}\" from \"{}\" to \"{}\"",
            d.card_title, d.source_list_title, d.target_list_title
        ),
        // An update with no flags set still renders, with an empty field list.
        ActivityDetails::UpdateCard(d) => format!(
            "{username} updated {} on card \"{}\"",
            d.changed_fields().join(", "),
            d.card_title
        ),
        ActivityDetails::AddMemberToCard(d) => format!(
            "{username} assigned {} to card \"{}\"",
            d.target_username, d.card_title
        ),
        ActivityDetails::RemoveMemberFromCard(d) => format!(
            "{username} removed {} from card \"{}\"",
            d.target_username, d.card_title
        ),
        ActivityDetails::CommentOnCard(d) => {
            format!("{username} commented on card \"{}\"", d.card_title)
        }
        ActivityDetails::Other { .. } => format!("{username} performed an action"),
    }
}
