use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A persisted row of the `activities` table. Rows are never updated or deleted.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub board_id: Uuid,
    pub card_id: Option<Uuid>,
    pub list_id: Option<Uuid>,
    pub action_type: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub details: Value,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    pub fn action(&self) -> ActionType {
        ActionType::from(self.action_type.as_str())
    }

    pub fn typed_details(&self) -> ActivityDetails {
        ActivityDetails::from_stored(&self.action(), &self.details)
    }
}

/// An activity joined with the acting user (and, for user feeds, the board title).
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub activity: Activity,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    #[sqlx(default)]
    pub board_title: Option<String>,
}

impl From<Activity> for ActivityEntry {
    fn from(activity: Activity) -> Self {
        Self {
            activity,
            username: None,
            avatar_url: None,
            board_title: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionType {
    CreateBoard,
    CreateList,
    CreateCard,
    MoveCard,
    UpdateCard,
    AddMemberToCard,
    RemoveMemberFromCard,
    CommentOnCard,
    Other(String),
}

impl ActionType {
    pub fn as_str(&self) -> &str {
        match self {
            ActionType::CreateBoard => "create_board",
            ActionType::CreateList => "create_list",
            ActionType::CreateCard => "create_card",
            ActionType::MoveCard => "move_card",
            ActionType::UpdateCard => "update_card",
            ActionType::AddMemberToCard => "add_member_to_card",
            ActionType::RemoveMemberFromCard => "remove_member_from_card",
            ActionType::CommentOnCard => "comment_on_card",
            ActionType::Other(tag) => tag,
        }
    }
}

impl From<&str> for ActionType {
    fn from(tag: &str) -> Self {
        match tag {
            "create_board" => ActionType::CreateBoard,
            "create_list" => ActionType::CreateList,
            "create_card" => ActionType::CreateCard,
            "move_card" => ActionType::MoveCard,
            "update_card" => ActionType::UpdateCard,
            "add_member_to_card" => ActionType::AddMemberToCard,
            "remove_member_from_card" => ActionType::RemoveMemberFromCard,
            "comment_on_card" => ActionType::CommentOnCard,
            other => ActionType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Board,
    List,
    Card,
}

impl EntityType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Board => "board",
            EntityType::List => "list",
            EntityType::Card => "card",
        }
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "board" => Ok(EntityType::Board),
            "list" => Ok(EntityType::List),
            "card" => Ok(EntityType::Card),
            other => Err(format!("Unknown entity type: {other}")),
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `title` of the created board, list or card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleDetails {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MoveCardDetails {
    #[serde(deserialize_with = "lenient_string")]
    pub card_title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub source_list_title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub target_list_title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateCardDetails {
    #[serde(deserialize_with = "lenient_string")]
    pub card_title: String,
    #[serde(deserialize_with = "truthy")]
    pub title_changed: bool,
    #[serde(deserialize_with = "truthy")]
    pub description_changed: bool,
    #[serde(deserialize_with = "truthy")]
    pub due_date_changed: bool,
    #[serde(deserialize_with = "truthy")]
    pub labels_changed: bool,
}

impl UpdateCardDetails {
    /// Names of the changed fields, in display order.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        [
            (self.title_changed, "title"),
            (self.description_changed, "description"),
            (self.due_date_changed, "due date"),
            (self.labels_changed, "labels"),
        ]
        .into_iter()
        .filter_map(|(changed, name)| changed.then_some(name))
        .collect()
    }
}

/// Card membership changes: the card and the user added or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardMemberDetails {
    #[serde(deserialize_with = "lenient_string")]
    pub card_title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub target_username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardRefDetails {
    #[serde(deserialize_with = "lenient_string")]
    pub card_title: String,
}

/// The `details` payload of an activity, keyed by its action type.
///
/// Known actions declare their fields, so a caller cannot record a `move_card`
/// without naming both lists. Unknown actions, and raw objects that must be
/// stored exactly as received, go through [`ActivityDetails::Other`].
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityDetails {
    CreateBoard(TitleDetails),
    CreateList(TitleDetails),
    CreateCard(TitleDetails),
    MoveCard(MoveCardDetails),
    UpdateCard(UpdateCardDetails),
    AddMemberToCard(CardMemberDetails),
    RemoveMemberFromCard(CardMemberDetails),
    CommentOnCard(CardRefDetails),
    Other {
        action_type: String,
        fields: Map<String, Value>,
    },
}

impl ActivityDetails {
    /// Free-form details, stored verbatim. A known tag still formats with its template.
    pub fn custom(action_type: impl Into<String>, fields: Map<String, Value>) -> Self {
        ActivityDetails::Other {
            action_type: action_type.into(),
            fields,
        }
    }

    pub fn action_type(&self) -> ActionType {
        match self {
            ActivityDetails::CreateBoard(_) => ActionType::CreateBoard,
            ActivityDetails::CreateList(_) => ActionType::CreateList,
            ActivityDetails::CreateCard(_) => ActionType::CreateCard,
            ActivityDetails::MoveCard(_) => ActionType::MoveCard,
            ActivityDetails::UpdateCard(_) => ActionType::UpdateCard,
            ActivityDetails::AddMemberToCard(_) => ActionType::AddMemberToCard,
            ActivityDetails::RemoveMemberFromCard(_) => ActionType::RemoveMemberFromCard,
            ActivityDetails::CommentOnCard(_) => ActionType::CommentOnCard,
            ActivityDetails::Other { action_type, .. } => ActionType::from(action_type.as_str()),
        }
    }

    /// JSON object stored in the `details` column.
    pub fn to_value(&self) -> Value {
        match self {
            ActivityDetails::CreateBoard(d)
            | ActivityDetails::CreateList(d)
            | ActivityDetails::CreateCard(d) => object(d),
            ActivityDetails::MoveCard(d) => object(d),
            ActivityDetails::UpdateCard(d) => object(d),
            ActivityDetails::AddMemberToCard(d) | ActivityDetails::RemoveMemberFromCard(d) => {
                object(d)
            }
            ActivityDetails::CommentOnCard(d) => object(d),
            ActivityDetails::Other { fields, .. } => Value::Object(fields.clone()),
        }
    }

    /// Decode a stored `details` column. Never fails: missing text fields come back
    /// empty, missing flags come back `false`, and a non-object column reads as `{}`.
    pub fn from_stored(action: &ActionType, details: &Value) -> Self {
        let empty = Value::Object(Map::new());
        let details = if details.is_object() { details } else { &empty };

        match action {
            ActionType::CreateBoard => ActivityDetails::CreateBoard(decode(details)),
            ActionType::CreateList => ActivityDetails::CreateList(decode(details)),
            ActionType::CreateCard => ActivityDetails::CreateCard(decode(details)),
            ActionType::MoveCard => ActivityDetails::MoveCard(decode(details)),
            ActionType::UpdateCard => ActivityDetails::UpdateCard(decode(details)),
            ActionType::AddMemberToCard => ActivityDetails::AddMemberToCard(decode(details)),
            ActionType::RemoveMemberFromCard => {
                ActivityDetails::RemoveMemberFromCard(decode(details))
            }
            ActionType::CommentOnCard => ActivityDetails::CommentOnCard(decode(details)),
            ActionType::Other(tag) => ActivityDetails::Other {
                action_type: tag.clone(),
                fields: details.as_object().cloned().unwrap_or_default(),
            },
        }
    }
}

/// Parameters for recording one activity. The action type follows from `details`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub user_id: Uuid,
    pub board_id: Uuid,
    pub card_id: Option<Uuid>,
    pub list_id: Option<Uuid>,
    pub entity_type: EntityType,
    pub entity_id: Uuid,
    pub details: ActivityDetails,
}

impl NewActivity {
    pub fn new(
        user_id: Uuid,
        board_id: Uuid,
        entity_type: EntityType,
        entity_id: Uuid,
        details: ActivityDetails,
    ) -> Self {
        Self {
            user_id,
            board_id,
            card_id: None,
            list_id: None,
            entity_type,
            entity_id,
            details,
        }
    }

    pub fn on_card(mut self, card_id: Uuid) -> Self {
        self.card_id = Some(card_id);
        self
    }

    pub fn in_list(mut self, list_id: Uuid) -> Self {
        self.list_id = Some(list_id);
        self
    }

    pub fn action_type(&self) -> ActionType {
        self.details.action_type()
    }
}

fn object<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|_| Value::Object(Map::new()))
}

fn decode<T: DeserializeOwned + Default>(details: &Value) -> T {
    T::deserialize(details).unwrap_or_default()
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        other => other.to_string(),
    })
}

fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}
