use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::activity::{ActivityLog, ActivityStore, FormattedActivity};
use crate::error::AppError;
use crate::models::{ActivityDetails, EntityType, NewActivity};

#[derive(Debug, Parser)]
#[command(name = "taskboard-activity", version, about = "Task board activity log")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Max activities to print (defaults: 20 for boards and users, 10 for cards)
    #[arg(short, long, global = true)]
    pub limit: Option<i64>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Recent activity on a board
    Board {
        board_id: Uuid,
        /// Only show the feed if this user is a member of the board
        #[arg(long = "as", value_name = "USER_ID")]
        viewer: Option<Uuid>,
    },
    /// Recent activity on a card
    Card { card_id: Uuid },
    /// Recent activity by a user across all boards
    User { user_id: Uuid },
    /// Record one activity
    Record(RecordArgs),
}

#[derive(Debug, Args)]
pub struct RecordArgs {
    #[arg(long)]
    pub user: Uuid,
    #[arg(long)]
    pub board: Uuid,
    #[arg(long)]
    pub card: Option<Uuid>,
    #[arg(long)]
    pub list: Option<Uuid>,
    /// Action tag, e.g. move_card
    #[arg(long)]
    pub action: String,
    /// board, list or card
    #[arg(long)]
    pub entity_type: EntityType,
    #[arg(long)]
    pub entity_id: Uuid,
    /// JSON object with the action's details
    #[arg(long)]
    pub details: Option<String>,
}

impl RecordArgs {
    pub fn to_new_activity(&self) -> Result<NewActivity, AppError> {
        let fields = match &self.details {
            Some(raw) => match serde_json::from_str::<Value>(raw)
                .map_err(|e| AppError::BadRequest(format!("Invalid --details JSON: {e}")))?
            {
                Value::Object(fields) => fields,
                _ => {
                    return Err(AppError::BadRequest(
                        "--details must be a JSON object".to_string(),
                    ));
                }
            },
            None => Map::new(),
        };

        let details = ActivityDetails::custom(self.action.as_str(), fields);

        let mut new = NewActivity::new(
            self.user,
            self.board,
            self.entity_type,
            self.entity_id,
            details,
        );
        new.card_id = self.card;
        new.list_id = self.list;
        Ok(new)
    }
}

pub async fn run<S: ActivityStore>(cli: Cli, log: &ActivityLog<S>) -> Result<(), AppError> {
    let feed = match &cli.command {
        Command::Board { board_id, viewer } => match viewer {
            Some(viewer) => log.board_feed_for(*viewer, *board_id, cli.limit).await?,
            None => log.board_feed(*board_id, cli.limit).await?,
        },
        Command::Card { card_id } => log.card_feed(*card_id, cli.limit).await?,
        Command::User { user_id } => log.user_feed(*user_id, cli.limit).await?,
        Command::Record(args) => {
            let activity = log.record(&args.to_new_activity()?).await?;
            println!("{}", to_json(&activity)?);
            return Ok(());
        }
    };

    match cli.format {
        OutputFormat::Json => println!("{}", to_json(&feed)?),
        OutputFormat::Text => {
            for line in feed.iter().map(render_line) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

pub fn render_line(activity: &FormattedActivity) -> String {
    let timestamp = activity.timestamp.format("%Y-%m-%d %H:%M:%S");
    match &activity.board_title {
        Some(board) => format!("{timestamp}  [{board}] {}", activity.message),
        None => format!("{timestamp}  {}", activity.message),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Internal(format!("Failed to encode output: {e}")))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use clap::CommandFactory;
    use serde_json::json;

    use super::*;
    use crate::activity::FormattedUser;
    use crate::models::ActionType;

    #[test]
    fn command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let board = Uuid::now_v7();
        let viewer = Uuid::now_v7();
        let cli = Cli::try_parse_from([
            "taskboard-activity",
            "board",
            &board.to_string(),
            "--as",
            &viewer.to_string(),
            "--limit",
            "5",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.limit, Some(5));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Command::Board { board_id, viewer: Some(v) } if board_id == board && v == viewer
        ));
    }

    #[test]
    fn record_args_keep_details_verbatim() {
        let card = Uuid::now_v7();
        let cli = Cli::try_parse_from([
            "taskboard-activity",
            "record",
            "--user",
            &Uuid::now_v7().to_string(),
            "--board",
            &Uuid::now_v7().to_string(),
            "--card",
            &card.to_string(),
            "--action",
            "move_card",
            "--entity-type",
            "card",
            "--entity-id",
            &card.to_string(),
            "--details",
            r#"{"cardTitle":"Fix bug","sourceListTitle":"To Do","targetListTitle":"Done","position":3}"#,
        ])
        .unwrap();

        let Command::Record(args) = cli.command else {
            panic!("expected record command");
        };
        let new = args.to_new_activity().unwrap();
        assert_eq!(new.card_id, Some(card));
        assert_eq!(new.list_id, None);
        assert_eq!(new.action_type(), ActionType::MoveCard);
        assert_eq!(
            new.details.to_value(),
            json!({
                "cardTitle": "Fix bug",
                "sourceListTitle": "To Do",
                "targetListTitle": "Done",
                "position": 3
            })
        );
    }

    #[test]
    fn record_args_reject_non_object_details() {
        let args = RecordArgs {
            user: Uuid::now_v7(),
            board: Uuid::now_v7(),
            card: None,
            list: None,
            action: "create_board".to_string(),
            entity_type: EntityType::Board,
            entity_id: Uuid::now_v7(),
            details: Some("[1,2]".to_string()),
        };
        assert!(matches!(args.to_new_activity(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn rejects_unknown_entity_type() {
        let result = Cli::try_parse_from([
            "taskboard-activity",
            "record",
            "--user",
            &Uuid::now_v7().to_string(),
            "--board",
            &Uuid::now_v7().to_string(),
            "--action",
            "create_board",
            "--entity-type",
            "column",
            "--entity-id",
            &Uuid::now_v7().to_string(),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn text_lines_include_board_title_when_present() {
        let mut activity = FormattedActivity {
            id: Uuid::now_v7(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            user: FormattedUser {
                id: Uuid::now_v7(),
                username: "alice".to_string(),
                avatar_url: None,
            },
            action: "create_board".to_string(),
            entity_type: "board".to_string(),
            details: json!({}),
            board_title: None,
            message: "alice created this board".to_string(),
        };
        assert_eq!(
            render_line(&activity),
            "2024-03-01 09:30:00  alice created this board"
        );

        activity.board_title = Some("Roadmap".to_string());
        assert_eq!(
            render_line(&activity),
            "2024-03-01 09:30:00  [Roadmap] alice created this board"
        );
    }
}
