pub mod activity;
pub mod board_member;

pub use activity::{
    ActionType, Activity, ActivityDetails, ActivityEntry, CardMemberDetails, CardRefDetails,
    EntityType, MoveCardDetails, NewActivity, TitleDetails, UpdateCardDetails,
};
pub use board_member::{BoardMember, BoardRole};
