pub mod activities;
pub mod board_members;
