pub mod activities;
pub mod root;
