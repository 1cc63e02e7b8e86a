pub mod activities;
pub mod activity_api_models;
pub mod activity_participants;
pub mod page;

pub use activities::ActivitiesRow;
pub use activity_api_models::{Activity, ActivityRequest, Participant, ParticipantRequest};
pub use activity_participants::ActivityParticipantsRow;
pub use page::Page;
