pub mod admins;
pub mod participants;
pub mod role;
pub mod status;
pub mod workshops;

pub use admins::AdminRow;
pub use participants::{ParticipantExportRow, ParticipantIdentityRow, ParticipantRow};
pub use role::Role;
pub use status::{ActorStatus, ParticipantStatus};
pub use workshops::WorkshopRow;
