pub mod admin_repo;
pub mod participant_repo;
pub mod workshop_repo;
