pub mod admin_guards;
pub mod admin_lifecycle_service;
pub mod identity_service;
pub mod participant_service;
pub mod permissions;
pub mod workshop_service;
