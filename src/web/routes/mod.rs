pub mod admins;
pub mod auth;
pub mod participants;
pub mod workshops;
