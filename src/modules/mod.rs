pub mod admins;
pub mod auth;
pub mod employers;
pub mod users;
