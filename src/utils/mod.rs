pub mod auth;
pub mod notifications;
pub mod posts;
pub mod search;
pub mod users;
pub mod vacations;
