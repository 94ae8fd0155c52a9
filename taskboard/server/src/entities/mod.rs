//! SeaORM entities for the `users`, `tasks` and `categories` tables.

pub mod category;
pub mod task;
pub mod user;
