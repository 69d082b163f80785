pub mod auth;

pub use auth::{ApiSession, PageSession};
