pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod store;

pub use config::Config;
pub use error::StockroomError;
pub use store::{Collection, DocumentStore};
