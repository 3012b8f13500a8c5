pub mod models;
pub mod error;
pub mod response;
pub mod store;
pub mod views;
pub mod likes;
pub mod subscriptions;
pub mod dashboard;
pub mod videos;
pub mod comments;
pub mod tweets;
pub mod users;
pub mod playlists;

pub use error::ApiError;
pub use response::{ApiResponse, ApiResult};
pub use store::Db;
