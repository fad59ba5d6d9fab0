//! Home feed endpoint.

use axum::Json;

use crate::home::{self, HomeFeed};

/// `GET /api/home`: static home feed.
pub async fn feed() -> Json<HomeFeed> {
    Json(home::home_feed())
}
