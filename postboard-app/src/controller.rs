//! View actions
//!
//! Fetch whatever a route needs and describe the result. Failures never
//! escape: they become error views.

use postboard_client::ApiClient;
use tracing::{info, warn};

use crate::view::View;

pub const LIST_LOADING: &str = "Loading posts…";
pub const DETAIL_LOADING: &str = "Loading post…";

const LIST_HEADING: &str = "Latest Posts";
const DETAIL_HEADING: &str = "Post";

/// Build the post list view
pub async fn list_view(client: &ApiClient) -> View {
    match client.list_posts().await {
        Ok(posts) => {
            info!("Loaded {} post(s)", posts.len());
            View::posts(&posts)
        }
        Err(e) => {
            warn!("Failed to load posts: {}", e);
            View::error(LIST_HEADING, &e)
        }
    }
}

/// Build the detail view for one post
pub async fn detail_view(client: &ApiClient, id: &str) -> View {
    match client.get_post(id).await {
        Ok(post) => View::post(&post, client.image_url(&post.id)),
        Err(e) => {
            warn!("Failed to load post {}: {}", id, e);
            View::error(DETAIL_HEADING, &e)
        }
    }
}
