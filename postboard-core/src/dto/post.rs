//! Post DTOs

use serde::{Deserialize, Serialize};

/// Body of `POST /api/posts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub body: String,
}
