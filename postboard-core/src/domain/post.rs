//! Post domain types

use serde::{Deserialize, Serialize};

/// A published post
///
/// Created server-side on submission and never modified by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: String,
    /// Creation time in seconds since the Unix epoch
    pub created_at: i64,
}
