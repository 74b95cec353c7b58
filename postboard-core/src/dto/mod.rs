//! Data Transfer Objects for the posts API
//!
//! Request and response bodies exactly as they appear on the wire.

pub mod image;
pub mod job;
pub mod post;
