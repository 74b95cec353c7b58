//! Domain types
//!
//! Entities the client reasons about: posts, navigation routes, and the
//! image-effect jobs spawned after a post is created.

pub mod effect;
pub mod job;
pub mod post;
pub mod route;
