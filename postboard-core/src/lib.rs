//! Postboard Core
//!
//! Core types shared by the Postboard client crates.
//!
//! This crate contains:
//! - Domain types: posts, routes, effect jobs
//! - DTOs: request and response bodies exchanged with the posts API
//! - Encoding helpers for URL path segments and location fragments

pub mod domain;
pub mod dto;
pub mod encoding;
