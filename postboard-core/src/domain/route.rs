//! Navigation routes
//!
//! A route is derived from the location fragment and has no lifetime of its
//! own; it is recomputed on every navigation.

use std::fmt;

use crate::encoding::{decode_component, encode_component};

const NEW_PREFIX: &str = "#/new";
const POST_PREFIX: &str = "#/post/";

/// The view a location fragment asks for
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Route {
    /// Post list, the fallback for any unrecognised fragment
    #[default]
    List,
    /// Create form
    New,
    /// Single post by id
    Detail(String),
}

impl Route {
    /// Parse a location fragment such as `#/post/abc`
    ///
    /// Prefix rules are checked in order: `#/new`, then `#/post/`; anything
    /// else, including an empty fragment, is the list.
    pub fn parse(fragment: &str) -> Self {
        if fragment.starts_with(NEW_PREFIX) {
            Route::New
        } else if let Some(rest) = fragment.strip_prefix(POST_PREFIX) {
            Route::Detail(decode_component(rest))
        } else {
            Route::List
        }
    }

    /// Canonical fragment for this route
    pub fn fragment(&self) -> String {
        match self {
            Route::List => "#/".to_string(),
            Route::New => NEW_PREFIX.to_string(),
            Route::Detail(id) => format!("{}{}", POST_PREFIX, encode_component(id)),
        }
    }

    /// Route to the detail view of a post
    pub fn detail(id: impl Into<String>) -> Self {
        Route::Detail(id.into())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fragment())
    }
}
