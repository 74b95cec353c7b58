//! View descriptions
//!
//! Views are plain values computed from application state. Renderers in
//! [`html`] (and the terminal adapter in the binary) turn them into output;
//! nothing here touches a display.

pub mod format;
pub mod html;

use postboard_client::ClassifiedError;
use postboard_core::domain::effect::Effect;
use postboard_core::domain::post::Post;
use postboard_core::domain::route::Route;

/// Everything the content area can show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Request in flight
    Loading { message: String },
    /// The post list came back empty
    NoPosts,
    /// Posts in server order
    PostList { rows: Vec<PostRow> },
    PostDetail(PostDetail),
    Create(CreateFormView),
    Error(ErrorView),
}

/// One row of the post list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    pub title: String,
    pub link: Route,
    /// Creation time, already formatted for display
    pub published: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetail {
    pub id: String,
    pub title: String,
    /// Shown verbatim, whitespace preserved
    pub body: String,
    /// Removed when the image fails to load
    pub image: Option<ImageRef>,
    pub back: Route,
}

/// Reference to an optional, decorative image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
}

/// A failed load, with a way out to the create form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub heading: String,
    /// Rendered [`ClassifiedError`]
    pub detail: String,
    pub create_link: Route,
}

/// The create form as currently filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFormView {
    pub title: String,
    pub body: String,
    pub image_name: Option<String>,
    pub effect: Effect,
    /// Effect choices only appear while an image is attached
    pub effects_visible: bool,
    pub status: Option<StatusLine>,
}

/// Inline status under the create form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Progress(String),
    Success(String),
    Error(String),
}

impl StatusLine {
    pub fn text(&self) -> &str {
        match self {
            StatusLine::Progress(text) | StatusLine::Success(text) | StatusLine::Error(text) => {
                text
            }
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StatusLine::Error(_))
    }
}

impl View {
    pub fn loading(message: impl Into<String>) -> Self {
        View::Loading {
            message: message.into(),
        }
    }

    /// List view for a fetched collection
    pub fn posts(posts: &[Post]) -> Self {
        if posts.is_empty() {
            return View::NoPosts;
        }

        let rows = posts
            .iter()
            .map(|post| PostRow {
                title: post.title.clone(),
                link: Route::detail(&post.id),
                published: format::format_timestamp(post.created_at),
            })
            .collect();
        View::PostList { rows }
    }

    /// Detail view for a fetched post
    pub fn post(post: &Post, image_src: String) -> Self {
        View::PostDetail(PostDetail {
            id: post.id.clone(),
            title: post.title.clone(),
            body: post.body.clone(),
            image: Some(ImageRef {
                src: image_src,
                alt: format!("{} image", post.title),
            }),
            back: Route::List,
        })
    }

    /// Error view for a failed load
    pub fn error(heading: impl Into<String>, error: &ClassifiedError) -> Self {
        View::Error(ErrorView {
            heading: heading.into(),
            detail: error.to_string(),
            create_link: Route::New,
        })
    }

    /// The same view without its image, if it had one
    ///
    /// Returns `None` when there is nothing to remove.
    pub fn without_image(&self) -> Option<View> {
        match self {
            View::PostDetail(detail) if detail.image.is_some() => {
                Some(View::PostDetail(PostDetail {
                    image: None,
                    ..detail.clone()
                }))
            }
            _ => None,
        }
    }
}
