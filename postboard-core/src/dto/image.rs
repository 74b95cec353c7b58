//! Image upload DTOs

/// An image file attached to a new post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    /// MIME type, if known (e.g., "image/png")
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}
