//! Image endpoints

use postboard_core::dto::image::ImageFile;
use postboard_core::encoding::encode_component;

use crate::ApiClient;
use crate::error::Result;
use crate::transport::{FilePart, HttpRequest};

/// Multipart field the server reads the upload from
const UPLOAD_FIELD: &str = "file";

impl ApiClient {
    // =============================================================================
    // Images
    // =============================================================================

    /// URL of a post's image, usable as an image source
    ///
    /// Nothing is fetched; the image may not exist.
    pub fn image_url(&self, post_id: &str) -> String {
        self.url(&format!("/images/{}", encode_component(post_id)))
    }

    /// Whether a post's image can currently be fetched
    ///
    /// Any failure, including a missing image, counts as unavailable.
    pub async fn image_available(&self, post_id: &str) -> bool {
        self.request_ok(HttpRequest::get(self.image_url(post_id)))
            .await
            .is_ok()
    }

    /// Upload an image for a post
    ///
    /// Any 2xx response counts as success; its body is not inspected.
    pub async fn upload_image(&self, post_id: &str, image: &ImageFile) -> Result<()> {
        let part = FilePart {
            field: UPLOAD_FIELD.to_string(),
            file_name: image.file_name.clone(),
            content_type: image.content_type.clone(),
            bytes: image.bytes.clone(),
        };
        self.request_ok(HttpRequest::post_file(self.image_url(post_id), part))
            .await
    }
}
