//! Driven port for storing uploaded symptom photos.

use async_trait::async_trait;

use crate::domain::{SymptomImage, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by object storage adapters.
    pub enum ImageStoreError {
        /// Network transport failed before receiving a response.
        Transport { message: String } => "image upload transport failed: {message}",
        /// Upload exceeded the configured timeout.
        Timeout { message: String } => "image upload timed out: {message}",
        /// The store rejected the upload.
        Rejected { status: u16, message: String } =>
            "image upload rejected with status {status}: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SymptomImageStore: Send + Sync {
    /// Store `image` under the user's prefix and return its public URL.
    async fn upload(&self, user_id: UserId, image: &SymptomImage)
    -> Result<String, ImageStoreError>;
}
