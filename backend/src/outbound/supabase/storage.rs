//! Supabase Storage-backed `SymptomImageStore`.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use uuid::Uuid;

use super::client::{SupabaseClient, SupabaseFailure};
use crate::domain::ports::{ImageStoreError, SymptomImageStore};
use crate::domain::{SymptomImage, UserId};

/// Bucket used when none is configured.
pub const DEFAULT_IMAGE_BUCKET: &str = "symptom_images";

/// Uploads photos to a public bucket under `<user_id>/<uuid>.<ext>`.
#[derive(Debug, Clone)]
pub struct SupabaseImageStore {
    client: SupabaseClient,
    bucket: String,
}

impl SupabaseImageStore {
    pub fn new(client: SupabaseClient, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    fn public_url(&self, object_path: &str) -> Result<String, SupabaseFailure> {
        self.client
            .endpoint(&format!(
                "storage/v1/object/public/{}/{object_path}",
                self.bucket
            ))
            .map(String::from)
    }
}

fn object_path(user_id: UserId, object_id: Uuid, extension: &str) -> String {
    format!("{user_id}/{object_id}.{extension}")
}

fn map_failure(failure: SupabaseFailure) -> ImageStoreError {
    match failure {
        SupabaseFailure::Transport {
            message,
            timed_out: true,
        } => ImageStoreError::timeout(message),
        SupabaseFailure::Transport { message, .. } | SupabaseFailure::Decode { message } => {
            ImageStoreError::transport(message)
        }
        SupabaseFailure::UniqueViolation { message } => ImageStoreError::rejected(409_u16, message),
        SupabaseFailure::Status { status, message } => ImageStoreError::rejected(status, message),
    }
}

#[async_trait]
impl SymptomImageStore for SupabaseImageStore {
    async fn upload(
        &self,
        user_id: UserId,
        image: &SymptomImage,
    ) -> Result<String, ImageStoreError> {
        let path = object_path(user_id, Uuid::new_v4(), image.extension());
        let url = self
            .client
            .endpoint(&format!("storage/v1/object/{}/{path}", self.bucket))
            .map_err(map_failure)?;
        self.client
            .execute(
                self.client
                    .post(url)
                    .header(CONTENT_TYPE, image.content_type())
                    .header("x-upsert", "false")
                    .body(image.bytes().to_vec()),
            )
            .await
            .map_err(map_failure)?;
        self.public_url(&path).map_err(map_failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;
    use std::time::Duration;

    #[test]
    fn object_paths_are_user_scoped() {
        let id = Uuid::nil();
        assert_eq!(
            object_path(UserId::new(12).expect("id"), id, "jpg"),
            "12/00000000-0000-0000-0000-000000000000.jpg"
        );
    }

    #[test]
    fn public_urls_point_at_bucket() {
        let client = SupabaseClient::new(
            Url::parse("https://abc.supabase.co").expect("url"),
            "key",
            Duration::from_secs(10),
        )
        .expect("client");
        let store = SupabaseImageStore::new(client, DEFAULT_IMAGE_BUCKET);
        assert_eq!(
            store.public_url("12/a.jpg").expect("url"),
            "https://abc.supabase.co/storage/v1/object/public/symptom_images/12/a.jpg"
        );
    }

    #[test]
    fn timeouts_are_reported_separately() {
        let error = map_failure(SupabaseFailure::Transport {
            message: "deadline".to_owned(),
            timed_out: true,
        });
        assert_eq!(error, ImageStoreError::timeout("deadline"));
    }
}
