use async_trait::async_trait;
use axum::body::Bytes;
use tracing::warn;
use uuid::Uuid;

use super::{photo::Photo, photoz_service::PhotozService};

#[derive(Default)]
pub struct MemoryPhotoStore {
    photos: scc::HashMap<String, Photo>, // read/write
}

impl MemoryPhotoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PhotozService for MemoryPhotoStore {
    async fn list(&self) -> Vec<Photo> {
        let mut photos: Vec<Photo> = Vec::with_capacity(self.photos.len());
        self.photos
            .iter_async(|_, photo| {
                photos.push(photo.clone());
                true
            })
            .await;
        photos
    }

    async fn get(&self, id: &str) -> Option<Photo> {
        self.photos.read_async(id, |_, photo| photo.clone()).await
    }

    async fn save(
        &self,
        filename: Option<String>,
        content_type: String,
        data: Bytes,
    ) -> anyhow::Result<Photo> {
        let mut photo = Photo::new(Uuid::new_v4().to_string(), filename, content_type, data);
        loop {
            match self.photos.insert_async(photo.id.clone(), photo.clone()).await {
                Ok(()) => return Ok(photo),
                Err((taken_id, _)) => {
                    warn!(photo_id = %taken_id, "Generated photo id already taken; retrying");
                    photo.id = Uuid::new_v4().to_string();
                }
            }
        }
    }

    async fn remove(&self, id: &str) -> anyhow::Result<Option<Photo>> {
        Ok(self.photos.remove_async(id).await.map(|(_, photo)| photo))
    }

    fn count(&self) -> usize {
        self.photos.len()
    }
}
