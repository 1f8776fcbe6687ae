use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context;
use async_trait::async_trait;
use axum::body::Bytes;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{photo::Photo, photoz_service::PhotozService};

const PAYLOAD_EXTENSION: &str = "bin";
const SIDECAR_EXTENSION: &str = "json";

/// Keeps each photo as `{id}.bin` plus a `{id}.json` metadata sidecar under
/// one directory. Metadata is indexed in memory; payloads are read on demand.
pub struct DiskPhotoStore {
    root: PathBuf,
    index: scc::HashMap<String, Photo>, // metadata only, `data` left empty
}

impl DiskPhotoStore {
    pub async fn open(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root: PathBuf = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("Could not create storage directory {}", root.display()))?;

        let index = scc::HashMap::new();
        let mut entries = tokio::fs::read_dir(&root)
            .await
            .with_context(|| format!("Could not read storage directory {}", root.display()))?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SIDECAR_EXTENSION) {
                continue;
            }

            let raw = match tokio::fs::read(&path).await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(error = ?e, path = %path.display(), "Could not read photo sidecar; skipping");
                    continue;
                }
            };

            let photo: Photo = match serde_json::from_slice(&raw) {
                Ok(photo) => photo,
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Malformed photo sidecar; skipping");
                    continue;
                }
            };

            // Ids only come from file names this store wrote itself.
            if path.file_stem().and_then(|stem| stem.to_str()) != Some(photo.id.as_str()) {
                warn!(path = %path.display(), photo_id = %photo.id, "Sidecar id does not match its file name; skipping");
                continue;
            }

            let _ = index.insert_async(photo.id.clone(), photo).await;
        }

        info!(root = %root.display(), photos = index.len(), "Disk photo store opened");

        Ok(DiskPhotoStore { root, index })
    }

    fn payload_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.{PAYLOAD_EXTENSION}"))
    }

    fn sidecar_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.{SIDECAR_EXTENSION}"))
    }

    /// Deletes `path`; a file that is already gone counts as deleted.
    async fn remove_file_if_present(path: &Path) -> anyhow::Result<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "Photo file already deleted");
                Ok(())
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("Could not delete photo file {}", path.display()))),
        }
    }
}

#[async_trait]
impl PhotozService for DiskPhotoStore {
    async fn list(&self) -> Vec<Photo> {
        let mut photos: Vec<Photo> = Vec::with_capacity(self.index.len());
        self.index
            .iter_async(|_, photo| {
                photos.push(photo.clone());
                true
            })
            .await;
        photos
    }

    async fn get(&self, id: &str) -> Option<Photo> {
        // Only ids present in the index ever reach the filesystem.
        let photo = self.index.read_async(id, |_, photo| photo.clone()).await?;

        match tokio::fs::read(self.payload_path(&photo.id)).await {
            Ok(data) => Some(photo.with_data(Bytes::from(data))),
            Err(e) => {
                error!(error = ?e, photo_id = %photo.id, "Photo payload missing from disk");
                None
            }
        }
    }

    async fn save(
        &self,
        filename: Option<String>,
        content_type: String,
        data: Bytes,
    ) -> anyhow::Result<Photo> {
        let mut id = Uuid::new_v4().to_string();
        while self.index.read_async(&id, |_, _| ()).await.is_some() {
            id = Uuid::new_v4().to_string();
        }

        let photo = Photo::new(id, filename, content_type, data);
        let payload_path = self.payload_path(&photo.id);
        let sidecar_path = self.sidecar_path(&photo.id);

        tokio::fs::write(&payload_path, &photo.data)
            .await
            .with_context(|| format!("Could not write photo payload {}", payload_path.display()))?;

        let sidecar = serde_json::to_vec_pretty(&photo)?;
        if let Err(e) = tokio::fs::write(&sidecar_path, sidecar).await {
            if let Err(cleanup) = Self::remove_file_if_present(&payload_path).await {
                error!(error = ?cleanup, "Orphaned photo payload after failed sidecar write");
            }
            return Err(anyhow::Error::new(e).context(format!(
                "Could not write photo sidecar {}",
                sidecar_path.display()
            )));
        }

        if self
            .index
            .insert_async(photo.id.clone(), photo.clone().with_data(Bytes::new()))
            .await
            .is_err()
        {
            return Err(anyhow::anyhow!("Photo id {} already indexed", photo.id));
        }

        Ok(photo)
    }

    async fn remove(&self, id: &str) -> anyhow::Result<Option<Photo>> {
        let Some((id, photo)) = self.index.remove_async(id).await else {
            return Ok(None);
        };

        // The sidecar is what brings a record back on the next open.
        if let Err(e) = Self::remove_file_if_present(&self.sidecar_path(&id)).await {
            let _ = self.index.insert_async(id, photo).await;
            return Err(e);
        }
        Self::remove_file_if_present(&self.payload_path(&id))
            .await
            .with_context(|| format!("Photo {id} deleted but its payload was left behind"))?;

        Ok(Some(photo))
    }

    fn count(&self) -> usize {
        self.index.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let saved = {
            let store = DiskPhotoStore::open(dir.path()).await.unwrap();
            store
                .save(
                    Some("cat.png".to_string()),
                    "image/png".to_string(),
                    Bytes::from_static(&[0x89, 0x50, 0x4e, 0x47]),
                )
                .await
                .unwrap()
        };

        let reopened = DiskPhotoStore::open(dir.path()).await.unwrap();
        assert_eq!(reopened.count(), 1);

        let fetched = reopened.get(&saved.id).await.unwrap();
        assert_eq!(fetched.filename.as_deref(), Some("cat.png"));
        assert_eq!(fetched.content_type, "image/png");
        assert_eq!(fetched.data, Bytes::from_static(&[0x89, 0x50, 0x4e, 0x47]));
    }

    #[tokio::test]
    async fn remove_deletes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskPhotoStore::open(dir.path()).await.unwrap();
        let saved = store
            .save(None, "text/plain".to_string(), Bytes::from_static(b"hello"))
            .await
            .unwrap();

        assert!(store.payload_path(&saved.id).exists());
        assert!(store.sidecar_path(&saved.id).exists());

        let removed = store.remove(&saved.id).await.unwrap();
        assert!(removed.is_some());
        assert!(!store.payload_path(&saved.id).exists());
        assert!(!store.sidecar_path(&saved.id).exists());
        assert!(store.get(&saved.id).await.is_none());
        assert!(store.remove(&saved.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_sidecars_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), b"{ not json").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let store = DiskPhotoStore::open(dir.path()).await.unwrap();
        assert_eq!(store.count(), 0);
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn missing_payload_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskPhotoStore::open(dir.path()).await.unwrap();
        let saved = store
            .save(None, "text/plain".to_string(), Bytes::from_static(b"hello"))
            .await
            .unwrap();

        std::fs::remove_file(store.payload_path(&saved.id)).unwrap();
        assert!(store.get(&saved.id).await.is_none());
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn failed_sidecar_delete_keeps_the_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskPhotoStore::open(dir.path()).await.unwrap();
        let saved = store
            .save(None, "text/plain".to_string(), Bytes::from_static(b"hello"))
            .await
            .unwrap();

        // A non-empty directory in place of the sidecar cannot be unlinked.
        let sidecar = store.sidecar_path(&saved.id);
        std::fs::remove_file(&sidecar).unwrap();
        std::fs::create_dir(&sidecar).unwrap();
        std::fs::write(sidecar.join("pinned"), b"x").unwrap();

        assert!(store.remove(&saved.id).await.is_err());
        assert_eq!(store.count(), 1);
        assert!(store.payload_path(&saved.id).exists());
        let fetched = store.get(&saved.id).await.unwrap();
        assert_eq!(fetched.data, Bytes::from_static(b"hello"));
    }

    #[tokio::test]
    async fn already_missing_files_do_not_fail_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskPhotoStore::open(dir.path()).await.unwrap();
        let saved = store
            .save(None, "text/plain".to_string(), Bytes::from_static(b"hello"))
            .await
            .unwrap();

        std::fs::remove_file(store.payload_path(&saved.id)).unwrap();
        assert!(store.remove(&saved.id).await.unwrap().is_some());
        assert!(!store.sidecar_path(&saved.id).exists());
        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn sidecars_with_foreign_ids_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let escaping = Photo::new(
            "../escape".to_string(),
            None,
            "text/plain".to_string(),
            Bytes::new(),
        );
        std::fs::write(
            dir.path().join("innocent.json"),
            serde_json::to_vec(&escaping).unwrap(),
        )
        .unwrap();

        let store = DiskPhotoStore::open(dir.path()).await.unwrap();
        assert_eq!(store.count(), 0);
        assert!(store.get("../escape").await.is_none());
        assert!(store.remove("../escape").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_ids_never_touch_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskPhotoStore::open(dir.path().join("photos")).await.unwrap();
        assert!(store.root.ends_with("photos"));
        assert!(store.get("../../etc/passwd").await.is_none());
        assert!(store.remove("../secret").await.unwrap().is_none());
    }
}
