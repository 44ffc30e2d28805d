//! # Storage Bucket
//!
//! A file bucket served the same way as a table: one task owns the objects and
//! answers requests sequentially. Uploads return the object's public URL.

use crate::error::StoreError;
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

type Reply<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum BucketRequest {
    Upload {
        key: String,
        bytes: Vec<u8>,
        respond_to: Reply<String>,
    },
    Download {
        key: String,
        respond_to: Reply<Option<Vec<u8>>>,
    },
    Remove {
        key: String,
        respond_to: Reply<()>,
    },
}

/// Server half of a bucket.
pub struct BucketActor {
    name: String,
    public_base_url: String,
    receiver: mpsc::Receiver<BucketRequest>,
    objects: HashMap<String, Vec<u8>>,
}

impl BucketActor {
    /// Creates the bucket and its client. Public URLs are
    /// `{public_base_url}/{name}/{key}`.
    pub fn new(
        name: impl Into<String>,
        public_base_url: impl Into<String>,
        buffer_size: usize,
    ) -> (Self, BucketClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            name: name.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            receiver,
            objects: HashMap::new(),
        };
        (actor, BucketClient { sender })
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, self.name, key)
    }

    fn upload(&mut self, key: String, bytes: Vec<u8>) -> Result<String, StoreError> {
        if key.is_empty() || key.starts_with('/') || key.split('/').any(|part| part == "..") {
            return Err(StoreError::InvalidObject(format!("bad object key: {key:?}")));
        }
        if bytes.is_empty() {
            return Err(StoreError::InvalidObject(format!("empty object: {key}")));
        }
        let url = self.public_url(&key);
        self.objects.insert(key, bytes);
        Ok(url)
    }

    pub async fn run(mut self) {
        let bucket = self.name.clone();
        info!(%bucket, "Bucket started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                BucketRequest::Upload { key, bytes, respond_to } => {
                    debug!(%bucket, %key, size = bytes.len(), "Upload");
                    let result = self.upload(key, bytes);
                    match &result {
                        Ok(url) => info!(%bucket, %url, objects = self.objects.len(), "Uploaded"),
                        Err(e) => warn!(%bucket, error = %e, "Upload failed"),
                    }
                    let _ = respond_to.send(result);
                }
                BucketRequest::Download { key, respond_to } => {
                    let object = self.objects.get(&key).cloned();
                    debug!(%bucket, %key, found = object.is_some(), "Download");
                    let _ = respond_to.send(Ok(object));
                }
                BucketRequest::Remove { key, respond_to } => {
                    let result = match self.objects.remove(&key) {
                        Some(_) => Ok(()),
                        None => Err(StoreError::NotFound(key.clone())),
                    };
                    debug!(%bucket, %key, removed = result.is_ok(), "Remove");
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(%bucket, objects = self.objects.len(), "Shutdown");
    }
}

/// Cloneable handle to a bucket.
#[derive(Clone)]
pub struct BucketClient {
    sender: mpsc::Sender<BucketRequest>,
}

impl BucketClient {
    pub fn new(sender: mpsc::Sender<BucketRequest>) -> Self {
        Self { sender }
    }

    async fn request<R>(&self, build: impl FnOnce(Reply<R>) -> BucketRequest) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::Unavailable)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    /// Stores `bytes` under `key` and returns the public URL.
    pub async fn upload(&self, key: impl Into<String>, bytes: Vec<u8>) -> Result<String, StoreError> {
        let key = key.into();
        self.request(|respond_to| BucketRequest::Upload { key, bytes, respond_to })
            .await
    }

    pub async fn download(&self, key: impl Into<String>) -> Result<Option<Vec<u8>>, StoreError> {
        let key = key.into();
        self.request(|respond_to| BucketRequest::Download { key, respond_to })
            .await
    }

    pub async fn remove(&self, key: impl Into<String>) -> Result<(), StoreError> {
        let key = key.into();
        self.request(|respond_to| BucketRequest::Remove { key, respond_to })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let (bucket, client) = BucketActor::new("images", "https://cdn.example.com/public/", 4);
        tokio::spawn(bucket.run());

        let url = client.upload("concerts/a.png", vec![1, 2, 3]).await.unwrap();
        assert_eq!(url, "https://cdn.example.com/public/images/concerts/a.png");

        let stored = client.download("concerts/a.png").await.unwrap();
        assert_eq!(stored, Some(vec![1, 2, 3]));

        client.remove("concerts/a.png").await.unwrap();
        assert!(client.download("concerts/a.png").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_and_escaping_keys() {
        let (bucket, client) = BucketActor::new("images", "http://localhost", 4);
        tokio::spawn(bucket.run());

        assert!(matches!(
            client.upload("a.png", Vec::new()).await,
            Err(StoreError::InvalidObject(_))
        ));
        assert!(matches!(
            client.upload("../secret", vec![1]).await,
            Err(StoreError::InvalidObject(_))
        ));
    }

    #[tokio::test]
    async fn test_stopped_bucket_is_unavailable() {
        let (bucket, client) = BucketActor::new("images", "http://localhost", 4);
        drop(bucket);

        assert!(matches!(
            client.upload("a.png", vec![1]).await,
            Err(StoreError::Unavailable)
        ));
    }
}
