use async_trait::async_trait;
use uuid::Uuid;

/// Object storage boundary: accepts a blob under a key and returns a
/// durable public retrieval URL.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    async fn upload(&self, key: &str, bytes: &[u8]) -> Result<String, StorageError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    #[error("storage upload failed: {0}")]
    Upload(String),
}

/// Storage key for a staged image: `{principalId}/{randomToken}.{ext}`,
/// preserving the original file extension. Collision resistance comes from
/// the random token, so concurrent submissions need no coordination.
pub fn object_key(principal_id: &str, file_name: &str) -> String {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .unwrap_or("bin");
    format!("{principal_id}/{}.{extension}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_preserves_extension_and_principal_namespace() {
        let key = object_key("owner-7", "front porch.JPG");
        assert!(key.starts_with("owner-7/"));
        assert!(key.ends_with(".JPG"));
    }

    #[test]
    fn object_key_defaults_extension_when_missing() {
        let key = object_key("owner-7", "photo");
        assert!(key.ends_with(".bin"));
    }

    #[test]
    fn object_keys_are_unique_per_call() {
        let first = object_key("owner-7", "a.png");
        let second = object_key("owner-7", "a.png");
        assert_ne!(first, second);
    }
}
