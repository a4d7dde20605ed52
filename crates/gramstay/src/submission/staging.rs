use std::fmt;
use std::sync::Arc;

/// A locally selected, not-yet-uploaded image. Held only for the lifetime
/// of the submission session; this module performs no network calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Allocator for short-lived local preview handles (the object-URL analog).
/// Handles are never persisted and must be released when their image is
/// removed or the session ends.
pub trait PreviewAllocator: Send + Sync {
    fn acquire(&self, image: &StagedImage) -> String;
    fn release(&self, handle: &str);
}

/// Scoped preview handle: releasing happens in `Drop`, so every exit path
/// (removal, reset, teardown) returns the handle to its allocator.
pub struct Preview {
    handle: String,
    allocator: Arc<dyn PreviewAllocator>,
}

impl Preview {
    pub fn handle(&self) -> &str {
        &self.handle
    }
}

impl Drop for Preview {
    fn drop(&mut self) {
        self.allocator.release(&self.handle);
    }
}

impl fmt::Debug for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preview").field("handle", &self.handle).finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("image index {index} out of range (staged: {staged})")]
    IndexOutOfRange { index: usize, staged: usize },
}

/// In-memory staging area for selected images and their previews.
///
/// Invariant, preserved by construction in every mutation: the image list
/// and the preview list have the same length and aligned indices.
pub struct ImageStaging {
    images: Vec<StagedImage>,
    previews: Vec<Preview>,
    allocator: Arc<dyn PreviewAllocator>,
}

impl ImageStaging {
    pub fn new(allocator: Arc<dyn PreviewAllocator>) -> Self {
        Self {
            images: Vec::new(),
            previews: Vec::new(),
            allocator,
        }
    }

    /// Append a selection batch in order, deriving one preview per file.
    pub fn stage(&mut self, batch: Vec<StagedImage>) {
        for image in batch {
            let preview = Preview {
                handle: self.allocator.acquire(&image),
                allocator: Arc::clone(&self.allocator),
            };
            self.images.push(image);
            self.previews.push(preview);
        }
        debug_assert_eq!(self.images.len(), self.previews.len());
    }

    /// Remove the image and its preview at `index` atomically; the preview
    /// handle is released as it drops.
    pub fn remove(&mut self, index: usize) -> Result<(), StagingError> {
        if index >= self.images.len() {
            return Err(StagingError::IndexOutOfRange {
                index,
                staged: self.images.len(),
            });
        }

        self.images.remove(index);
        self.previews.remove(index);
        debug_assert_eq!(self.images.len(), self.previews.len());
        Ok(())
    }

    /// The image promoted to durable storage on submit.
    pub fn first(&self) -> Option<&StagedImage> {
        self.images.first()
    }

    pub fn images(&self) -> &[StagedImage] {
        &self.images
    }

    pub fn preview_handles(&self) -> impl Iterator<Item = &str> {
        self.previews.iter().map(Preview::handle)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Drop everything; all preview handles are released.
    pub fn clear(&mut self) {
        self.images.clear();
        self.previews.clear();
    }
}

impl fmt::Debug for ImageStaging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageStaging")
            .field("images", &self.images.len())
            .field("previews", &self.previews.len())
            .finish()
    }
}
