//! Photo asset boundary.
//!
//! The scene asks for an image by path and later learns its pixel size (or
//! that loading failed). Requests are fire-and-forget; results are drained
//! once per frame with [`ImageSource::poll`].

pub mod loader;

pub use loader::AsyncImageSource;

use std::collections::HashMap;
use std::path::PathBuf;

/// Ask for the pixel size of the photo shown by frame `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoRequest {
    pub id: usize,
    pub path: PathBuf,
}

/// Outcome of one photo request.
#[derive(Debug, Clone, PartialEq)]
pub enum PhotoLoad {
    Loaded { id: usize, width: u32, height: u32 },
    Failed { id: usize, path: PathBuf, message: String },
}

impl PhotoLoad {
    pub fn id(&self) -> usize {
        match self {
            PhotoLoad::Loaded { id, .. } | PhotoLoad::Failed { id, .. } => *id,
        }
    }
}

/// Where photo dimensions come from.
pub trait ImageSource {
    /// Queue a request. Returns `false` if `id` is already pending or the
    /// source can no longer accept work.
    fn request(&mut self, request: PhotoRequest) -> bool;

    /// Drain every result that has arrived so far (non-blocking).
    fn poll(&mut self) -> Vec<PhotoLoad>;

    fn pending_count(&self) -> usize;
}

/// Answers from a fixed table on the next poll. Paths missing from the
/// table fail.
#[derive(Debug, Default)]
pub struct FixedImageSource {
    sizes: HashMap<PathBuf, (u32, u32)>,
    ready: Vec<PhotoLoad>,
}

impl FixedImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        self.sizes.insert(path.into(), (width, height));
        self
    }
}

impl ImageSource for FixedImageSource {
    fn request(&mut self, request: PhotoRequest) -> bool {
        if self.ready.iter().any(|r| r.id() == request.id) {
            return false;
        }
        let result = match self.sizes.get(&request.path) {
            Some(&(width, height)) => PhotoLoad::Loaded { id: request.id, width, height },
            None => PhotoLoad::Failed {
                id: request.id,
                message: "no such image".to_string(),
                path: request.path,
            },
        };
        self.ready.push(result);
        true
    }

    fn poll(&mut self) -> Vec<PhotoLoad> {
        std::mem::take(&mut self.ready)
    }

    fn pending_count(&self) -> usize {
        self.ready.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_source_resolves_on_poll() {
        let mut source = FixedImageSource::new().with_image("a.jpg", 800, 600);
        assert!(source.request(PhotoRequest { id: 0, path: "a.jpg".into() }));
        assert!(source.request(PhotoRequest { id: 1, path: "missing.jpg".into() }));
        assert!(!source.request(PhotoRequest { id: 1, path: "missing.jpg".into() }));
        assert_eq!(source.pending_count(), 2);

        let results = source.poll();
        assert_eq!(results[0], PhotoLoad::Loaded { id: 0, width: 800, height: 600 });
        assert!(matches!(results[1], PhotoLoad::Failed { id: 1, .. }));
        assert!(source.poll().is_empty());
        assert_eq!(source.pending_count(), 0);
    }
}
