//! Concurrent photo loading on a tokio runtime

use std::collections::HashSet;
use std::path::PathBuf;

use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::core::{Error, Result};

use super::{ImageSource, PhotoLoad, PhotoRequest};

/// Reads image headers off the frame thread and reports their dimensions.
pub struct AsyncImageSource {
    /// Channel for sending requests to the worker task
    request_tx: mpsc::UnboundedSender<PhotoRequest>,
    /// Channel for receiving finished loads
    result_rx: mpsc::UnboundedReceiver<PhotoLoad>,
    pending: HashSet<usize>,
    /// Owned runtime; `None` when spawned onto the caller's runtime
    #[allow(dead_code)]
    runtime: Option<Runtime>,
}

impl AsyncImageSource {
    /// Create a source with its own runtime.
    ///
    /// # Arguments
    /// * `max_concurrent` - Maximum number of images decoded at once
    pub fn new(max_concurrent: usize) -> Result<Self> {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<PhotoRequest>();
        let (result_tx, result_rx) = mpsc::unbounded_channel::<PhotoLoad>();

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("tinsel-assets")
            .enable_all()
            .build()
            .map_err(|e| Error::Runtime(format!("failed to start asset runtime: {e}")))?;

        runtime.spawn(async move {
            Self::worker_loop(max_concurrent.max(1), &mut request_rx, result_tx).await;
        });

        Ok(Self {
            request_tx,
            result_rx,
            pending: HashSet::new(),
            runtime: Some(runtime),
        })
    }

    /// Create a source on the current tokio runtime.
    ///
    /// Panics if called outside a tokio runtime context.
    pub fn new_with_current_runtime(max_concurrent: usize) -> Self {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<PhotoRequest>();
        let (result_tx, result_rx) = mpsc::unbounded_channel::<PhotoLoad>();

        tokio::spawn(async move {
            Self::worker_loop(max_concurrent.max(1), &mut request_rx, result_tx).await;
        });

        Self {
            request_tx,
            result_rx,
            pending: HashSet::new(),
            runtime: None,
        }
    }

    async fn worker_loop(
        max_concurrent: usize,
        request_rx: &mut mpsc::UnboundedReceiver<PhotoRequest>,
        result_tx: mpsc::UnboundedSender<PhotoLoad>,
    ) {
        use tokio::task::JoinSet;

        let mut active = JoinSet::new();
        let mut queued: Vec<PhotoRequest> = Vec::new();

        loop {
            tokio::select! {
                Some(request) = request_rx.recv() => {
                    queued.push(request);
                }

                Some(joined) = active.join_next(), if !active.is_empty() => {
                    match joined {
                        Ok(load) => {
                            let _ = result_tx.send(load);
                        }
                        Err(e) => {
                            log::error!("Photo loader task panicked: {}", e);
                        }
                    }
                }

                else => {
                    if queued.is_empty() && active.is_empty() {
                        break;
                    }
                }
            }

            // Requests are served in the order they were made
            while active.len() < max_concurrent && !queued.is_empty() {
                let request = queued.remove(0);
                active.spawn(Self::load_task(request));
            }
        }
    }

    async fn load_task(request: PhotoRequest) -> PhotoLoad {
        let PhotoRequest { id, path } = request;
        let file = path.clone();
        let dims = tokio::task::spawn_blocking(move || image::image_dimensions(&file)).await;
        match dims {
            Ok(Ok((width, height))) if width > 0 && height > 0 => PhotoLoad::Loaded { id, width, height },
            Ok(Ok(_)) => PhotoLoad::Failed { id, path, message: "image has zero size".to_string() },
            Ok(Err(e)) => PhotoLoad::Failed { id, path, message: Error::from(e).to_string() },
            Err(e) => PhotoLoad::Failed { id, path, message: e.to_string() },
        }
    }

    pub fn is_pending(&self, id: usize) -> bool {
        self.pending.contains(&id)
    }
}

impl ImageSource for AsyncImageSource {
    fn request(&mut self, request: PhotoRequest) -> bool {
        if self.pending.contains(&request.id) {
            return false;
        }
        let id = request.id;
        if self.request_tx.send(request).is_err() {
            log::error!("Photo loader worker has stopped; request {} dropped", id);
            return false;
        }
        self.pending.insert(id);
        true
    }

    fn poll(&mut self) -> Vec<PhotoLoad> {
        let mut results = Vec::new();
        while let Ok(load) = self.result_rx.try_recv() {
            self.pending.remove(&load.id());
            results.push(load);
        }
        results
    }

    fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
