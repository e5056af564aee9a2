use crate::progress::ProgressEvent;

/// Observer for search progress.
///
/// Called synchronously on the engine's own thread (or a worker thread in
/// parallel mode). Implementations must return promptly; a slow sink slows
/// the search.
pub trait IProgressSink: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);
}

impl<F> IProgressSink for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn on_progress(&self, event: &ProgressEvent) {
        self(event)
    }
}
