//! Spawned tasks keyed by operation kind.

use std::collections::HashMap;
use std::future::Future;

use tokio::task::AbortHandle;

use super::registry::OpKind;

/// At most one live task per operation kind, owned by one coordinator.
///
/// Spawning a kind aborts the previous task of that kind. Dropping the set
/// aborts everything it still holds.
#[derive(Debug, Default)]
pub struct TaskSet {
    handles: HashMap<OpKind, AbortHandle>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `fut` as the current task for `kind`.
    pub fn spawn<F>(&mut self, kind: OpKind, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(fut).abort_handle();
        if let Some(previous) = self.handles.insert(kind, handle) {
            previous.abort();
        }
    }

    /// Abort the current task for `kind`, if any.
    pub fn abort(&mut self, kind: OpKind) {
        if let Some(handle) = self.handles.remove(&kind) {
            handle.abort();
        }
    }

    /// Whether a task for `kind` is still running.
    #[cfg(test)]
    pub(crate) fn is_running(&self, kind: OpKind) -> bool {
        self.handles.get(&kind).is_some_and(|h| !h.is_finished())
    }
}

impl Drop for TaskSet {
    fn drop(&mut self) {
        for handle in self.handles.values() {
            handle.abort();
        }
    }
}
