use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::TransferFunctionError;

use super::TransferFunction;

/// Transfer function shared between an editor and renderers
///
/// Editor publishes whole snapshots, renderer takes one snapshot per frame.
/// A frame never sees a half edited function or stale lookup tables.
#[derive(Clone, Default)]
pub struct SharedTransferFunction {
    current: Arc<RwLock<Arc<TransferFunction>>>,
}

impl SharedTransferFunction {
    pub fn new(tf: TransferFunction) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(tf))),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<TransferFunction> {
        self.current.read().clone()
    }

    /// Replace current snapshot
    pub fn publish(&self, tf: TransferFunction) {
        *self.current.write() = Arc::new(tf);
    }

    /// Edit a copy of the current function, recalculate its tables and publish it
    ///
    /// If `edit` or the recalculation fails, nothing is published.
    pub fn update<F>(&self, edit: F) -> Result<(), TransferFunctionError>
    where
        F: FnOnce(&mut TransferFunction) -> Result<(), TransferFunctionError>,
    {
        let mut guard = self.current.write();
        let mut tf = TransferFunction::clone(&guard);
        edit(&mut tf)?;
        tf.recalculate_lookup_tables()?;
        *guard = Arc::new(tf);
        Ok(())
    }
}
