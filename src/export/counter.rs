//! Export file numbering
//!
//! A monotonically increasing integer names successive export files
//! (`Orders_1.xlsx`, `Orders_2.xlsx`, ...). The value is persisted to
//! `counter.txt` so it is stable while the process runs, but it is forced
//! back to 1 on every start: restart always restarts numbering, overwriting
//! a previous run's `Orders_1.xlsx`. That quirk is deliberate and kept
//! (see DESIGN.md).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

/// Persisted export counter
#[derive(Clone)]
pub struct ExportCounter {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    value: Mutex<u64>,
}

impl ExportCounter {
    /// Open the counter at `path`, unconditionally resetting it to 1.
    ///
    /// Any previously persisted value is overwritten.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        fs::write(&path, "1")?;

        Ok(Self {
            inner: Arc::new(Inner {
                path,
                value: Mutex::new(1),
            }),
        })
    }

    /// Current value (the number the next export file will carry)
    pub fn current(&self) -> u64 {
        *self.inner.value.lock()
    }

    /// Return the current value, then increment and persist.
    ///
    /// Called only after an export file has been written successfully, so
    /// a failed export never consumes a number.
    pub fn next(&self) -> io::Result<u64> {
        let mut value = self.inner.value.lock();
        let current = *value;
        *value += 1;
        fs::write(&self.inner.path, value.to_string())?;
        Ok(current)
    }
}
