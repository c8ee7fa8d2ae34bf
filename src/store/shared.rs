//! Thread-safe store handle
//!
//! The locate → shift → recompute-CRC sequence is not atomic, so every
//! operation runs under one exclusive lock.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::transport::ByteTransport;

use super::TlvStore;

/// Cloneable handle to a `TlvStore` behind a mutex
pub struct SharedTlvStore<T: ByteTransport> {
    inner: Arc<Mutex<TlvStore<T>>>,
}

impl<T: ByteTransport> SharedTlvStore<T> {
    pub fn new(store: TlvStore<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with exclusive access to the store
    pub fn with<R>(&self, f: impl FnOnce(&mut TlvStore<T>) -> R) -> R {
        let mut store = self.inner.lock();
        f(&mut store)
    }
}

impl<T: ByteTransport> Clone for SharedTlvStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
