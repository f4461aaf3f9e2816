//! Complex-type codec registry.
//!
//! Complex columns are opaque to the generic engine; a codec registered
//! under the column's logical type name knows how to interpret the bytes.
//! Resolution can legitimately fail: a segment may have been written with a
//! codec that was since removed. Consumers must treat that as a
//! column-scoped condition.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

pub trait ComplexCodec: Send + Sync {
    fn type_name(&self) -> &str;

    /// Decoded byte-size contribution of one stored row. Defaults to the
    /// stored length for codecs without a better estimate.
    fn decoded_size(&self, raw: &[u8]) -> u64 {
        raw.len() as u64
    }
}

#[derive(Default)]
pub struct CodecRegistry {
    codecs: RwLock<HashMap<String, Arc<dyn ComplexCodec>>>,
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, codec: Arc<dyn ComplexCodec>) {
        self.write().insert(codec.type_name().to_owned(), codec);
    }

    /// Remove a codec, as happens when an extension is unloaded. Segments
    /// referencing it remain analyzable; their complex columns report
    /// column-level errors.
    pub fn unregister(&self, type_name: &str) {
        self.write().remove(type_name);
    }

    pub fn resolve(&self, type_name: &str) -> Option<Arc<dyn ComplexCodec>> {
        self.codecs
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
            .get(type_name)
            .cloned()
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<dyn ComplexCodec>>> {
        self.codecs
            .write()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

/// Pass-through codec useful for tests and for types whose stored size is
/// already the decoded size.
pub struct RawSizeCodec {
    type_name: String,
}

impl RawSizeCodec {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

impl ComplexCodec for RawSizeCodec {
    fn type_name(&self) -> &str {
        &self.type_name
    }
}
