//! Scratch buffers used to stage peer key text before parsing.
//!
//! The agent only knows the [`ScratchBufferProvider`] capability: it
//! acquires one buffer per derivation and hands it back exactly once,
//! on success and on every error path. Pooling strategy belongs to the
//! provider; [`BufferPool`] is the bundled implementation.

pub mod pool;

use std::io::Write;

pub use pool::{BufferPool, PoolConfig};

/// A writable byte buffer whose contents can be read back.
pub trait ScratchBuffer: Write {
    /// Everything written since the buffer was acquired.
    fn contents(&self) -> &[u8];
}

impl ScratchBuffer for Vec<u8> {
    fn contents(&self) -> &[u8] {
        self.as_slice()
    }
}

/// Supplies reusable scratch buffers.
///
/// Implementations decide their own thread-safety; the agent calls
/// `release` exactly once for every `acquire`.
pub trait ScratchBufferProvider {
    type Buffer: ScratchBuffer;

    /// Hand out an empty buffer.
    fn acquire(&self) -> Self::Buffer;

    /// Take a buffer back after use.
    fn release(&self, buffer: Self::Buffer);
}

/// A buffer on loan from a provider, returned when dropped.
pub(crate) struct Lease<'p, P: ScratchBufferProvider + ?Sized> {
    provider: &'p P,
    buffer: Option<P::Buffer>,
}

impl<'p, P: ScratchBufferProvider + ?Sized> Lease<'p, P> {
    pub(crate) fn acquire(provider: &'p P) -> Self {
        Self {
            provider,
            buffer: Some(provider.acquire()),
        }
    }

    pub(crate) fn write_all(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        match self.buffer.as_mut() {
            Some(buffer) => buffer.write_all(bytes),
            None => Ok(()),
        }
    }

    pub(crate) fn contents(&self) -> &[u8] {
        match self.buffer.as_ref() {
            Some(buffer) => buffer.contents(),
            None => &[],
        }
    }

    /// Return the buffer to the provider now rather than at scope exit.
    pub(crate) fn release(mut self) {
        self.give_back();
    }

    fn give_back(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.provider.release(buffer);
        }
    }
}

impl<P: ScratchBufferProvider + ?Sized> Drop for Lease<'_, P> {
    fn drop(&mut self) {
        self.give_back();
    }
}
