//! A thread-safe pool of reusable byte buffers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use super::ScratchBufferProvider;

/// Pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Capacity reserved for freshly allocated buffers.
    pub initial_capacity: usize,
    /// Maximum number of idle buffers kept for reuse.
    pub max_retained: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            // A P-521 PEM public key is 268 bytes.
            initial_capacity: 512,
            max_retained: 32,
        }
    }
}

/// Reuses cleared `Vec<u8>` buffers across derivations.
#[derive(Debug)]
pub struct BufferPool {
    config: PoolConfig,
    idle: Mutex<Vec<Vec<u8>>>,
    acquired: AtomicU64,
    released: AtomicU64,
}

impl BufferPool {
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    pub fn with_config(config: PoolConfig) -> Self {
        Self {
            config,
            idle: Mutex::new(Vec::with_capacity(config.max_retained)),
            acquired: AtomicU64::new(0),
            released: AtomicU64::new(0),
        }
    }

    /// The sizing this pool was built with.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Total buffers handed out.
    pub fn acquired(&self) -> u64 {
        self.acquired.load(Ordering::SeqCst)
    }

    /// Total buffers handed back.
    pub fn released(&self) -> u64 {
        self.released.load(Ordering::SeqCst)
    }

    /// Buffers currently on loan.
    pub fn outstanding(&self) -> u64 {
        self.acquired().saturating_sub(self.released())
    }

    /// Idle buffers waiting for reuse.
    pub fn idle(&self) -> usize {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

impl ScratchBufferProvider for BufferPool {
    type Buffer = Vec<u8>;

    fn acquire(&self) -> Vec<u8> {
        self.acquired.fetch_add(1, Ordering::SeqCst);
        let reused = self
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();
        reused.unwrap_or_else(|| Vec::with_capacity(self.config.initial_capacity))
    }

    fn release(&self, mut buffer: Vec<u8>) {
        self.released.fetch_add(1, Ordering::SeqCst);
        buffer.clear();
        let mut idle = self.idle.lock().unwrap_or_else(PoisonError::into_inner);
        if idle.len() < self.config.max_retained {
            idle.push(buffer);
        }
    }
}
