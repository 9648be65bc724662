//! The swappable analysis slot shared by a scheduler and its driver.
//!
//! Readers take a whole `Arc<AnalysisResult>` and keep it for as long as
//! they need; a swap only replaces the slot, so every reader sees either
//! the complete old field or the complete new one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use maze_core::AnalysisResult;

/// A generation-tagged `Arc<AnalysisResult>` slot.
///
/// The generation starts at 0 and grows by one on every
/// [`store`](Self::store).
pub struct SharedAnalysis {
    slot: Mutex<Arc<AnalysisResult>>,
    generation: AtomicU64,
}

// Compile-time assertion: SharedAnalysis must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<SharedAnalysis>();
};

impl SharedAnalysis {
    /// Create a slot holding `analysis` at generation 0.
    pub fn new(analysis: Arc<AnalysisResult>) -> Self {
        Self {
            slot: Mutex::new(analysis),
            generation: AtomicU64::new(0),
        }
    }

    // A poisoned slot still holds a complete Arc.
    fn lock(&self) -> MutexGuard<'_, Arc<AnalysisResult>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The current field.
    pub fn load(&self) -> Arc<AnalysisResult> {
        Arc::clone(&self.lock())
    }

    /// The current field with its generation, read consistently.
    pub fn load_tagged(&self) -> (u64, Arc<AnalysisResult>) {
        let slot = self.lock();
        (self.generation.load(Ordering::Acquire), Arc::clone(&slot))
    }

    /// Replace the field. Returns the new generation.
    pub fn store(&self, analysis: Arc<AnalysisResult>) -> u64 {
        let mut slot = self.lock();
        *slot = analysis;
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Generation of the current field (lock-free read).
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// `(rows, cols)` of the current field.
    pub fn shape(&self) -> (usize, usize) {
        self.lock().shape()
    }
}

impl std::fmt::Debug for SharedAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedAnalysis")
            .field("generation", &self.generation())
            .field("shape", &self.shape())
            .finish()
    }
}
