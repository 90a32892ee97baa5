//! Generator-driven construction
//!
//! All chunk storage is allocated and filled up front; nothing is generated
//! lazily during iteration.

use tracing::debug;

use crate::chunk::Chunk;
use crate::config::BuildConfig;
use crate::protocol::Sequence;
use crate::Element;

/// Fills new sequences of either layout from a generator
#[derive(Debug, Clone, Copy)]
pub struct Builder {
    config: BuildConfig,
}

impl Builder {
    /// Create a builder for the given shape
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Shape this builder produces
    pub fn config(&self) -> BuildConfig {
        self.config
    }

    /// Build a sequence whose element at flattened index `k` is `generator(k)`
    pub fn build<S, G>(&self, mut generator: G) -> S
    where
        S: Sequence,
        G: FnMut(usize) -> Element,
    {
        self.build_with(|base, items| {
            for (offset, slot) in items.iter_mut().enumerate() {
                *slot = generator(base + offset);
            }
        })
    }

    /// Build a sequence by handing each zeroed chunk to `fill` together with
    /// the flattened index of its first element
    pub fn build_with<S, F>(&self, mut fill: F) -> S
    where
        S: Sequence,
        F: FnMut(usize, &mut [Element]),
    {
        let config = self.config;
        let chunks = (0..config.chunk_count()).map(|idx| {
            let mut items = vec![0; config.chunk_size()];
            fill(config.base_index(idx), &mut items);
            Chunk::new(items)
        });
        let sequence = S::from_chunks(chunks);

        debug!(
            chunk_count = config.chunk_count(),
            chunk_size = config.chunk_size(),
            layout = std::any::type_name::<S>(),
            "built sequence"
        );
        sequence
    }
}
