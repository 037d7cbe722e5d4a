//! Current filter factory of a listener, swappable on reload.
//!
//! # Design Decisions
//! - ArcSwap gives lock-free reads on the connection path
//! - Each swap creates a new generation; filters built from an older
//!   generation keep their Arcs and stay valid until the connection closes
//! - Generation ids are derived inside the swap, so concurrent swaps never
//!   move `generation()` backwards

use std::sync::Arc;
use arc_swap::ArcSwap;

use crate::filter::{FilterManager, NetworkFilterFactoryCb};
use crate::observability::metrics;

/// One accepted configuration and the closure built from it.
pub struct FactoryGeneration {
    id: u64,
    cb: NetworkFilterFactoryCb,
}

impl FactoryGeneration {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Holds the active filter factory for a listener.
pub struct FilterChainSlot {
    current: ArcSwap<FactoryGeneration>,
}

impl FilterChainSlot {
    /// Create a slot with `cb` as generation 1.
    pub fn new(cb: NetworkFilterFactoryCb) -> Self {
        Self {
            current: ArcSwap::from_pointee(FactoryGeneration { id: 1, cb }),
        }
    }

    /// Install the current generation's filter on a new connection.
    ///
    /// Returns the generation id used.
    pub fn install(&self, filter_manager: &mut dyn FilterManager) -> u64 {
        let generation = self.current.load_full();
        (generation.cb)(filter_manager);
        generation.id
    }

    /// Replace the active factory. Returns the new generation id.
    pub fn swap(&self, cb: NetworkFilterFactoryCb) -> u64 {
        let previous = self.current.rcu(|current| {
            Arc::new(FactoryGeneration {
                id: current.id + 1,
                cb: Arc::clone(&cb),
            })
        });
        let id = previous.id + 1;
        tracing::info!(previous = previous.id, current = id, "Filter factory swapped");
        metrics::record_reload();
        id
    }

    /// Id of the active generation.
    pub fn generation(&self) -> u64 {
        self.current.load().id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::NetworkFilterPtr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    struct Sink;

    impl FilterManager for Sink {
        fn add_filter(&mut self, _filter: NetworkFilterPtr) {}
    }

    fn counting_cb(counter: Arc<AtomicUsize>) -> NetworkFilterFactoryCb {
        Arc::new(move |_fm: &mut dyn FilterManager| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn install_uses_current_generation() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let slot = FilterChainSlot::new(counting_cb(first.clone()));

        assert_eq!(slot.install(&mut Sink), 1);
        assert_eq!(slot.swap(counting_cb(second.clone())), 2);
        assert_eq!(slot.generation(), 2);
        assert_eq!(slot.install(&mut Sink), 2);
        assert_eq!(slot.install(&mut Sink), 2);

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn concurrent_swaps_get_distinct_increasing_ids() {
        let initial = counting_cb(Arc::new(AtomicUsize::new(0)));
        let slot = Arc::new(FilterChainSlot::new(initial));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let slot = Arc::clone(&slot);
                thread::spawn(move || {
                    (0..25)
                        .map(|_| slot.swap(counting_cb(Arc::new(AtomicUsize::new(0)))))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();

        assert_eq!(ids, (2..=201).collect::<Vec<_>>());
        assert_eq!(slot.generation(), 201);
    }
}
