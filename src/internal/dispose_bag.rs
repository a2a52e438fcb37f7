//! Internal disposal bag for singleton destroy callbacks.

/// Container for destroy callbacks with LIFO execution order.
///
/// Callbacks are pushed as singletons enter the cache, so running them in
/// reverse tears beans down before the beans they were built from.
#[derive(Default)]
pub(crate) struct DisposeBag {
    callbacks: Vec<(String, Box<dyn FnOnce() + Send>)>,
}

impl DisposeBag {
    /// Add a destroy callback for the named bean.
    pub(crate) fn push(&mut self, bean_name: String, f: Box<dyn FnOnce() + Send>) {
        self.callbacks.push((bean_name, f));
    }

    /// Take every callback out of the bag, newest first.
    pub(crate) fn drain_reverse(&mut self) -> Vec<(String, Box<dyn FnOnce() + Send>)> {
        let mut callbacks = std::mem::take(&mut self.callbacks);
        callbacks.reverse();
        callbacks
    }

    /// Check if the bag is empty (no callbacks pending).
    pub(crate) fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.callbacks.len()
    }
}
