//! Post-processing hooks run against every created bean.

use std::sync::Arc;

use crate::traits::Bean;

/// Hook invoked around bean creation.
///
/// Post-processors let cross-cutting code observe or adjust beans without
/// touching the bean types themselves. A component type that also implements
/// this trait is picked up during scanning: it is instantiated right away
/// (construction only, no injection, no callbacks) and appended to the hook
/// list, and it is still registered as an ordinary bean definition.
///
/// Hooks run in registration order against every created instance,
/// singleton or prototype.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Bean, BeanPostProcessor};
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// #[derive(Default)]
/// struct CountingProcessor {
///     seen: AtomicUsize,
/// }
///
/// impl Bean for CountingProcessor {}
///
/// impl BeanPostProcessor for CountingProcessor {
///     fn post_process_after_initialization(&self, _bean_name: &str, _bean: &mut dyn Bean) {
///         self.seen.fetch_add(1, Ordering::Relaxed);
///     }
/// }
/// ```
pub trait BeanPostProcessor: Send + Sync {
    /// Extension point that is never invoked by the container.
    ///
    /// Kept so implementations have the usual before/after pair. Creation
    /// only dispatches [`post_process_after_initialization`].
    ///
    /// [`post_process_after_initialization`]: BeanPostProcessor::post_process_after_initialization
    fn post_process_before_initialization(&self, _bean_name: &str, _bean: &mut dyn Bean) {}

    /// Called for every created bean after its lifecycle callbacks ran.
    fn post_process_after_initialization(&self, bean_name: &str, bean: &mut dyn Bean);
}

/// Ordered list of registered post-processors.
///
/// Order is registration order and is significant: for one bean, a hook
/// registered earlier always runs before a hook registered later.
#[derive(Default, Clone)]
pub struct HookRegistry {
    hooks: Vec<Arc<dyn BeanPostProcessor>>,
}

impl HookRegistry {
    /// Creates an empty hook list.
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Appends a hook after every hook registered so far.
    pub fn register(&mut self, hook: Arc<dyn BeanPostProcessor>) {
        self.hooks.push(hook);
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns true if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Iterates hooks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn BeanPostProcessor>> {
        self.hooks.iter()
    }

    /// Runs every hook's after-initialization callback, in order.
    pub(crate) fn apply_after_initialization(&self, bean_name: &str, bean: &mut dyn Bean) {
        for hook in &self.hooks {
            hook.post_process_after_initialization(bean_name, bean);
        }
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &format!("{} hooks", self.hooks.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Target;
    impl Bean for Target {}

    struct Recorder {
        tag: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl BeanPostProcessor for Recorder {
        fn post_process_after_initialization(&self, bean_name: &str, _bean: &mut dyn Bean) {
            self.log.lock().unwrap().push(format!("{}:{}", self.tag, bean_name));
        }
    }

    #[test]
    fn test_hooks_apply_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut hooks = HookRegistry::new();
        hooks.register(Arc::new(Recorder { tag: "h1", log: log.clone() }));
        hooks.register(Arc::new(Recorder { tag: "h2", log: log.clone() }));
        assert_eq!(hooks.len(), 2);

        let mut bean = Target;
        hooks.apply_after_initialization("target", &mut bean);

        assert_eq!(*log.lock().unwrap(), vec!["h1:target", "h2:target"]);
    }

    #[test]
    fn test_before_initialization_defaults_to_no_op() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let recorder = Recorder { tag: "h1", log: log.clone() };
        recorder.post_process_before_initialization("target", &mut Target);
        assert!(log.lock().unwrap().is_empty());
    }
}
