use std::sync::Arc;

use crate::config::ComponentScan;
use crate::error::DiResult;
use crate::observer::{DiObserver, Observers};
use crate::processor::BeanPostProcessor;
use crate::scan::scan_with;
use crate::source::TypeSource;

use super::ApplicationContext;

/// Builder for an [`ApplicationContext`].
///
/// Adds observers and programmatic post-processors on top of what scanning
/// finds. Programmatic hooks run after every scanned hook, in the order they
/// were added.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{
///     ApplicationContext, Bean, BeanPostProcessor, ComponentScan, MetricsObserver, StaticTypeSource,
/// };
/// use std::sync::Arc;
///
/// struct Audit;
/// impl BeanPostProcessor for Audit {
///     fn post_process_after_initialization(&self, _bean_name: &str, _bean: &mut dyn Bean) {}
/// }
///
/// let metrics = Arc::new(MetricsObserver::new());
/// let source = StaticTypeSource::new();
/// let context = ApplicationContext::builder(ComponentScan::new("app"), &source)
///     .observer(metrics.clone())
///     .post_processor(Arc::new(Audit))
///     .build()
///     .unwrap();
///
/// assert_eq!(context.post_processor_count(), 1);
/// assert_eq!(metrics.creation_count(), 0);
/// ```
pub struct ContextBuilder<'a> {
    config: ComponentScan,
    source: &'a dyn TypeSource,
    observers: Observers,
    extra_hooks: Vec<Arc<dyn BeanPostProcessor>>,
}

impl<'a> ContextBuilder<'a> {
    pub(crate) fn new(config: ComponentScan, source: &'a dyn TypeSource) -> Self {
        Self {
            config,
            source,
            observers: Observers::new(),
            extra_hooks: Vec::new(),
        }
    }

    /// Registers an observer for creation and scanning events.
    pub fn observer(mut self, observer: Arc<dyn DiObserver>) -> Self {
        self.observers.add(observer);
        self
    }

    /// Appends a hook after the ones found by scanning.
    pub fn post_processor(mut self, hook: Arc<dyn BeanPostProcessor>) -> Self {
        self.extra_hooks.push(hook);
        self
    }

    /// Scans, registers and eagerly creates every singleton.
    pub fn build(self) -> DiResult<ApplicationContext> {
        let (definitions, mut hooks) = scan_with(&self.config, self.source, &self.observers)?;
        for hook in self.extra_hooks {
            hooks.register(hook);
        }
        ApplicationContext::from_parts(definitions, hooks, self.observers)
    }
}
