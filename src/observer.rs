//! Diagnostic observers for container traceability.
//!
//! Observers are told when a bean starts and finishes being created and when
//! the scanner drops a candidate. They exist for tracing and metrics; they
//! cannot change what the container does. Changing beans is the job of
//! [`BeanPostProcessor`](crate::BeanPostProcessor).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::DiError;

/// Observer trait for container events.
///
/// # Performance
///
/// Observer calls are made synchronously on the creating thread. Keep
/// implementations lightweight.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{DiError, DiObserver};
/// use std::time::Duration;
///
/// struct PrintObserver;
///
/// impl DiObserver for PrintObserver {
///     fn creating(&self, name: &str) {
///         println!("creating {}", name);
///     }
///
///     fn created(&self, name: &str, duration: Duration) {
///         println!("created {} in {:?}", name, duration);
///     }
///
///     fn candidate_skipped(&self, error: &DiError) {
///         println!("skipped candidate: {}", error);
///     }
/// }
/// ```
pub trait DiObserver: Send + Sync {
    /// Called before a bean is constructed.
    fn creating(&self, name: &str);

    /// Called after a bean went through construction, injection, its
    /// lifecycle callbacks and every post-processor.
    fn created(&self, name: &str, duration: Duration);

    /// Called when scanning drops a candidate: a type that failed to load, or
    /// a hook type that failed to construct.
    fn candidate_skipped(&self, _error: &DiError) {}
}

/// Container for registered observers.
///
/// Designed to have minimal overhead when no observers are registered.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    #[inline]
    pub(crate) fn creating(&self, name: &str) {
        for observer in &self.observers {
            observer.creating(name);
        }
    }

    #[inline]
    pub(crate) fn created(&self, name: &str, duration: Duration) {
        for observer in &self.observers {
            observer.created(name, duration);
        }
    }

    pub(crate) fn candidate_skipped(&self, error: &DiError) {
        for observer in &self.observers {
            observer.candidate_skipped(error);
        }
    }
}

/// Built-in observer that forwards events to `tracing`.
///
/// Events are emitted at `INFO` (skips at `WARN`) under the `ferrous_ioc`
/// target, tagged with a configurable prefix.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{ApplicationContext, ComponentScan, LoggingObserver, StaticTypeSource};
/// use std::sync::Arc;
///
/// let source = StaticTypeSource::new();
/// let context = ApplicationContext::builder(ComponentScan::new("app"), &source)
///     .observer(Arc::new(LoggingObserver::new()))
///     .build()
///     .unwrap();
/// # let _ = context;
/// ```
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    /// Creates a new logging observer with default prefix.
    pub fn new() -> Self {
        Self {
            prefix: "[ferrous-ioc]".to_string(),
        }
    }

    /// Creates a new logging observer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DiObserver for LoggingObserver {
    fn creating(&self, name: &str) {
        tracing::info!(target: "ferrous_ioc", bean = name, "{} Creating", self.prefix);
    }

    fn created(&self, name: &str, duration: Duration) {
        tracing::info!(
            target: "ferrous_ioc",
            bean = name,
            elapsed = ?duration,
            "{} Created",
            self.prefix
        );
    }

    fn candidate_skipped(&self, error: &DiError) {
        tracing::warn!(target: "ferrous_ioc", %error, "{} Skipped candidate", self.prefix);
    }
}

/// Observer that tracks creation counts and timings.
#[derive(Default)]
pub struct MetricsObserver {
    creation_count: AtomicU64,
    total_creation_time: AtomicU64,
    skipped_count: AtomicU64,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the total number of beans created.
    pub fn creation_count(&self) -> u64 {
        self.creation_count.load(Ordering::Relaxed)
    }

    /// Gets the average creation time.
    pub fn average_creation_time(&self) -> Option<Duration> {
        let count = self.creation_count();
        if count == 0 {
            return None;
        }
        let total_ns = self.total_creation_time.load(Ordering::Relaxed);
        Some(Duration::from_nanos(total_ns / count))
    }

    /// Gets the total creation time.
    pub fn total_creation_time(&self) -> Duration {
        Duration::from_nanos(self.total_creation_time.load(Ordering::Relaxed))
    }

    /// Gets the number of candidates the scanner skipped.
    pub fn skipped_count(&self) -> u64 {
        self.skipped_count.load(Ordering::Relaxed)
    }

    /// Resets all metrics.
    pub fn reset(&self) {
        self.creation_count.store(0, Ordering::Relaxed);
        self.total_creation_time.store(0, Ordering::Relaxed);
        self.skipped_count.store(0, Ordering::Relaxed);
    }
}

impl DiObserver for MetricsObserver {
    fn creating(&self, _name: &str) {}

    fn created(&self, _name: &str, duration: Duration) {
        self.creation_count.fetch_add(1, Ordering::Relaxed);
        self.total_creation_time
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    fn candidate_skipped(&self, _error: &DiError) {
        self.skipped_count.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_observer() {
        let observer = MetricsObserver::new();

        assert_eq!(observer.creation_count(), 0);
        assert!(observer.average_creation_time().is_none());

        observer.created("a", Duration::from_millis(10));
        observer.created("b", Duration::from_millis(20));

        assert_eq!(observer.creation_count(), 2);
        assert_eq!(observer.average_creation_time(), Some(Duration::from_millis(15)));
        assert!(observer.total_creation_time() >= Duration::from_millis(30));

        observer.candidate_skipped(&DiError::NotFound("x".to_string()));
        assert_eq!(observer.skipped_count(), 1);

        observer.reset();
        assert_eq!(observer.creation_count(), 0);
        assert_eq!(observer.skipped_count(), 0);
    }

    #[test]
    fn test_observers_fan_out() {
        let metrics = Arc::new(MetricsObserver::new());
        let mut observers = Observers::new();
        assert!(!observers.has_observers());

        observers.add(metrics.clone());
        observers.add(Arc::new(LoggingObserver::with_prefix("[test]")));
        assert!(observers.has_observers());

        observers.creating("bean");
        observers.created("bean", Duration::from_millis(1));
        observers.candidate_skipped(&DiError::Configuration("bad".to_string()));

        assert_eq!(metrics.creation_count(), 1);
        assert_eq!(metrics.skipped_count(), 1);
    }
}
