//! Destruction callback for cached singletons.

/// Trait for beans that need structured teardown.
///
/// Only singletons are tracked: when
/// [`ApplicationContext::close`](crate::ApplicationContext::close) runs, the
/// destroy callbacks fire in reverse creation order. Prototype instances
/// belong to whoever requested them and are never destroyed by the container.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Bean, DisposableBean};
///
/// #[derive(Default)]
/// struct Cache;
///
/// impl Bean for Cache {
///     fn as_disposable_bean(&self) -> Option<&dyn DisposableBean> {
///         Some(self)
///     }
/// }
///
/// impl DisposableBean for Cache {
///     fn destroy(&self) {
///         println!("Flushing cache");
///     }
/// }
/// ```
pub trait DisposableBean: Send + Sync {
    /// Releases resources held by the bean.
    fn destroy(&self);
}
