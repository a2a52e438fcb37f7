//! Lifecycle callbacks invoked while a bean is being created.

/// Callback for beans that want to know the name they are registered under.
///
/// Invoked once per created instance, after every field has been injected
/// and before [`InitializingBean::after_properties_set`].
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Bean, BeanNameAware};
///
/// #[derive(Default)]
/// struct Repository {
///     name: String,
/// }
///
/// impl Bean for Repository {
///     fn as_bean_name_aware(&mut self) -> Option<&mut dyn BeanNameAware> {
///         Some(self)
///     }
/// }
///
/// impl BeanNameAware for Repository {
///     fn set_bean_name(&mut self, name: &str) {
///         self.name = name.to_string();
///     }
/// }
/// ```
pub trait BeanNameAware {
    /// Receives the registry name of this bean.
    fn set_bean_name(&mut self, name: &str);
}

/// Post-construction initialization callback.
///
/// Invoked once per created instance, after the name-aware callback and
/// before any post-processor sees the bean. Every injected field is set by
/// then.
pub trait InitializingBean {
    /// Completes initialization once all properties are set.
    fn after_properties_set(&mut self);
}
