//! Lookup traits for named beans.

use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::traits::{downcast_bean, Bean, BeanRef};

/// Object-safe bean lookup.
///
/// Implemented by [`ApplicationContext`](crate::ApplicationContext). Most
/// callers also want [`BeanFactoryExt`] for typed lookups.
pub trait BeanFactory: Send + Sync {
    /// Returns the bean registered under `name`.
    ///
    /// Singletons come from the cache; prototypes are created fresh on every
    /// call.
    ///
    /// # Returns
    ///
    /// * `Ok(BeanRef)` - The bean instance
    /// * `Err(DiError::NotFound)` - No definition is registered under `name`
    /// * `Err(DiError)` - Creating the bean failed
    fn get_bean(&self, name: &str) -> DiResult<BeanRef>;

    /// Returns true if a definition is registered under `name`.
    fn contains_bean(&self, name: &str) -> bool;

    /// Returns true if `name` is a singleton-scoped bean.
    fn is_singleton(&self, name: &str) -> DiResult<bool>;

    /// Returns true if `name` is a prototype-scoped bean.
    fn is_prototype(&self, name: &str) -> DiResult<bool> {
        self.is_singleton(name).map(|singleton| !singleton)
    }

    /// Names of every registered definition, in discovery order.
    fn bean_definition_names(&self) -> Vec<String>;
}

/// Typed lookups on top of [`BeanFactory`].
///
/// Blanket-implemented for every bean factory, including `dyn BeanFactory`.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{
///     ApplicationContext, Bean, BeanFactoryExt, ComponentDescriptor, ComponentScan,
///     StaticTypeSource,
/// };
///
/// #[derive(Default)]
/// struct Clock;
/// impl Bean for Clock {}
///
/// let mut source = StaticTypeSource::new();
/// source.add(ComponentDescriptor::<Clock>::new().in_package("app").component("clock"));
///
/// let context = ApplicationContext::new(ComponentScan::new("app"), &source).unwrap();
/// let clock = context.get_bean_as::<Clock>("clock").unwrap();
/// # let _ = clock;
/// ```
pub trait BeanFactoryExt: BeanFactory {
    /// Returns the bean registered under `name` as its concrete type.
    ///
    /// Fails with [`DiError::TypeMismatch`] when the bean is some other type.
    fn get_bean_as<T: Bean>(&self, name: &str) -> DiResult<Arc<T>> {
        let bean = self.get_bean(name)?;
        downcast_bean::<T>(bean).ok_or_else(|| DiError::TypeMismatch {
            name: name.to_string(),
            expected: std::any::type_name::<T>(),
        })
    }
}

impl<F: BeanFactory + ?Sized> BeanFactoryExt for F {}
