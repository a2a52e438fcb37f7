//! The bean trait and type-erasure helpers.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::traits::{BeanNameAware, DisposableBean, InitializingBean};

/// Shared handle to a live bean.
///
/// Singletons are handed out as clones of the cached `BeanRef`, so two
/// lookups of the same singleton satisfy `Arc::ptr_eq`.
pub type BeanRef = Arc<dyn Bean>;

/// Type-erasure support, implemented for every `Any + Send + Sync` type.
///
/// Never implement this by hand; it exists so that `dyn Bean` values can be
/// turned back into their concrete types.
pub trait AsAny: Any + Send + Sync {
    /// Borrows the value as `dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Mutably borrows the value as `dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Converts a shared handle into an `Arc<dyn Any>` for downcasting.
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;

    /// The concrete type name, for diagnostics.
    fn bean_type_name(&self) -> &'static str;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn bean_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A container-managed object.
///
/// Every component type implements `Bean`. The trait carries two things:
///
/// - **Field injection**: the container calls [`inject`](Bean::inject) once
///   per field declared with `autowired`, passing the bean registered under
///   that field's name. Injection is by name, not by type.
/// - **Capability queries**: the lifecycle callbacks are optional traits. A
///   bean opts in by overriding the matching `as_*` method to return
///   `Some(self)`; the defaults return `None`.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{cast_dependency, Bean, BeanRef, BeanNameAware, DiResult};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct ServiceA;
/// impl Bean for ServiceA {}
///
/// #[derive(Default)]
/// struct ServiceB {
///     service_a: Option<Arc<ServiceA>>,
///     bean_name: String,
/// }
///
/// impl Bean for ServiceB {
///     fn inject(&mut self, field: &str, dependency: BeanRef) -> DiResult<()> {
///         match field {
///             "serviceA" => {
///                 self.service_a = Some(cast_dependency(field, dependency)?);
///                 Ok(())
///             }
///             _ => Err(self.unknown_field(field)),
///         }
///     }
///
///     fn as_bean_name_aware(&mut self) -> Option<&mut dyn BeanNameAware> {
///         Some(self)
///     }
/// }
///
/// impl BeanNameAware for ServiceB {
///     fn set_bean_name(&mut self, name: &str) {
///         self.bean_name = name.to_string();
///     }
/// }
/// ```
pub trait Bean: AsAny {
    /// Assigns `dependency` to the field named `field`.
    ///
    /// The default accepts no fields.
    fn inject(&mut self, field: &str, dependency: BeanRef) -> DiResult<()> {
        drop(dependency);
        Err(self.unknown_field(field))
    }

    /// Builds the error for a field this bean does not declare.
    fn unknown_field(&self, field: &str) -> DiError {
        DiError::UnknownField {
            bean: self.bean_type_name(),
            field: field.to_string(),
        }
    }

    /// Exposes the name-aware callback, if implemented.
    fn as_bean_name_aware(&mut self) -> Option<&mut dyn BeanNameAware> {
        None
    }

    /// Exposes the post-construction initialization callback, if implemented.
    fn as_initializing_bean(&mut self) -> Option<&mut dyn InitializingBean> {
        None
    }

    /// Exposes the destroy callback, if implemented.
    fn as_disposable_bean(&self) -> Option<&dyn DisposableBean> {
        None
    }
}

impl dyn Bean {
    /// Returns true if the bean is of type `T`.
    pub fn is<T: Bean>(&self) -> bool {
        AsAny::as_any(self).is::<T>()
    }

    /// Borrows the bean as `T`.
    pub fn downcast_ref<T: Bean>(&self) -> Option<&T> {
        AsAny::as_any(self).downcast_ref::<T>()
    }

    /// Mutably borrows the bean as `T`.
    pub fn downcast_mut<T: Bean>(&mut self) -> Option<&mut T> {
        AsAny::as_any_mut(self).downcast_mut::<T>()
    }
}

impl fmt::Debug for dyn Bean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bean")
            .field("type", &AsAny::bean_type_name(self))
            .finish()
    }
}

/// Converts a shared bean into its concrete type.
///
/// Returns `None` if the bean is not a `T`.
pub fn downcast_bean<T: Bean>(bean: BeanRef) -> Option<Arc<T>> {
    <dyn Bean as AsAny>::into_any_arc(bean).downcast::<T>().ok()
}

/// Converts an injected dependency into the type the receiving field holds.
///
/// Meant for [`Bean::inject`] implementations: a mismatch surfaces as
/// [`DiError::TypeMismatch`] naming the field.
pub fn cast_dependency<T: Bean>(field: &str, dependency: BeanRef) -> DiResult<Arc<T>> {
    downcast_bean::<T>(dependency).ok_or_else(|| DiError::TypeMismatch {
        name: field.to_string(),
        expected: std::any::type_name::<T>(),
    })
}
