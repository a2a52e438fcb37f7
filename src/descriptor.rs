//! Type descriptors: what the container knows about a candidate type.

use std::fmt;
use std::marker::PhantomData;

use crate::error::{DiError, DiResult};
use crate::processor::BeanPostProcessor;
use crate::traits::Bean;

/// Read-only handle to a loadable candidate type
///
/// A type descriptor is what discovery yields for every type found under a
/// package. It answers the questions the scanner and the creation routine
/// ask: is the type a component, under which name, with which scope, which
/// fields want injection, and how to build a fresh instance.
///
/// [`ComponentDescriptor`] implements this for any `T: Bean`; custom
/// implementations are useful for mocks and for types assembled at runtime.
pub trait TypeDescriptor: Send + Sync {
    /// Fully qualified type name, for diagnostics.
    fn type_name(&self) -> &'static str;

    /// Dotted package path the type lives in.
    fn package(&self) -> &str;

    /// Declared component name, or `None` when the type carries no
    /// component marker.
    fn component_name(&self) -> Option<&str>;

    /// Declared scope value, or `None` when the type carries no scope marker.
    fn scope_value(&self) -> Option<&str>;

    /// Names of the fields marked for injection, in declaration order.
    fn injection_points(&self) -> &[String];

    /// Returns true if the type also implements [`BeanPostProcessor`].
    fn is_post_processor(&self) -> bool;

    /// Builds an instance through the zero-argument constructor.
    ///
    /// Fails with [`DiError::NoDefaultConstructor`] if the type has none and
    /// with [`DiError::Construction`] if the constructor fails.
    fn instantiate(&self) -> DiResult<Box<dyn Bean>>;

    /// Builds an instance to be used as a post-processing hook.
    fn instantiate_post_processor(&self) -> DiResult<Box<dyn BeanPostProcessor>>;
}

type Constructor<T> = fn() -> Result<T, String>;
type HookCast<T> = fn(T) -> Box<dyn BeanPostProcessor>;

/// Descriptor for a concrete bean type, assembled with a builder API.
///
/// The builder methods play the part of declarative markers on the type:
/// [`component`](Self::component) names it, [`scope`](Self::scope) sets the
/// scope value, [`autowired`](Self::autowired) declares an injected field and
/// [`post_processor`](Self::post_processor) records that it doubles as a hook.
///
/// The package defaults to the type's module path with `::` replaced by `.`
/// (`my_app::services::ServiceA` lives in `my_app.services`).
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Bean, ComponentDescriptor, TypeDescriptor};
///
/// #[derive(Default)]
/// struct ServiceB;
/// impl Bean for ServiceB {}
///
/// let descriptor = ComponentDescriptor::<ServiceB>::new()
///     .in_package("com.example.services")
///     .component("serviceB")
///     .scope("singleton")
///     .autowired("serviceA");
///
/// assert_eq!(descriptor.package(), "com.example.services");
/// assert_eq!(descriptor.component_name(), Some("serviceB"));
/// assert_eq!(descriptor.scope_value(), Some("singleton"));
/// assert_eq!(descriptor.injection_points(), ["serviceA".to_string()]);
/// assert!(!descriptor.is_post_processor());
/// ```
pub struct ComponentDescriptor<T: Bean> {
    package: String,
    component: Option<String>,
    scope: Option<String>,
    fields: Vec<String>,
    ctor: Option<Constructor<T>>,
    hook_cast: Option<HookCast<T>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Bean + Default> ComponentDescriptor<T> {
    /// Describes `T` with `T::default()` as its zero-argument constructor.
    pub fn new() -> Self {
        Self::with_constructor(|| Ok(T::default()))
    }
}

impl<T: Bean + Default> Default for ComponentDescriptor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Bean> ComponentDescriptor<T> {
    /// Describes `T` with a fallible zero-argument constructor.
    pub fn with_constructor(ctor: fn() -> Result<T, String>) -> Self {
        Self {
            ctor: Some(ctor),
            ..Self::without_constructor()
        }
    }

    /// Describes `T` without any zero-argument constructor.
    ///
    /// Creating such a bean fails with [`DiError::NoDefaultConstructor`].
    pub fn without_constructor() -> Self {
        Self {
            package: package_of(std::any::type_name::<T>()),
            component: None,
            scope: None,
            fields: Vec::new(),
            ctor: None,
            hook_cast: None,
            _marker: PhantomData,
        }
    }

    /// Overrides the package the type is discovered under.
    pub fn in_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Marks the type as a component registered under `name`.
    pub fn component(mut self, name: impl Into<String>) -> Self {
        self.component = Some(name.into());
        self
    }

    /// Attaches a scope marker with the given value.
    pub fn scope(mut self, value: impl Into<String>) -> Self {
        self.scope = Some(value.into());
        self
    }

    /// Declares a field to inject with the bean registered under the same name.
    pub fn autowired(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Records that the type doubles as a post-processing hook.
    pub fn post_processor(mut self) -> Self
    where
        T: BeanPostProcessor,
    {
        self.hook_cast = Some(into_hook::<T> as HookCast<T>);
        self
    }

    fn construct(&self) -> DiResult<T> {
        let type_name = std::any::type_name::<T>();
        let ctor = self.ctor.ok_or(DiError::NoDefaultConstructor(type_name))?;
        ctor().map_err(|message| DiError::Construction { type_name, message })
    }
}

impl<T: Bean> TypeDescriptor for ComponentDescriptor<T> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn package(&self) -> &str {
        &self.package
    }

    fn component_name(&self) -> Option<&str> {
        self.component.as_deref()
    }

    fn scope_value(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    fn injection_points(&self) -> &[String] {
        &self.fields
    }

    fn is_post_processor(&self) -> bool {
        self.hook_cast.is_some()
    }

    fn instantiate(&self) -> DiResult<Box<dyn Bean>> {
        Ok(Box::new(self.construct()?))
    }

    fn instantiate_post_processor(&self) -> DiResult<Box<dyn BeanPostProcessor>> {
        let cast = self.hook_cast.ok_or_else(|| DiError::TypeMismatch {
            name: self.component.clone().unwrap_or_default(),
            expected: "dyn BeanPostProcessor",
        })?;
        Ok(cast(self.construct()?))
    }
}

impl<T: Bean> fmt::Debug for ComponentDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("type", &std::any::type_name::<T>())
            .field("package", &self.package)
            .field("component", &self.component)
            .field("scope", &self.scope)
            .field("fields", &self.fields)
            .field("has_constructor", &self.ctor.is_some())
            .field("post_processor", &self.hook_cast.is_some())
            .finish()
    }
}

fn into_hook<T: BeanPostProcessor + 'static>(bean: T) -> Box<dyn BeanPostProcessor> {
    Box::new(bean)
}

// `a::b::C<d::E>` lives in `a.b`
fn package_of(type_name: &str) -> String {
    let path = type_name.split('<').next().unwrap_or(type_name);
    match path.rsplit_once("::") {
        Some((module, _)) => module.replace("::", "."),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Widget;
    impl Bean for Widget {}

    struct Hook;
    impl Bean for Hook {}
    impl BeanPostProcessor for Hook {
        fn post_process_after_initialization(&self, _bean_name: &str, _bean: &mut dyn Bean) {}
    }

    #[test]
    fn test_package_of() {
        assert_eq!(package_of("app::services::ServiceA"), "app.services");
        assert_eq!(package_of("app::Wrapper<core::option::Option<u8>>"), "app");
        assert_eq!(package_of("u32"), "");
    }

    #[test]
    fn test_default_package_follows_module_path() {
        let descriptor = ComponentDescriptor::<Widget>::new();
        assert_eq!(descriptor.package(), "ferrous_ioc.descriptor.tests");
        assert_eq!(descriptor.component_name(), None);
        assert_eq!(descriptor.scope_value(), None);
    }

    #[test]
    fn test_missing_constructor() {
        let descriptor = ComponentDescriptor::<Widget>::without_constructor();
        match descriptor.instantiate() {
            Err(DiError::NoDefaultConstructor(name)) => assert!(name.ends_with("Widget")),
            _ => panic!("expected NoDefaultConstructor"),
        }
    }

    #[test]
    fn test_failing_constructor() {
        let descriptor = ComponentDescriptor::<Widget>::with_constructor(|| Err("boom".to_string()));
        match descriptor.instantiate() {
            Err(DiError::Construction { message, .. }) => assert_eq!(message, "boom"),
            _ => panic!("expected Construction error"),
        }
    }

    #[test]
    fn test_post_processor_instantiation() {
        let descriptor = ComponentDescriptor::<Hook>::with_constructor(|| Ok(Hook)).post_processor();
        assert!(descriptor.is_post_processor());
        assert!(descriptor.instantiate_post_processor().is_ok());

        let plain = ComponentDescriptor::<Widget>::new().component("widget");
        assert!(plain.instantiate_post_processor().is_err());
    }
}
