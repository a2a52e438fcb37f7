//! Application context: the container core.
//!
//! This module contains the ApplicationContext type: scanning on
//! construction, eager singleton materialization, the creation routine and
//! named lookup.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::{ComponentScan, Configuration};
use crate::definition::{BeanDefinition, BeanDefinitionRegistry};
use crate::error::{DiError, DiResult};
use crate::internal::{DisposeBag, Mutex, RwLock};
use crate::observer::Observers;
use crate::processor::HookRegistry;
use crate::scope::Scope;
use crate::source::TypeSource;
use crate::traits::{Bean, BeanFactory, BeanRef};

mod builder;
pub use builder::ContextBuilder;

/// The inversion-of-control container.
///
/// Building an `ApplicationContext` scans the configured package, registers
/// a definition per component and a hook per post-processor, then creates
/// every singleton up front. When construction returns, each singleton is
/// fully injected, has run its lifecycle callbacks and has been seen by
/// every hook. Any creation failure aborts construction, after the destroy
/// callbacks of the singletons created so far have run.
///
/// After construction, lookups of a singleton return the cached instance;
/// lookups of a prototype run the creation routine again.
///
/// # Thread Safety
///
/// The context is `Send + Sync` and cheap to clone (it uses `Arc`
/// internally). The definition registry is read-only after the scan and the
/// singleton cache is guarded by a read-write lock that is never held while
/// a bean is being created.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{
///     cast_dependency, ApplicationContext, Bean, BeanFactoryExt, BeanRef,
///     ComponentDescriptor, ComponentScan, DiResult, StaticTypeSource,
/// };
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct ServiceA;
/// impl Bean for ServiceA {}
///
/// #[derive(Default)]
/// struct ServiceB {
///     service_a: Option<Arc<ServiceA>>,
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
/// }
///
/// let mut source = StaticTypeSource::new();
/// source
///     .add(ComponentDescriptor::<ServiceA>::new().in_package("com.example.services").component("serviceA"))
///     .add(
///         ComponentDescriptor::<ServiceB>::new()
///             .in_package("com.example.services")
///             .component("serviceB")
///             .scope("singleton")
///             .autowired("serviceA"),
///     );
///
/// let context = ApplicationContext::new(ComponentScan::new("com.example.services"), &source).unwrap();
/// let b = context.get_bean_as::<ServiceB>("serviceB").unwrap();
/// let a = context.get_bean_as::<ServiceA>("serviceA").unwrap();
/// assert!(Arc::ptr_eq(b.service_a.as_ref().unwrap(), &a));
/// ```
pub struct ApplicationContext {
    inner: Arc<ContextInner>,
}

pub(crate) struct ContextInner {
    definitions: BeanDefinitionRegistry,
    hooks: HookRegistry,
    singletons: RwLock<HashMap<String, BeanRef>>,
    disposers: Mutex<DisposeBag>,
    observers: Observers,
}

impl ApplicationContext {
    /// Scans `config` through `source` and creates every singleton.
    pub fn new(config: ComponentScan, source: &dyn TypeSource) -> DiResult<Self> {
        Self::builder(config, source).build()
    }

    /// Builds a context from a declarative configuration type.
    pub fn from_config<C: Configuration>(source: &dyn TypeSource) -> DiResult<Self> {
        Self::new(C::component_scan(), source)
    }

    /// Starts a builder for observers and programmatic post-processors.
    pub fn builder(config: ComponentScan, source: &dyn TypeSource) -> ContextBuilder<'_> {
        ContextBuilder::new(config, source)
    }

    pub(crate) fn from_parts(
        definitions: BeanDefinitionRegistry,
        hooks: HookRegistry,
        observers: Observers,
    ) -> DiResult<Self> {
        let context = Self {
            inner: Arc::new(ContextInner {
                definitions,
                hooks,
                singletons: RwLock::new(HashMap::new()),
                disposers: Mutex::new(DisposeBag::default()),
                observers,
            }),
        };
        // No handle escapes a failed build, so tear down what was cached here
        if let Err(error) = context.preinstantiate_singletons() {
            warn!(%error, "singleton creation failed; destroying singletons created so far");
            context.close();
            return Err(error);
        }
        info!(
            definitions = context.inner.definitions.len(),
            singletons = context.singleton_count(),
            "application context ready"
        );
        Ok(context)
    }

    #[inline]
    fn inner(&self) -> &ContextInner {
        &self.inner
    }

    /// Eagerly creates and caches every singleton, in discovery order.
    ///
    /// Names already cached because an earlier bean needed them as a
    /// dependency are skipped, so each singleton is created exactly once.
    fn preinstantiate_singletons(&self) -> DiResult<()> {
        for definition in self.inner().definitions.iter() {
            if !definition.is_singleton() || self.cached_singleton(definition.name()).is_some() {
                continue;
            }
            let bean = self.create(definition)?;
            self.cache_singleton(definition.name(), bean);
        }
        Ok(())
    }

    /// Runs the creation routine for one definition.
    ///
    /// Steps, in order: zero-argument construction, field injection by name,
    /// the name-aware callback, the initialization callback, then every
    /// hook's after-initialization callback in registration order. The
    /// result is not cached here.
    fn create(&self, definition: &BeanDefinition) -> DiResult<BeanRef> {
        let name = definition.name();
        let observers = &self.inner().observers;
        let start = observers.has_observers().then(Instant::now);
        observers.creating(name);

        let mut instance = definition.descriptor().instantiate()?;

        for field in definition.dependencies() {
            self.inject_field(name, instance.as_mut(), field)?;
        }

        if let Some(aware) = instance.as_bean_name_aware() {
            aware.set_bean_name(name);
        }
        if let Some(initializing) = instance.as_initializing_bean() {
            initializing.after_properties_set();
        }
        self.inner().hooks.apply_after_initialization(name, instance.as_mut());

        if let Some(start) = start {
            observers.created(name, start.elapsed());
        }
        debug!(bean = name, scope = %definition.scope(), "created bean");
        Ok(Arc::from(instance))
    }

    fn inject_field(&self, bean: &str, instance: &mut dyn Bean, field: &str) -> DiResult<()> {
        let wrap = |source: DiError| DiError::Injection {
            bean: bean.to_string(),
            field: field.to_string(),
            source: Box::new(source),
        };
        let dependency = self.get_bean(field).map_err(wrap)?;
        instance.inject(field, dependency).map_err(wrap)
    }

    fn cached_singleton(&self, name: &str) -> Option<BeanRef> {
        self.inner().singletons.read().get(name).cloned()
    }

    /// Stores a freshly created singleton unless another caller got there first.
    ///
    /// Returns the instance that ended up in the cache.
    fn cache_singleton(&self, name: &str, bean: BeanRef) -> BeanRef {
        let stored = {
            let mut cache = self.inner().singletons.write();
            if let Some(existing) = cache.get(name) {
                return existing.clone();
            }
            cache.insert(name.to_string(), bean.clone());
            bean
        };

        if stored.as_disposable_bean().is_some() {
            let target = stored.clone();
            self.inner().disposers.lock().push(
                name.to_string(),
                Box::new(move || {
                    if let Some(disposable) = target.as_disposable_bean() {
                        disposable.destroy();
                    }
                }),
            );
        }
        stored
    }

    /// Runs the destroy callback of every cached singleton, newest first.
    ///
    /// Callbacks run at most once; closing twice is a no-op. Cached
    /// singletons stay available for lookup afterwards.
    pub fn close(&self) {
        let callbacks = self.inner().disposers.lock().drain_reverse();
        if callbacks.is_empty() {
            return;
        }
        info!(beans = callbacks.len(), "destroying singletons");
        for (name, destroy) in callbacks {
            debug!(bean = %name, "destroying bean");
            destroy();
        }
    }

    /// Returns the definition registered under `name`.
    pub fn bean_definition(&self, name: &str) -> Option<&BeanDefinition> {
        self.inner().definitions.get(name)
    }

    /// Number of registered definitions.
    pub fn bean_definition_count(&self) -> usize {
        self.inner().definitions.len()
    }

    /// Number of registered post-processing hooks.
    pub fn post_processor_count(&self) -> usize {
        self.inner().hooks.len()
    }

    /// Number of singletons currently cached.
    pub fn singleton_count(&self) -> usize {
        self.inner().singletons.read().len()
    }

    #[cfg(feature = "diagnostics")]
    pub fn to_debug_string(&self) -> String {
        let mut s = String::new();
        s.push_str("=== Application Context Debug ===\n");
        s.push_str("Bean Definitions:\n");
        for def in self.inner().definitions.iter() {
            let cached = self.cached_singleton(def.name()).is_some();
            s.push_str(&format!(
                "  {}: {} [{}]{}{}\n",
                def.name(),
                def.type_name(),
                def.scope(),
                if def.dependencies().is_empty() {
                    String::new()
                } else {
                    format!(" <- {}", def.dependencies().join(", "))
                },
                if cached { " (cached)" } else { "" },
            ));
        }
        s.push_str(&format!("Post-Processors: {}\n", self.inner().hooks.len()));
        s
    }
}

impl BeanFactory for ApplicationContext {
    fn get_bean(&self, name: &str) -> DiResult<BeanRef> {
        if let Some(bean) = self.cached_singleton(name) {
            return Ok(bean);
        }

        let definition = self
            .inner()
            .definitions
            .get(name)
            .ok_or_else(|| DiError::NotFound(name.to_string()))?;
        let bean = self.create(definition)?;

        match definition.scope() {
            Scope::Singleton => Ok(self.cache_singleton(name, bean)),
            Scope::Prototype => Ok(bean),
        }
    }

    fn contains_bean(&self, name: &str) -> bool {
        self.inner().definitions.contains(name)
    }

    fn is_singleton(&self, name: &str) -> DiResult<bool> {
        self.bean_definition(name)
            .map(BeanDefinition::is_singleton)
            .ok_or_else(|| DiError::NotFound(name.to_string()))
    }

    fn bean_definition_names(&self) -> Vec<String> {
        self.inner().definitions.names().map(str::to_owned).collect()
    }
}

impl Clone for ApplicationContext {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationContext")
            .field("definitions", &self.inner().definitions)
            .field("hooks", &self.inner().hooks)
            .field("singletons", &self.singleton_count())
            .finish()
    }
}

impl Drop for ApplicationContext {
    fn drop(&mut self) {
        // Only the last handle reports pending destroy callbacks
        if Arc::strong_count(&self.inner) == 1 {
            let pending = self.inner.disposers.lock().len();
            if pending > 0 {
                warn!(
                    pending,
                    "ApplicationContext dropped with singletons awaiting destroy. Call close() before dropping."
                );
            }
        }
    }
}
