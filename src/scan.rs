//! Component scanning: turns discovered types into definitions and hooks.

use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::config::ComponentScan;
use crate::definition::{BeanDefinition, BeanDefinitionRegistry};
use crate::descriptor::TypeDescriptor;
use crate::error::DiResult;
use crate::observer::Observers;
use crate::processor::HookRegistry;
use crate::source::TypeSource;

/// Scans the configured package and builds the definition and hook registries.
///
/// For every discovered type carrying a component marker, a
/// [`BeanDefinition`] is registered under the declared name. A type that also
/// implements [`BeanPostProcessor`](crate::BeanPostProcessor) is constructed
/// on the spot and appended to the hook list.
///
/// Per-candidate failures do not abort the scan: a type that fails to load,
/// or a hook type that fails to construct, is logged and skipped. Only an
/// unusable configuration is an error.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{scan, Bean, ComponentDescriptor, ComponentScan, Scope, StaticTypeSource};
///
/// #[derive(Default)]
/// struct ServiceA;
/// impl Bean for ServiceA {}
///
/// let mut source = StaticTypeSource::new();
/// source.add(ComponentDescriptor::<ServiceA>::new().in_package("app").component("serviceA"));
///
/// let (definitions, hooks) = scan(&ComponentScan::new("app"), &source).unwrap();
/// assert_eq!(definitions.get("serviceA").unwrap().scope(), Scope::Singleton);
/// assert!(hooks.is_empty());
/// ```
pub fn scan(
    config: &ComponentScan,
    source: &dyn TypeSource,
) -> DiResult<(BeanDefinitionRegistry, HookRegistry)> {
    scan_with(config, source, &Observers::new())
}

pub(crate) fn scan_with(
    config: &ComponentScan,
    source: &dyn TypeSource,
    observers: &Observers,
) -> DiResult<(BeanDefinitionRegistry, HookRegistry)> {
    config.validate()?;
    let package = config.base_package();

    let mut definitions = BeanDefinitionRegistry::new();
    let mut hooks = HookRegistry::new();
    let mut skipped = 0usize;

    for candidate in source.discover(package) {
        let descriptor = match candidate {
            Ok(descriptor) => descriptor,
            Err(error) => {
                warn!(package, %error, "skipping candidate that failed to load");
                observers.candidate_skipped(&error);
                skipped += 1;
                continue;
            }
        };

        let Some(name) = descriptor.component_name().map(str::to_owned) else {
            trace!(type_name = descriptor.type_name(), "not a component");
            continue;
        };
        if name.is_empty() {
            warn!(
                type_name = descriptor.type_name(),
                "component declares an empty name; registering it under \"\""
            );
        }

        if descriptor.is_post_processor() && !register_hook(&descriptor, &mut hooks, observers) {
            skipped += 1;
        }

        let definition = BeanDefinition::new(name, descriptor);
        debug!(
            bean = definition.name(),
            type_name = definition.type_name(),
            scope = %definition.scope(),
            "registered bean definition"
        );
        if let Some(previous) = definitions.register(definition) {
            debug!(
                bean = previous.name(),
                replaced = previous.type_name(),
                "bean definition overridden"
            );
        }
    }

    info!(
        package,
        definitions = definitions.len(),
        post_processors = hooks.len(),
        skipped,
        "component scan complete"
    );
    Ok((definitions, hooks))
}

// Construction only: hooks are not processed by themselves or by each other.
fn register_hook(
    descriptor: &Arc<dyn TypeDescriptor>,
    hooks: &mut HookRegistry,
    observers: &Observers,
) -> bool {
    match descriptor.instantiate_post_processor() {
        Ok(hook) => {
            debug!(type_name = descriptor.type_name(), "registered post-processor");
            hooks.register(Arc::from(hook));
            true
        }
        Err(error) => {
            warn!(
                type_name = descriptor.type_name(),
                %error,
                "skipping post-processor that failed to construct"
            );
            observers.candidate_skipped(&error);
            false
        }
    }
}
