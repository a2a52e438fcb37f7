//! # ferrous-ioc
//!
//! A minimal inversion-of-control container: component scanning, named bean
//! definitions, singleton and prototype scopes, field injection by name and
//! post-processing hooks.
//!
//! ## Features
//!
//! - **Component scanning**: every type under the configured package that
//!   carries a component marker becomes a named bean definition
//! - **Eager singletons**: all singletons are created while the container is
//!   built, so lookups after construction never fail for them
//! - **Injection by name**: a field marked `autowired` receives the bean
//!   registered under the field's own name
//! - **Lifecycle callbacks**: name-aware, initializing and disposable beans
//! - **Post-processors**: hooks that see every created bean, in registration order
//! - **Thread-safe**: the context is `Send + Sync` and cheap to clone
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_ioc::{
//!     cast_dependency, ApplicationContext, Bean, BeanFactory, BeanFactoryExt, BeanRef,
//!     ComponentDescriptor, ComponentScan, DiResult, StaticTypeSource,
//! };
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct ServiceA;
//! impl Bean for ServiceA {}
//!
//! #[derive(Default)]
//! struct ServiceB {
//!     service_a: Option<Arc<ServiceA>>,
//! }
//!
//! impl Bean for ServiceB {
//!     fn inject(&mut self, field: &str, dependency: BeanRef) -> DiResult<()> {
//!         match field {
//!             "serviceA" => {
//!                 self.service_a = Some(cast_dependency(field, dependency)?);
//!                 Ok(())
//!             }
//!             _ => Err(self.unknown_field(field)),
//!         }
//!     }
//! }
//!
//! // Describe the types found under the scanned package
//! let mut source = StaticTypeSource::new();
//! source
//!     .add(ComponentDescriptor::<ServiceA>::new().in_package("com.example.services").component("serviceA"))
//!     .add(
//!         ComponentDescriptor::<ServiceB>::new()
//!             .in_package("com.example.services")
//!             .component("serviceB")
//!             .scope("singleton")
//!             .autowired("serviceA"),
//!     );
//!
//! // Build the container: scans, registers and creates every singleton
//! let context = ApplicationContext::new(ComponentScan::new("com.example.services"), &source).unwrap();
//!
//! let a = context.get_bean_as::<ServiceA>("serviceA").unwrap();
//! let b = context.get_bean_as::<ServiceB>("serviceB").unwrap();
//! assert!(Arc::ptr_eq(b.service_a.as_ref().unwrap(), &a));
//!
//! assert!(context.get_bean("doesNotExist").unwrap_err().is_not_found());
//! ```
//!
//! ## Scopes
//!
//! - **Singleton**: the default, and what a scope marker of exactly
//!   `"singleton"` selects. Created once and cached by name
//! - **Prototype**: any other scope value. Created fresh on every lookup
//!
//! ```rust
//! use ferrous_ioc::{ApplicationContext, Bean, BeanFactory, ComponentDescriptor, ComponentScan, StaticTypeSource};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct TransientThing;
//! impl Bean for TransientThing {}
//!
//! let mut source = StaticTypeSource::new();
//! source.add(
//!     ComponentDescriptor::<TransientThing>::new()
//!         .in_package("app")
//!         .component("transientThing")
//!         .scope("prototype"),
//! );
//!
//! let context = ApplicationContext::new(ComponentScan::new("app"), &source).unwrap();
//! let first = context.get_bean("transientThing").unwrap();
//! let second = context.get_bean("transientThing").unwrap();
//! assert!(!Arc::ptr_eq(&first, &second));
//! ```

// Module declarations
pub mod config;
pub mod context;
pub mod definition;
pub mod descriptor;
pub mod error;
pub mod observer;
pub mod processor;
pub mod scan;
pub mod scope;
pub mod source;
pub mod traits;

// Internal modules
mod internal;

// Re-export core types
pub use config::{ComponentScan, Configuration};
pub use context::{ApplicationContext, ContextBuilder};
pub use definition::{BeanDefinition, BeanDefinitionRegistry};
pub use descriptor::{ComponentDescriptor, TypeDescriptor};
pub use error::{DiError, DiResult};
pub use observer::{DiObserver, LoggingObserver, MetricsObserver};
pub use processor::{BeanPostProcessor, HookRegistry};
pub use scan::scan;
pub use scope::Scope;
pub use source::{Candidate, StaticTypeSource, TypeSource};
pub use traits::{
    cast_dependency, downcast_bean, AsAny, Bean, BeanFactory, BeanFactoryExt, BeanNameAware,
    BeanRef, DisposableBean, InitializingBean,
};
