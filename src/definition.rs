//! Bean definitions and the registry that holds them.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::descriptor::TypeDescriptor;
use crate::scope::Scope;

/// Metadata describing how to create one named bean.
///
/// Built once during scanning and immutable afterwards. The injected field
/// names are captured from the descriptor at registration time so creation
/// never has to ask the type again.
#[derive(Clone)]
pub struct BeanDefinition {
    name: String,
    descriptor: Arc<dyn TypeDescriptor>,
    scope: Scope,
    dependencies: Vec<String>,
    post_processor: bool,
}

impl BeanDefinition {
    /// Builds the definition for `descriptor` registered under `name`.
    pub fn new(name: impl Into<String>, descriptor: Arc<dyn TypeDescriptor>) -> Self {
        let scope = Scope::from_marker(descriptor.scope_value());
        let dependencies = descriptor.injection_points().to_vec();
        let post_processor = descriptor.is_post_processor();
        Self {
            name: name.into(),
            descriptor,
            scope,
            dependencies,
            post_processor,
        }
    }

    /// The registry key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The backing type.
    pub fn descriptor(&self) -> &Arc<dyn TypeDescriptor> {
        &self.descriptor
    }

    /// Backing type name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.descriptor.type_name()
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Field names to inject, each resolved by bean name.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn is_singleton(&self) -> bool {
        self.scope == Scope::Singleton
    }

    pub fn is_prototype(&self) -> bool {
        self.scope == Scope::Prototype
    }

    /// Returns true if the backing type doubles as a post-processing hook.
    pub fn is_post_processor(&self) -> bool {
        self.post_processor
    }
}

impl fmt::Debug for BeanDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanDefinition")
            .field("name", &self.name)
            .field("type", &self.descriptor.type_name())
            .field("scope", &self.scope)
            .field("dependencies", &self.dependencies)
            .field("post_processor", &self.post_processor)
            .finish()
    }
}

/// Registry mapping bean names to definitions.
///
/// Iteration follows discovery order. Registering a name twice replaces the
/// earlier definition in place: the last write wins and keeps the position
/// of the first.
#[derive(Default, Clone)]
pub struct BeanDefinitionRegistry {
    definitions: HashMap<String, BeanDefinition>,
    order: Vec<String>,
}

impl BeanDefinitionRegistry {
    pub fn new() -> Self {
        Self {
            definitions: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Inserts a definition, returning the one it replaced.
    pub fn register(&mut self, definition: BeanDefinition) -> Option<BeanDefinition> {
        let name = definition.name.clone();
        let previous = self.definitions.insert(name.clone(), definition);
        if previous.is_none() {
            self.order.push(name);
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&BeanDefinition> {
        self.definitions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Definition names in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Definitions in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &BeanDefinition> {
        self.order.iter().filter_map(|name| self.definitions.get(name))
    }
}

impl fmt::Debug for BeanDefinitionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
