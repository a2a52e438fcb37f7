//! Type discovery: the boundary that enumerates candidate types.

use std::fmt;
use std::sync::Arc;

use crate::descriptor::TypeDescriptor;
use crate::error::{DiError, DiResult};

/// Result of loading one candidate type.
pub type Candidate = DiResult<Arc<dyn TypeDescriptor>>;

/// Source of candidate types for a package.
///
/// This is the only thing the scanner needs from the outside world. Each
/// entry of the returned list is one candidate; an `Err` entry is a type that
/// was found but could not be loaded, which the scanner logs and skips.
///
/// Any `Fn(&str) -> Vec<Candidate>` closure is a source, which keeps mocks
/// short.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Candidate, DiError, TypeSource};
///
/// let broken = |package: &str| -> Vec<Candidate> {
///     vec![Err(DiError::Discovery {
///         package: package.to_string(),
///         message: "unreadable".to_string(),
///     })]
/// };
///
/// assert_eq!(broken.discover("com.example").len(), 1);
/// ```
pub trait TypeSource: Send + Sync {
    /// Lists the candidate types found directly under `package`.
    fn discover(&self, package: &str) -> Vec<Candidate>;
}

impl<F> TypeSource for F
where
    F: Fn(&str) -> Vec<Candidate> + Send + Sync,
{
    fn discover(&self, package: &str) -> Vec<Candidate> {
        self(package)
    }
}

enum Entry {
    Loadable(Arc<dyn TypeDescriptor>),
    Unloadable { package: String, type_name: String },
}

impl Entry {
    fn package(&self) -> &str {
        match self {
            Entry::Loadable(descriptor) => descriptor.package(),
            Entry::Unloadable { package, .. } => package,
        }
    }
}

/// In-memory type source.
///
/// Descriptors are listed under the package they report. Discovery is not
/// recursive: `discover("app")` returns types in `app` but not in
/// `app.services`. Candidates come back in the order they were added.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Bean, ComponentDescriptor, StaticTypeSource, TypeSource};
///
/// #[derive(Default)]
/// struct ServiceA;
/// impl Bean for ServiceA {}
///
/// let mut source = StaticTypeSource::new();
/// source
///     .add(ComponentDescriptor::<ServiceA>::new().in_package("app.services").component("serviceA"))
///     .add_unloadable("app.services", "app.services.Broken");
///
/// assert_eq!(source.discover("app.services").len(), 2);
/// assert!(source.discover("app").is_empty());
/// ```
#[derive(Default)]
pub struct StaticTypeSource {
    entries: Vec<Entry>,
}

impl StaticTypeSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Adds a loadable type.
    pub fn add<D: TypeDescriptor + 'static>(&mut self, descriptor: D) -> &mut Self {
        self.entries.push(Entry::Loadable(Arc::new(descriptor)));
        self
    }

    /// Adds an already shared descriptor.
    pub fn add_shared(&mut self, descriptor: Arc<dyn TypeDescriptor>) -> &mut Self {
        self.entries.push(Entry::Loadable(descriptor));
        self
    }

    /// Adds a type that is listed under `package` but fails to load.
    pub fn add_unloadable(
        &mut self,
        package: impl Into<String>,
        type_name: impl Into<String>,
    ) -> &mut Self {
        self.entries.push(Entry::Unloadable {
            package: package.into(),
            type_name: type_name.into(),
        });
        self
    }

    /// Number of listed types across all packages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no types are listed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TypeSource for StaticTypeSource {
    fn discover(&self, package: &str) -> Vec<Candidate> {
        self.entries
            .iter()
            .filter(|entry| entry.package() == package)
            .map(|entry| match entry {
                Entry::Loadable(descriptor) => Ok(descriptor.clone()),
                Entry::Unloadable { package, type_name } => Err(DiError::Discovery {
                    package: package.clone(),
                    message: format!("cannot load type {}", type_name),
                }),
            })
            .collect()
    }
}

impl fmt::Debug for StaticTypeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let packages: Vec<&str> = self.entries.iter().map(Entry::package).collect();
        f.debug_struct("StaticTypeSource")
            .field("entries", &packages)
            .finish()
    }
}
