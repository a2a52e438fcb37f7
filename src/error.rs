//! Error types for the inversion-of-control container.

use std::fmt;

/// Container errors
///
/// Represents the various error conditions that can occur while scanning
/// components, creating beans, or looking them up by name.
///
/// Discovery and hook-construction failures are recoverable: the scanner logs
/// them and moves on. Everything raised while creating a bean is fatal to the
/// `create` call that hit it and is propagated to the caller.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{ApplicationContext, BeanFactory, ComponentScan, DiError, StaticTypeSource};
///
/// let source = StaticTypeSource::new();
/// let context = ApplicationContext::new(ComponentScan::new("com.example"), &source).unwrap();
///
/// match context.get_bean("doesNotExist") {
///     Err(DiError::NotFound(name)) => assert_eq!(name, "doesNotExist"),
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use ferrous_ioc::DiError;
///
/// let not_found = DiError::NotFound("serviceA".to_string());
/// let no_ctor = DiError::NoDefaultConstructor("app::Repository");
///
/// // All errors implement Display
/// println!("Error: {}", not_found);
/// println!("Error: {}", no_ctor);
/// ```
#[derive(Debug, Clone)]
pub enum DiError {
    /// No bean definition registered under this name
    NotFound(String),
    /// The backing type exposes no zero-argument constructor
    NoDefaultConstructor(&'static str),
    /// The zero-argument constructor itself failed
    Construction {
        type_name: &'static str,
        message: String,
    },
    /// A bean was asked to accept a field it does not declare
    UnknownField { bean: &'static str, field: String },
    /// Resolving or assigning an injected field failed
    Injection {
        bean: String,
        field: String,
        source: Box<DiError>,
    },
    /// A bean could not be viewed as the requested concrete type
    TypeMismatch {
        name: String,
        expected: &'static str,
    },
    /// A candidate type could not be loaded from the discovery source
    Discovery { package: String, message: String },
    /// The root scan configuration is unusable
    Configuration(String),
}

impl DiError {
    /// Returns true for the definition-not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DiError::NotFound(_))
    }
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::NotFound(name) => write!(f, "No bean definition found for name: {}", name),
            DiError::NoDefaultConstructor(type_name) => {
                write!(f, "No zero-argument constructor for: {}", type_name)
            }
            DiError::Construction { type_name, message } => {
                write!(f, "Failed to construct {}: {}", type_name, message)
            }
            DiError::UnknownField { bean, field } => {
                write!(f, "Type {} has no injectable field '{}'", bean, field)
            }
            DiError::Injection { bean, field, source } => {
                write!(f, "Failed to inject field '{}' of bean '{}': {}", field, bean, source)
            }
            DiError::TypeMismatch { name, expected } => {
                write!(f, "Bean '{}' is not of type {}", name, expected)
            }
            DiError::Discovery { package, message } => {
                write!(f, "Failed to load candidate in package {}: {}", package, message)
            }
            DiError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for DiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiError::Injection { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Result type for container operations
///
/// A convenience type alias for `Result<T, DiError>` used throughout ferrous-ioc.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{DiResult, DiError};
///
/// fn lookup(name: &str) -> DiResult<()> {
///     Err(DiError::NotFound(name.to_string()))
/// }
///
/// assert!(lookup("serviceA").unwrap_err().is_not_found());
/// ```
pub type DiResult<T> = Result<T, DiError>;
