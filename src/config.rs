//! Root scan configuration.

use crate::error::{DiError, DiResult};

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// Root configuration marker: names the package to scan.
///
/// This is the only configuration surface of the container.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::ComponentScan;
///
/// let scan = ComponentScan::new("com.example.services");
/// assert_eq!(scan.base_package(), "com.example.services");
/// assert!(scan.validate().is_ok());
///
/// assert!(ComponentScan::new("  ").validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "camelCase"))]
pub struct ComponentScan {
    base_package: String,
}

impl ComponentScan {
    /// Scans `base_package`.
    pub fn new(base_package: impl Into<String>) -> Self {
        Self {
            base_package: base_package.into(),
        }
    }

    /// The dotted package path to scan.
    pub fn base_package(&self) -> &str {
        &self.base_package
    }

    /// Rejects configurations that cannot name any package.
    pub fn validate(&self) -> DiResult<()> {
        if self.base_package.trim().is_empty() {
            return Err(DiError::Configuration(
                "component scan base package must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<&str> for ComponentScan {
    fn from(base_package: &str) -> Self {
        Self::new(base_package)
    }
}

impl From<String> for ComponentScan {
    fn from(base_package: String) -> Self {
        Self::new(base_package)
    }
}

/// Declarative configuration type carrying a [`ComponentScan`].
///
/// Lets an application describe its root configuration as a type and hand
/// that type to [`ApplicationContext::from_config`](crate::ApplicationContext::from_config).
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{ComponentScan, Configuration};
///
/// struct AppConfig;
///
/// impl Configuration for AppConfig {
///     fn component_scan() -> ComponentScan {
///         ComponentScan::new("com.example.services")
///     }
/// }
///
/// assert_eq!(AppConfig::component_scan().base_package(), "com.example.services");
/// ```
pub trait Configuration {
    /// The package this configuration scans.
    fn component_scan() -> ComponentScan;
}
