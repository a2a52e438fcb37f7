//! Bean scope definitions.

use std::fmt;

/// Identifier a scope marker must carry to select [`Scope::Singleton`].
pub const SINGLETON: &str = "singleton";

/// Identifier conventionally used for [`Scope::Prototype`].
pub const PROTOTYPE: &str = "prototype";

/// Bean scopes controlling instance caching behavior
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::Scope;
///
/// // No scope marker: singleton
/// assert_eq!(Scope::from_marker(None), Scope::Singleton);
///
/// // Only the exact singleton identifier selects singleton
/// assert_eq!(Scope::from_marker(Some("singleton")), Scope::Singleton);
/// assert_eq!(Scope::from_marker(Some("prototype")), Scope::Prototype);
/// assert_eq!(Scope::from_marker(Some("Singleton")), Scope::Prototype);
/// assert_eq!(Scope::from_marker(Some("request")), Scope::Prototype);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// Single instance per container, cached by name forever
    ///
    /// Singleton beans are materialized eagerly while the container is
    /// built. Every lookup afterwards returns the same shared instance.
    #[default]
    Singleton,
    /// New instance per lookup, never cached
    ///
    /// The container hands the instance to the requester and forgets about
    /// it: no caching, no destroy callback.
    Prototype,
}

impl Scope {
    /// Resolves the scope declared by an optional scope marker.
    ///
    /// A missing marker means singleton. A present marker means singleton
    /// only when its value is exactly `"singleton"`; any other value,
    /// including the empty string, means prototype.
    pub fn from_marker(marker: Option<&str>) -> Self {
        match marker {
            None => Scope::Singleton,
            Some(SINGLETON) => Scope::Singleton,
            Some(_) => Scope::Prototype,
        }
    }

    /// The identifier of this scope.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Singleton => SINGLETON,
            Scope::Prototype => PROTOTYPE,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
