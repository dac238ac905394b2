//! Capability adapters.
//!
//! Adapters narrow a generic [`MacroValue::Object`] into a value kind the
//! resolvers handle directly, so host types can take part in resolution
//! without new resolvers.
//!
//! Adapters are tried in registration order; the first one that returns a
//! value wins. [`AdapterRegistry::default`] registers the built-ins in this
//! order:
//!
//! 1. [`LocationAdapter`]: objects that occupy a location
//! 2. [`RecipientAdapter`]: objects that stand for a recipient
//! 3. [`WebAddressAdapter`]: objects that point at a URL
//!
//! # Example
//!
//! ```
//! use std::fmt;
//! use std::sync::Arc;
//! use herald_core::{HostObject, Location, MacroValue, World};
//! use herald_macro::AdapterRegistry;
//!
//! struct Chest;
//!
//! impl fmt::Display for Chest {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("chest") }
//! }
//!
//! impl HostObject for Chest {
//!     fn location(&self) -> Option<Location> {
//!         Some(Location::new(Some(World::new("world")), 1.0, 2.0, 3.0))
//!     }
//! }
//!
//! let adapters = AdapterRegistry::default();
//! let value = MacroValue::Object(Arc::new(Chest));
//! assert!(matches!(adapters.adapt(&value), Some(MacroValue::Location(_))));
//! ```

mod builtin;

pub use builtin::{LocationAdapter, RecipientAdapter, WebAddressAdapter};

use herald_core::MacroValue;

/// Narrows a host value into a capability the resolvers understand.
pub trait Adapter: Send + Sync {
    /// Adapter name, used in logs.
    fn name(&self) -> &str;

    /// Return the narrowed value, or `None` if this adapter does not apply.
    fn adapt(&self, value: &MacroValue) -> Option<MacroValue>;
}

/// Ordered list of adapters.
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn Adapter>>,
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::empty()
            .with_adapter(LocationAdapter)
            .with_adapter(RecipientAdapter)
            .with_adapter(WebAddressAdapter)
    }
}

impl AdapterRegistry {
    /// Registry with no adapters.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            adapters: Vec::new(),
        }
    }

    /// Append an adapter after the ones already registered.
    #[must_use]
    pub fn with_adapter<A: Adapter + 'static>(mut self, adapter: A) -> Self {
        self.adapters.push(Box::new(adapter));
        self
    }

    /// Try each adapter in order on a generic object.
    ///
    /// Values that already have a concrete kind are never adapted.
    #[must_use]
    pub fn adapt(&self, value: &MacroValue) -> Option<MacroValue> {
        if !matches!(value, MacroValue::Object(_)) {
            return None;
        }
        self.adapters.iter().find_map(|adapter| {
            let adapted = adapter.adapt(value)?;
            tracing::trace!(
                adapter = adapter.name(),
                kind = adapted.kind(),
                "Adapted object"
            );
            Some(adapted)
        })
    }

    /// Names of the registered adapters, in priority order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.adapters.iter().map(|a| a.name())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;
    use std::sync::Arc;

    use herald_core::{HostObject, Location, World};

    use super::*;

    struct Signpost {
        location: Option<Location>,
        url: Option<String>,
    }

    impl fmt::Display for Signpost {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("signpost")
        }
    }

    impl HostObject for Signpost {
        fn location(&self) -> Option<Location> {
            self.location.clone()
        }

        fn web_address(&self) -> Option<String> {
            self.url.clone()
        }
    }

    struct Shout;

    impl Adapter for Shout {
        fn name(&self) -> &str {
            "shout"
        }

        fn adapt(&self, value: &MacroValue) -> Option<MacroValue> {
            match value {
                MacroValue::Object(o) => Some(MacroValue::Text(o.to_string().to_uppercase())),
                _ => None,
            }
        }
    }

    fn object(location: Option<Location>, url: Option<&str>) -> MacroValue {
        MacroValue::Object(Arc::new(Signpost {
            location,
            url: url.map(str::to_owned),
        }))
    }

    #[test]
    fn test_default_order() {
        let registry = AdapterRegistry::default();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["location", "recipient", "web_address"]
        );
    }

    #[test]
    fn test_first_match_wins() {
        let registry = AdapterRegistry::default();
        let value = object(
            Some(Location::new(Some(World::new("w")), 0.0, 0.0, 0.0)),
            Some("https://example.com"),
        );
        assert!(matches!(registry.adapt(&value), Some(MacroValue::Location(_))));
    }

    #[test]
    fn test_later_adapter_used_when_earlier_declines() {
        let registry = AdapterRegistry::default();
        let value = object(None, Some("https://example.com"));
        assert!(
            matches!(registry.adapt(&value), Some(MacroValue::Text(url)) if url == "https://example.com")
        );
    }

    #[test]
    fn test_no_adapter_applies() {
        let registry = AdapterRegistry::default();
        assert!(registry.adapt(&object(None, None)).is_none());
        assert!(AdapterRegistry::empty().adapt(&object(None, Some("x"))).is_none());
    }

    #[test]
    fn test_concrete_kinds_are_not_adapted() {
        let registry = AdapterRegistry::empty().with_adapter(Shout);
        assert!(registry.adapt(&MacroValue::from("text")).is_none());
        assert!(registry.adapt(&MacroValue::Null).is_none());
    }

    #[test]
    fn test_custom_adapter_appended() {
        let registry = AdapterRegistry::default().with_adapter(Shout);
        assert_eq!(registry.len(), 4);
        assert!(
            matches!(registry.adapt(&object(None, None)), Some(MacroValue::Text(s)) if s == "SIGNPOST")
        );
    }
}
