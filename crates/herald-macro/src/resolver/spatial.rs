//! Location and world resolvers.

use std::sync::Arc;

use herald_core::{ContextMap, Location, RecordKey, ResultMap, World};

use super::{Resolver, put_child};
use crate::naming::WorldNamer;

/// Decomposes a location into world and block coordinates.
///
/// Emits `KEY.WORLD`, `KEY.X`, `KEY.Y`, `KEY.Z` and the composite
/// `KEY` → `"<world> [x, y, z]"`.
pub struct LocationResolver {
    namer: Arc<dyn WorldNamer>,
    unknown: String,
}

impl LocationResolver {
    #[must_use]
    pub fn new(namer: Arc<dyn WorldNamer>, unknown: impl Into<String>) -> Self {
        Self {
            namer,
            unknown: unknown.into(),
        }
    }
}

impl Resolver<Location> for LocationResolver {
    fn resolve(&self, key: &RecordKey, value: &Location, _context: &ContextMap) -> ResultMap {
        let world = value
            .world
            .as_ref()
            .and_then(|w| self.namer.display_name(w))
            .unwrap_or_else(|| self.unknown.clone());
        let (x, y, z) = value.block();

        let mut map = ResultMap::single(key.clone(), format!("{world} [{x}, {y}, {z}]"));
        put_child(&mut map, key, "WORLD", world);
        put_child(&mut map, key, "X", x.to_string());
        put_child(&mut map, key, "Y", y.to_string());
        put_child(&mut map, key, "Z", z.to_string());
        map
    }
}

/// Resolves a world to its alias or raw name, as `KEY` and `KEY.NAME`.
pub struct WorldResolver {
    namer: Arc<dyn WorldNamer>,
    unknown: String,
}

impl WorldResolver {
    #[must_use]
    pub fn new(namer: Arc<dyn WorldNamer>, unknown: impl Into<String>) -> Self {
        Self {
            namer,
            unknown: unknown.into(),
        }
    }
}

impl Resolver<World> for WorldResolver {
    fn resolve(&self, key: &RecordKey, value: &World, _context: &ContextMap) -> ResultMap {
        let name = self
            .namer
            .display_name(value)
            .unwrap_or_else(|| self.unknown.clone());
        let mut map = ResultMap::new();
        put_child(&mut map, key, "NAME", name.clone());
        map.put(key.clone(), name);
        map
    }
}
