//! The closed set of value kinds a macro can be bound to.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::Recipient;

/// Handle to a world (dimension) in the host environment.
///
/// Only the raw name is carried here; display names and aliases come from a
/// naming collaborator at resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct World {
    name: String,
}

impl World {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A point in a world. Coordinates are truncated to block positions when
/// displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub world: Option<World>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    #[must_use]
    pub fn new(world: Option<World>, x: f64, y: f64, z: f64) -> Self {
        Self { world, x, y, z }
    }

    /// Integer block coordinates, truncated toward zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn block(&self) -> (i64, i64, i64) {
        (self.x as i64, self.y as i64, self.z as i64)
    }
}

/// A known identity that may not currently be connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub name: Option<String>,
}

impl Identity {
    #[must_use]
    pub fn new(id: Uuid, name: Option<String>) -> Self {
        Self { id, name }
    }
}

/// An item stack: a type name, an optional custom display name and a count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
    pub kind: String,
    pub display_name: Option<String>,
    pub amount: u32,
}

impl ItemStack {
    #[must_use]
    pub fn new(kind: impl Into<String>, amount: u32) -> Self {
        Self {
            kind: kind.into(),
            display_name: None,
            amount,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// Numeric payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
        }
    }
}

/// An arbitrary host value not covered by the other kinds.
///
/// The capability probes default to `None`; adapters use them to narrow the
/// object into a kind the resolvers understand. Objects that stay generic are
/// rendered through [`Display`](fmt::Display).
pub trait HostObject: fmt::Display + Send + Sync {
    /// Location this object occupies, if any.
    fn location(&self) -> Option<Location> {
        None
    }

    /// Recipient this object stands for, if any.
    fn recipient(&self) -> Option<Arc<dyn Recipient>> {
        None
    }

    /// Web address this object points at, if any.
    fn web_address(&self) -> Option<String> {
        None
    }
}

/// A value bound to a macro key.
///
/// Resolution dispatches on the variant with an exhaustive match; `Object`
/// is the generic fallback and `Null` an explicit absence.
#[derive(Clone)]
pub enum MacroValue {
    /// A recipient able to issue commands (online player, console).
    Recipient(Arc<dyn Recipient>),
    /// A named identity that may be offline.
    Identity(Identity),
    Item(ItemStack),
    Location(Location),
    World(World),
    Duration(Duration),
    /// A number; `None` is a null numeric binding and resolves to nothing.
    Number(Option<Number>),
    Text(String),
    Null,
    Object(Arc<dyn HostObject>),
}

impl MacroValue {
    /// Short name of the variant, used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Recipient(_) => "recipient",
            Self::Identity(_) => "identity",
            Self::Item(_) => "item",
            Self::Location(_) => "location",
            Self::World(_) => "world",
            Self::Duration(_) => "duration",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Null => "null",
            Self::Object(_) => "object",
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Debug for MacroValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recipient(r) => f.debug_tuple("Recipient").field(&r.name()).finish(),
            Self::Identity(v) => f.debug_tuple("Identity").field(v).finish(),
            Self::Item(v) => f.debug_tuple("Item").field(v).finish(),
            Self::Location(v) => f.debug_tuple("Location").field(v).finish(),
            Self::World(v) => f.debug_tuple("World").field(v).finish(),
            Self::Duration(v) => f.debug_tuple("Duration").field(v).finish(),
            Self::Number(v) => f.debug_tuple("Number").field(v).finish(),
            Self::Text(v) => f.debug_tuple("Text").field(v).finish(),
            Self::Null => f.write_str("Null"),
            Self::Object(o) => f.debug_tuple("Object").field(&o.to_string()).finish(),
        }
    }
}

impl From<&str> for MacroValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for MacroValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for MacroValue {
                fn from(value: $ty) -> Self {
                    Self::Number(Some(Number::Int(i64::from(value))))
                }
            }

            impl From<Option<$ty>> for MacroValue {
                fn from(value: Option<$ty>) -> Self {
                    Self::Number(value.map(|n| Number::Int(i64::from(n))))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// Integers wider than `i64` saturate at the `i64` bounds.
macro_rules! impl_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for MacroValue {
                fn from(value: $ty) -> Self {
                    Self::Number(Some(Number::Int(saturating_i64(value))))
                }
            }

            impl From<Option<$ty>> for MacroValue {
                fn from(value: Option<$ty>) -> Self {
                    Self::Number(value.map(|n| Number::Int(saturating_i64(n))))
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize, isize);

fn saturating_i64<T>(value: T) -> i64
where
    T: TryInto<i64> + PartialOrd + Default,
{
    let negative = value < T::default();
    value
        .try_into()
        .unwrap_or(if negative { i64::MIN } else { i64::MAX })
}

impl From<f32> for MacroValue {
    fn from(value: f32) -> Self {
        Self::Number(Some(Number::Float(f64::from(value))))
    }
}

impl From<f64> for MacroValue {
    fn from(value: f64) -> Self {
        Self::Number(Some(Number::Float(value)))
    }
}

impl From<Option<f64>> for MacroValue {
    fn from(value: Option<f64>) -> Self {
        Self::Number(value.map(Number::Float))
    }
}

impl From<Number> for MacroValue {
    fn from(value: Number) -> Self {
        Self::Number(Some(value))
    }
}

impl From<Duration> for MacroValue {
    fn from(value: Duration) -> Self {
        Self::Duration(value)
    }
}

impl From<Location> for MacroValue {
    fn from(value: Location) -> Self {
        Self::Location(value)
    }
}

impl From<World> for MacroValue {
    fn from(value: World) -> Self {
        Self::World(value)
    }
}

impl From<ItemStack> for MacroValue {
    fn from(value: ItemStack) -> Self {
        Self::Item(value)
    }
}

impl From<Identity> for MacroValue {
    fn from(value: Identity) -> Self {
        Self::Identity(value)
    }
}

impl From<Arc<dyn Recipient>> for MacroValue {
    fn from(value: Arc<dyn Recipient>) -> Self {
        Self::Recipient(value)
    }
}

impl From<Arc<dyn HostObject>> for MacroValue {
    fn from(value: Arc<dyn HostObject>) -> Self {
        Self::Object(value)
    }
}
