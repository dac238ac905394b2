//! Core data model for Herald message composition.
//!
//! This crate provides the types every other Herald crate shares:
//!
//! - [`RecordKey`]: validated, dot-namespaced macro key
//! - [`MacroValue`]: closed set of value kinds a macro can be bound to
//! - [`ContextMap`]: per-message recipient, message key and bindings
//! - [`ResultMap`]: resolved key → display string output
//! - [`MessageRecord`] / [`ResolvedRecord`]: templates before and after substitution
//! - [`Recipient`] / [`HostObject`]: host-side traits
//!
//! # Example
//!
//! ```
//! use herald_core::{RecordKey, ResultMap};
//!
//! let key = RecordKey::new("PLAYER_NAME").unwrap();
//! let results = ResultMap::single(key, "Alex");
//! assert_eq!(results.get("PLAYER_NAME"), Some("Alex"));
//! ```

mod context;
mod error;
mod key;
mod recipient;
mod record;
mod result;
mod value;

pub use context::ContextMap;
pub use error::MacroError;
pub use key::{RecordKey, SEPARATOR};
pub use recipient::Recipient;
pub use record::{Channel, MessageRecord, ResolvedRecord, TitleTiming};
pub use result::ResultMap;
pub use value::{HostObject, Identity, ItemStack, Location, MacroValue, Number, World};
