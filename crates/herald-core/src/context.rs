//! Per-message macro bindings.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{MacroError, MacroValue, Recipient, RecordKey};

/// Typed value store for one message composition.
///
/// Holds the recipient, the message key and the macros bound for this
/// composition. A context is owned by a single composing caller and is
/// dropped once the message has been processed.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use herald_core::{ContextMap, MacroValue, Recipient, RecordKey};
///
/// struct Console;
///
/// impl Recipient for Console {
///     fn name(&self) -> &str { "CONSOLE" }
///     fn send_message(&self, _message: &str) {}
/// }
///
/// let mut ctx = ContextMap::new(Arc::new(Console), RecordKey::new("MOTD").unwrap());
/// ctx.bind("COUNT", 3).unwrap();
/// assert!(!ctx.put_if_absent(RecordKey::new("COUNT").unwrap(), 4));
/// assert!(matches!(ctx.get("COUNT"), Some(MacroValue::Number(_))));
/// ```
pub struct ContextMap {
    recipient: Arc<dyn Recipient>,
    message_key: RecordKey,
    values: HashMap<RecordKey, MacroValue>,
}

impl ContextMap {
    #[must_use]
    pub fn new(recipient: Arc<dyn Recipient>, message_key: RecordKey) -> Self {
        Self {
            recipient,
            message_key,
            values: HashMap::new(),
        }
    }

    #[must_use]
    pub fn recipient(&self) -> &Arc<dyn Recipient> {
        &self.recipient
    }

    #[must_use]
    pub fn message_key(&self) -> &RecordKey {
        &self.message_key
    }

    /// Bind a value, replacing any existing binding. Returns the previous value.
    pub fn put(&mut self, key: RecordKey, value: impl Into<MacroValue>) -> Option<MacroValue> {
        self.values.insert(key, value.into())
    }

    /// Bind a value only if the key is unbound. Returns `true` if inserted.
    pub fn put_if_absent(&mut self, key: RecordKey, value: impl Into<MacroValue>) -> bool {
        use std::collections::hash_map::Entry;

        match self.values.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(value.into());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Bind a value under a string key, validating it first.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::BlankArgument`] for a blank key and
    /// [`MacroError::InvalidKey`] for any other malformed key.
    pub fn bind(&mut self, key: &str, value: impl Into<MacroValue>) -> Result<(), MacroError> {
        let key: RecordKey = key.parse()?;
        self.put(key, value);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MacroValue> {
        self.values.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<MacroValue> {
        self.values.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &RecordKey> {
        self.values.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RecordKey, &MacroValue)> {
        self.values.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for ContextMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextMap")
            .field("recipient", &self.recipient.name())
            .field("message_key", &self.message_key)
            .field("values", &self.values)
            .finish()
    }
}
