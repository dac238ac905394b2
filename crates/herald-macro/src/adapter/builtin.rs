//! Built-in adapters probing the [`HostObject`](herald_core::HostObject) capabilities.

use herald_core::MacroValue;

use super::Adapter;

/// Objects that occupy a location become [`MacroValue::Location`].
pub struct LocationAdapter;

impl Adapter for LocationAdapter {
    fn name(&self) -> &str {
        "location"
    }

    fn adapt(&self, value: &MacroValue) -> Option<MacroValue> {
        match value {
            MacroValue::Object(object) => object.location().map(MacroValue::Location),
            _ => None,
        }
    }
}

/// Objects that stand for a recipient become [`MacroValue::Recipient`].
pub struct RecipientAdapter;

impl Adapter for RecipientAdapter {
    fn name(&self) -> &str {
        "recipient"
    }

    fn adapt(&self, value: &MacroValue) -> Option<MacroValue> {
        match value {
            MacroValue::Object(object) => object.recipient().map(MacroValue::Recipient),
            _ => None,
        }
    }
}

/// Objects that point at a URL become [`MacroValue::Text`] holding the URL.
pub struct WebAddressAdapter;

impl Adapter for WebAddressAdapter {
    fn name(&self) -> &str {
        "web_address"
    }

    fn adapt(&self, value: &MacroValue) -> Option<MacroValue> {
        match value {
            MacroValue::Object(object) => object.web_address().map(MacroValue::Text),
            _ => None,
        }
    }
}
