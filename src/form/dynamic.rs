use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use compact_str::CompactString;
use rust_decimal::Decimal;

use super::engine::FieldKey;
use super::rules::{Presence, TextValue};
use super::validation::{FieldLens, FormModel};

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Str(CompactString),
    Num(Decimal),
    Bool(bool),
    Null,
}

impl FieldValue {
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Decimal::from_str(&format!("{value:.18}")).ok().map(Self::Num)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            FieldValue::Num(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Str(value) => f.write_str(value),
            FieldValue::Num(value) => write!(f, "{value}"),
            FieldValue::Bool(value) => write!(f, "{value}"),
            FieldValue::Null => Ok(()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.into())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value.into())
    }
}

impl From<CompactString> for FieldValue {
    fn from(value: CompactString) -> Self {
        FieldValue::Str(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Num(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Num(Decimal::from(value))
    }
}

impl Presence for FieldValue {
    fn is_present(&self) -> bool {
        match self {
            FieldValue::Str(value) => !value.trim().is_empty(),
            FieldValue::Num(_) => true,
            FieldValue::Bool(value) => *value,
            FieldValue::Null => false,
        }
    }
}

impl TextValue for FieldValue {
    fn text(&self) -> Option<&str> {
        self.as_text()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValueMap {
    entries: BTreeMap<FieldKey, FieldValue>,
}

impl ValueMap {
    pub fn new(entries: impl IntoIterator<Item = (&'static str, FieldValue)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, value)| (FieldKey::new(name), value))
                .collect(),
        }
    }

    pub fn get(&self, name: &'static str) -> Option<&FieldValue> {
        self.entries.get(&FieldKey::new(name))
    }
}

impl FormModel for ValueMap {
    type Fields = ();

    fn fields() -> Self::Fields {}

    fn field_keys(&self) -> Vec<FieldKey> {
        self.entries.keys().copied().collect()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ValueLens {
    key: FieldKey,
}

impl ValueLens {
    pub const fn new(name: &'static str) -> Self {
        Self {
            key: FieldKey::new(name),
        }
    }
}

impl FieldLens<ValueMap> for ValueLens {
    type Value = FieldValue;

    fn key(self) -> FieldKey {
        self.key
    }

    fn get<'a>(self, model: &'a ValueMap) -> &'a Self::Value {
        match model.entries.get(&self.key) {
            Some(value) => value,
            None => panic!("field `{}` is not declared in this form", self.key),
        }
    }

    fn set(self, model: &mut ValueMap, value: Self::Value) {
        match model.entries.get_mut(&self.key) {
            Some(slot) => *slot = value,
            None => panic!("field `{}` is not declared in this form", self.key),
        }
    }
}
