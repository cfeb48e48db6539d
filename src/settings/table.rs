// src/settings/table.rs

use super::error::{SettingsError, SettingsResult};
use super::value::SettingValue;
use bevy::prelude::Resource;
use serde::Serialize;
use std::collections::BTreeMap;

/// Named settings with fixed value kinds.
///
/// The set of names and the kind of each value is fixed by whoever builds
/// the table (normally the compiled-in defaults). Mutators refuse unknown
/// names and values of the wrong kind.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Settings {
    values: BTreeMap<String, SettingValue>,
}

impl Settings {
    pub fn from_pairs<I, N>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, SettingValue)>,
        N: Into<String>,
    {
        Self {
            values: pairs.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<SettingValue> {
        self.values.get(name).copied()
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            SettingValue::Bool(b) => Some(b),
            SettingValue::Int(_) => None,
        }
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            SettingValue::Int(i) => Some(i),
            SettingValue::Bool(_) => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SettingValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Replace a value. Returns whether anything changed.
    pub fn set(&mut self, name: &str, value: SettingValue) -> SettingsResult<bool> {
        let slot = self
            .values
            .get_mut(name)
            .ok_or_else(|| SettingsError::UnknownSetting(name.to_string()))?;
        if slot.kind() != value.kind() {
            return Err(SettingsError::TypeMismatch {
                name: name.to_string(),
                expected: slot.kind(),
                found: value.kind(),
            });
        }
        let changed = *slot != value;
        *slot = value;
        Ok(changed)
    }

    /// Flip a boolean setting and return the new value.
    pub fn toggle(&mut self, name: &str) -> SettingsResult<bool> {
        let current = self.expect_kind_bool(name)?;
        self.set(name, SettingValue::Bool(!current))?;
        Ok(!current)
    }

    /// Add `delta` to an integer setting (saturating) and return the new value.
    pub fn adjust(&mut self, name: &str, delta: i64) -> SettingsResult<i64> {
        let current = self.expect_kind_int(name)?;
        let next = current.saturating_add(delta);
        self.set(name, SettingValue::Int(next))?;
        Ok(next)
    }

    /// Parse text into the kind `name` already holds.
    pub fn parse_value(&self, name: &str, text: &str) -> SettingsResult<SettingValue> {
        let current = self
            .get(name)
            .ok_or_else(|| SettingsError::UnknownSetting(name.to_string()))?;
        current.parse_as(text).ok_or_else(|| SettingsError::InvalidValue {
            name: name.to_string(),
            input: text.to_string(),
            expected: current.kind(),
        })
    }

    pub(crate) fn insert_coerced(&mut self, name: &str, value: SettingValue) {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = slot.coerce(value);
        }
    }

    fn expect_kind_bool(&self, name: &str) -> SettingsResult<bool> {
        match self.get(name) {
            Some(SettingValue::Bool(b)) => Ok(b),
            Some(other) => Err(SettingsError::TypeMismatch {
                name: name.to_string(),
                expected: other.kind(),
                found: super::value::SettingKind::Bool,
            }),
            None => Err(SettingsError::UnknownSetting(name.to_string())),
        }
    }

    fn expect_kind_int(&self, name: &str) -> SettingsResult<i64> {
        match self.get(name) {
            Some(SettingValue::Int(i)) => Ok(i),
            Some(other) => Err(SettingsError::TypeMismatch {
                name: name.to_string(),
                expected: other.kind(),
                found: super::value::SettingKind::Int,
            }),
            None => Err(SettingsError::UnknownSetting(name.to_string())),
        }
    }
}
