//! Merge policies applied when computed values meet an existing target
//!
//! Options are plain values handed to every recursive call of a mapping; there
//! is no process-wide default beyond [`MergeOptions::default`].

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a computed object is combined with the object already in the target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectMergeMode {
    /// Deep merge with computed values winning conflicts
    #[default]
    Overwrite,
    /// Deep merge with target values winning conflicts
    Preserve,
    /// Discard the target and use the computed object
    Replace,
}

/// How a computed array is combined with the array already in the target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayMergeMode {
    /// Discard the target and use the computed array
    #[default]
    Replace,
    /// Target items followed by computed items
    Append,
    /// Computed items followed by target items
    Prepend,
}

/// Fully specified merge options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeOptions {
    pub object_merge_mode: ObjectMergeMode,
    pub array_merge_mode: ArrayMergeMode,
}

impl MergeOptions {
    pub fn new(object_merge_mode: ObjectMergeMode, array_merge_mode: ArrayMergeMode) -> Self {
        Self {
            object_merge_mode,
            array_merge_mode,
        }
    }
}

/// Per-call options where any field may be left to its default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_merge_mode: Option<ObjectMergeMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_merge_mode: Option<ArrayMergeMode>,
}

impl MapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the object merge mode
    pub fn object_merge_mode(mut self, mode: ObjectMergeMode) -> Self {
        self.object_merge_mode = Some(mode);
        self
    }

    /// Set the array merge mode
    pub fn array_merge_mode(mut self, mode: ArrayMergeMode) -> Self {
        self.array_merge_mode = Some(mode);
        self
    }

    /// Fill unspecified fields from [`MergeOptions::default`]
    pub fn resolve(self) -> MergeOptions {
        let defaults = MergeOptions::default();
        MergeOptions {
            object_merge_mode: self.object_merge_mode.unwrap_or(defaults.object_merge_mode),
            array_merge_mode: self.array_merge_mode.unwrap_or(defaults.array_merge_mode),
        }
    }
}

impl From<MergeOptions> for MapOptions {
    fn from(options: MergeOptions) -> Self {
        Self {
            object_merge_mode: Some(options.object_merge_mode),
            array_merge_mode: Some(options.array_merge_mode),
        }
    }
}

impl FromStr for ObjectMergeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "preserve" => Ok(Self::Preserve),
            "replace" => Ok(Self::Replace),
            _ => Err(Error::configuration(
                "Unknown object merge mode, expected overwrite, preserve or replace",
                s,
            )),
        }
    }
}

impl fmt::Display for ObjectMergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Overwrite => "overwrite",
            Self::Preserve => "preserve",
            Self::Replace => "replace",
        };
        f.write_str(name)
    }
}

impl FromStr for ArrayMergeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "append" => Ok(Self::Append),
            "prepend" => Ok(Self::Prepend),
            _ => Err(Error::configuration(
                "Unknown array merge mode, expected replace, append or prepend",
                s,
            )),
        }
    }
}

impl fmt::Display for ArrayMergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Replace => "replace",
            Self::Append => "append",
            Self::Prepend => "prepend",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = MergeOptions::default();
        assert_eq!(options.object_merge_mode, ObjectMergeMode::Overwrite);
        assert_eq!(options.array_merge_mode, ArrayMergeMode::Replace);
    }

    #[test]
    fn test_partial_options_resolve() {
        let options = MapOptions::new().array_merge_mode(ArrayMergeMode::Append).resolve();
        assert_eq!(options, MergeOptions::new(ObjectMergeMode::Overwrite, ArrayMergeMode::Append));
    }

    #[test]
    fn test_deserialize_partial_options() {
        let options: MapOptions = serde_json::from_value(json!({"objectMergeMode": "preserve"})).unwrap();
        assert_eq!(options.object_merge_mode, Some(ObjectMergeMode::Preserve));
        assert_eq!(options.array_merge_mode, None);
        assert_eq!(options.resolve().array_merge_mode, ArrayMergeMode::Replace);
    }

    #[test]
    fn test_serialize_full_options() {
        let value = serde_json::to_value(MergeOptions::default()).unwrap();
        assert_eq!(value, json!({"objectMergeMode": "overwrite", "arrayMergeMode": "replace"}));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Preserve".parse::<ObjectMergeMode>().unwrap(), ObjectMergeMode::Preserve);
        assert_eq!("prepend".parse::<ArrayMergeMode>().unwrap(), ArrayMergeMode::Prepend);

        let err = "merge".parse::<ObjectMergeMode>().unwrap_err();
        assert!(matches!(err, Error::Configuration { value: Some(ref v), .. } if v == "merge"));
    }

    #[test]
    fn test_display_round_trip() {
        for mode in [ArrayMergeMode::Replace, ArrayMergeMode::Append, ArrayMergeMode::Prepend] {
            assert_eq!(mode.to_string().parse::<ArrayMergeMode>().unwrap(), mode);
        }
    }
}
