//! Identifier management using string interning for efficient string storage and comparison
//!
//! This module provides the [`Id`] type with an efficient string-interner based approach.
//! Catalogue node ids are interned once at load, so the graph store, layout and
//! visibility state can key their maps on a `Copy` handle instead of `String`.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Efficient identifier type using string interning
///
/// # Examples
///
/// ```
/// use cartograph_core::identifier::Id;
///
/// let table = Id::new("hosp_admissions");
/// let same = Id::new("hosp_admissions");
///
/// assert_eq!(table, same);
/// assert_eq!(table, "hosp_admissions");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Runs `f` with the string this identifier was interned from.
    ///
    /// Avoids an allocation when the caller only needs to inspect the text,
    /// e.g. for a prefix match.
    pub fn with_str<R>(self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        let value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        f(value)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.with_str(str::to_owned);
        write!(f, "{value}")
    }
}

impl std::str::FromStr for Id {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// This is a convenience implementation that calls `Id::new`.
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        self.with_str(|value| value == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.with_str(|value| serializer.serialize_str(value))
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("hosp_patients");
        let id2 = Id::new("hosp_patients");
        let id3 = Id::new("icu_stays");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "hosp_patients");
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("display_test");
        assert_eq!(format!("{}", id), "display_test");
    }

    #[test]
    fn test_from_trait() {
        let id1: Id = "subject_id".into();
        let id2 = Id::new("subject_id");

        assert_eq!(id1, id2);
    }

    #[test]
    fn test_with_str() {
        let id = Id::new("hosp_labevents");
        assert!(id.with_str(|name| name.starts_with("hosp")));
        assert_eq!(id.with_str(str::len), "hosp_labevents".len());
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashMap;

        let id1 = Id::new("key1");
        let id2 = Id::new("key1");
        let id3 = Id::new("key2");

        let mut map = HashMap::new();
        map.insert(id1, "value1");
        map.insert(id3, "value2");

        assert_eq!(map.get(&id2), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("icu_chartevents");

        assert!(id == "icu_chartevents");
        assert!(id != "icu");

        let empty = Id::new("");
        assert!(empty == "");
    }

    #[test]
    fn test_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            id: Id,
        }

        let wrapper: Wrapper = toml::from_str(r#"id = "hadm_id""#).unwrap();
        assert_eq!(wrapper.id, "hadm_id");
    }
}
