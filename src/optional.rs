//! Purpose: Define `Optional<T>`, a value holder that records whether a field was present.
//! Exports: `Optional`.
//! Role: The crate's core type; every other module exists to exercise or measure it.
//! Invariants: Only two states exist: present (bound to a `T`) or absent.
//! Invariants: JSON `null` and a missing key both decode to absent.
//! Invariants: `unwrap` on absent panics; it never substitutes a default.
//! Notes: No logging and no error wrapping; decode errors come back verbatim.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::json;

/// A value of type `T` that may or may not be present.
///
/// Decoding a JSON document into a struct with `Optional` fields yields an absent field
/// both when the key is missing and when it is sent as `null`:
///
/// ```
/// use optional_types::Optional;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Patch {
///     name: Optional<String>,
///     age: Optional<i64>,
/// }
///
/// let patch: Patch = serde_json::from_str(r#"{"name":null}"#).unwrap();
/// assert!(!patch.name.is_present());
/// assert!(!patch.age.is_present());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Optional<T> {
    value: Option<T>,
}

impl<T> Optional<T> {
    /// Absent instance; same as `Optional::default()`.
    pub const fn none() -> Self {
        Self { value: None }
    }

    /// Present instance bound to `value`.
    pub const fn some(value: T) -> Self {
        Self { value: Some(value) }
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    /// Returns the bound value and `true`, or `T::default()` and `false` when absent.
    pub fn get(&self) -> (T, bool)
    where
        T: Clone + Default,
    {
        match &self.value {
            Some(value) => (value.clone(), true),
            None => (T::default(), false),
        }
    }

    /// Returns the bound value.
    ///
    /// # Panics
    ///
    /// Panics when the value is absent. Check `is_present` or use `get`/`unwrap_or`
    /// wherever absence is an expected outcome.
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self.value {
            Some(value) => value,
            None => panic!("unwrap on absent value"),
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        self.value.unwrap_or(default)
    }

    pub fn unwrap_or_else(self, default: impl FnOnce() -> T) -> T {
        self.value.unwrap_or_else(default)
    }

    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.value.unwrap_or_default()
    }

    pub fn as_ref(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_option(self) -> Option<T> {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Optional<U> {
        Optional {
            value: self.value.map(f),
        }
    }

    /// Moves the value out, leaving `self` absent.
    pub fn take(&mut self) -> Self {
        Self {
            value: self.value.take(),
        }
    }

    /// Encodes as JSON: the encoding of `T` when present, `null` when absent.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error>
    where
        T: Serialize,
    {
        json::to_vec(self)
    }

    /// Decodes a single JSON token into `self`.
    ///
    /// `null` clears the value; any other token must decode as `T`. On error `self` is
    /// left as it was.
    pub fn decode(&mut self, input: &[u8]) -> Result<(), serde_json::Error>
    where
        T: DeserializeOwned,
    {
        *self = json::from_slice(input)?;
        Ok(())
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T> From<T> for Optional<T> {
    fn from(value: T) -> Self {
        Self::some(value)
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        Self { value }
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(optional: Optional<T>) -> Self {
        optional.value
    }
}

impl<T: Serialize> Serialize for Optional<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.value {
            Some(value) => serializer.serialize_some(value),
            None => serializer.serialize_none(),
        }
    }
}

// Going through `Option<T>` means serde's missing-field path (which calls
// `deserialize_option`) lands on absent without `#[serde(default)]`.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Optional<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}
