use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Three-state optional field decoded from untrusted descriptors.
///
/// - `Unset`: the key was absent.
/// - `Value`: an explicit value was supplied.
/// - `Cleared`: the key was present but explicitly `null` (or rejected during normalization).
///
/// Keeping `Cleared` apart from `Unset` means a literal `0` or `null` is never mistaken for
/// "not provided" by the dependent-defaulting passes.
#[derive(Clone, Debug, PartialEq)]
pub enum Field<T> {
    /// Key absent.
    Unset,
    /// Explicit value.
    Value(T),
    /// Explicitly cleared.
    Cleared,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> Field<T> {
    /// True when the key was absent.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// True when the key was explicitly cleared.
    pub fn is_cleared(&self) -> bool {
        matches!(self, Self::Cleared)
    }

    /// Borrow the explicit value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unset | Self::Cleared => None,
        }
    }

    /// Consume into the explicit value, if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unset | Self::Cleared => None,
        }
    }

    /// Map the explicit value, preserving `Unset` / `Cleared`.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Self::Value(v) => Field::Value(f(v)),
            Self::Unset => Field::Unset,
            Self::Cleared => Field::Cleared,
        }
    }
}

impl<T: Copy> Field<T> {
    /// Copy out the explicit value, if any.
    pub fn get(&self) -> Option<T> {
        self.value().copied()
    }
}

impl<'de, T> Deserialize<'de> for Field<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Absent keys never reach here; `#[serde(default)]` yields `Unset`.
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Self::Value(v),
            None => Self::Cleared,
        })
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Value(v) => v.serialize(serializer),
            Self::Unset | Self::Cleared => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/field.rs"]
mod tests;
