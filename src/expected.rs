use core::fmt;

use crate::maybe::{Maybe, MaybeOwned};
use crate::slot::Slot;

/// A value of type `T`, or the reason `E` it is not there.
///
/// Exactly one of the two is held, fixed at construction. Like
/// [`Optional`](crate::optional::Optional), the value may be owned or
/// borrowed for `'a`.
#[derive(Clone)]
pub struct Expected<'a, T, E> {
    state: Result<Slot<'a, T>, E>,
}

impl<'a, T, E> Expected<'a, T, E> {
    /// Fails with `failure` if one is given, otherwise holds `value`.
    ///
    /// # Examples
    /// ```
    /// # use optionals::prelude::*;
    /// assert_eq!(Expected::new(42, None::<Missing>).value_or(0), 42);
    /// assert_eq!(Expected::new(42, Some(Missing)).value_or(0), 0);
    /// ```
    pub fn new(value: T, failure: Option<E>) -> Self {
        match failure {
            Some(failure) => Self::from_failure(failure),
            None => Self::from_value(value),
        }
    }

    pub const fn from_value(value: T) -> Self {
        Self {
            state: Ok(Slot::Owned(value)),
        }
    }

    pub const fn from_failure(failure: E) -> Self { Self { state: Err(failure) } }

    /// Aliases `value` without copying it; always present.
    pub const fn borrowed(value: &'a T) -> Self {
        Self {
            state: Ok(Slot::Borrowed(value)),
        }
    }

    pub const fn is_borrowed(&self) -> bool {
        match &self.state {
            Ok(slot) => slot.is_borrowed(),
            Err(_) => false,
        }
    }

    /// The stored reason, or `None` when a value is present.
    pub const fn failure_reason(&self) -> Option<&E> {
        match &self.state {
            Ok(_) => None,
            Err(failure) => Some(failure),
        }
    }

    pub fn into_result(self) -> Result<T, E>
    where
        T: Clone,
    {
        self.state.map(Slot::into_owned)
    }
}

impl<T, E> Maybe for Expected<'_, T, E> {
    type Item = T;

    fn kind(&self) -> &'static str { "expected" }

    fn get(&self) -> Option<&T> { self.state.as_ref().ok().map(Slot::get) }
}

impl<T: Clone, E> MaybeOwned for Expected<'_, T, E> {
    fn into_option(self) -> Option<T> { self.state.ok().map(Slot::into_owned) }
}

impl<T, E> From<Result<T, E>> for Expected<'_, T, E> {
    fn from(value: Result<T, E>) -> Self {
        Self {
            state: value.map(Slot::Owned),
        }
    }
}

impl<T: PartialEq, E: PartialEq> PartialEq for Expected<'_, T, E> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.state, &other.state) {
            (Ok(a), Ok(b)) => a.get() == b.get(),
            (Err(a), Err(b)) => a == b,
            _ => false,
        }
    }
}

impl<T: Eq, E: Eq> Eq for Expected<'_, T, E> {}

impl<T: fmt::Display, E: fmt::Display> fmt::Display for Expected<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            Ok(slot) => write!(f, "Expected[{}]", slot.get()),
            Err(failure) => write!(f, "Expected[Unexpected, {failure}]"),
        }
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Expected<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            Ok(slot) => write!(f, "Expected[{:?}]", slot.get()),
            Err(failure) => write!(f, "Expected[Unexpected, {failure:?}]"),
        }
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize, E> serde::Serialize for Expected<'_, T, E> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        crate::wire::serialize(self.state.as_ref().ok().map(Slot::get), serializer)
    }
}

/// `null` decodes to a failure of `E::from(Missing)`; the original reason is
/// not on the wire.
#[cfg(feature = "serde")]
impl<'de, T, E> serde::Deserialize<'de> for Expected<'_, T, E>
where
    T: serde::Deserialize<'de>,
    E: From<crate::error::Missing>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        crate::wire::deserialize(deserializer).map(Self::adopt)
    }
}

#[cfg(feature = "serde")]
impl<T, E: From<crate::error::Missing>> Expected<'_, T, E> {
    /// Replaces the contents with a value decoded from `deserializer`; `null`
    /// turns the container into a [`Missing`](crate::error::Missing) failure.
    /// On error the container is left untouched.
    pub fn decode_from<'de, D>(&mut self, deserializer: D) -> Result<(), D::Error>
    where
        T: serde::Deserialize<'de>,
        D: serde::Deserializer<'de>,
    {
        let decoded = crate::wire::deserialize(deserializer)?;
        *self = Self::adopt(decoded);
        Ok(())
    }

    fn adopt(decoded: Option<T>) -> Self {
        log::trace!("expected decoded {}", if decoded.is_some() { "a value" } else { "null" });
        match decoded {
            Some(value) => Self::from_value(value),
            None => Self::from_failure(crate::error::Missing.into()),
        }
    }
}

#[cfg(feature = "json")]
impl<T, E> Expected<'_, T, E> {
    /// Encodes the value, or `null` on failure.
    pub fn to_json(&self) -> Result<alloc::vec::Vec<u8>, crate::error::WireError>
    where
        T: serde::Serialize,
    {
        crate::wire::encode_json(self.state.as_ref().ok().map(Slot::get))
    }

    pub fn decode_json(&mut self, payload: &[u8]) -> Result<(), crate::error::WireError>
    where
        T: serde::de::DeserializeOwned,
        E: From<crate::error::Missing>,
    {
        let decoded = crate::wire::decode_json(payload)?;
        *self = Self::adopt(decoded);
        Ok(())
    }
}
