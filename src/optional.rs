use core::fmt;

use crate::error::Missing;
use crate::maybe::{Maybe, MaybeOwned};
use crate::slot::Slot;

/// A value of type `T`, or nothing.
///
/// The value is either owned or borrowed from the caller for `'a`; see
/// [`Optional::copied_from`] and [`Optional::borrowed`]. Owned optionals can
/// use any lifetime, usually `'static`.
#[derive(Clone)]
pub struct Optional<'a, T> {
    slot: Option<Slot<'a, T>>,
}

impl<'a, T> Optional<'a, T> {
    pub const fn empty() -> Self { Self { slot: None } }

    pub const fn from_value(value: T) -> Self {
        Self {
            slot: Some(Slot::Owned(value)),
        }
    }

    /// # Examples
    /// ```
    /// # use optionals::prelude::*;
    /// assert!(Optional::from_pair(1, true).has_value());
    /// assert!(Optional::from_pair(1, false).is_empty());
    /// ```
    pub fn from_pair(value: T, present: bool) -> Self {
        match present {
            true => Self::from_value(value),
            false => Self::empty(),
        }
    }

    /// Present iff `failure` is `None`. The failure itself is discarded.
    pub fn from_outcome<E>(value: T, failure: Option<E>) -> Self {
        match failure {
            Some(_) => Self::empty(),
            None => Self::from_value(value),
        }
    }

    /// Takes a private copy of the referenced value.
    ///
    /// # Examples
    /// ```
    /// # use optionals::prelude::*;
    /// let mut source = vec![1, 2];
    /// let copy = Optional::copied_from(Some(&source));
    /// source.push(3);
    /// assert_eq!(copy.must_get(), &[1, 2]);
    /// assert!(Optional::<u8>::copied_from(None).is_empty());
    /// ```
    pub fn copied_from(value: Option<&T>) -> Self
    where
        T: Clone,
    {
        value.cloned().into()
    }

    /// Aliases the referenced value without copying it. The borrow checker
    /// holds the caller to keeping it alive for `'a`.
    pub const fn borrowed(value: Option<&'a T>) -> Self {
        match value {
            Some(value) => Self {
                slot: Some(Slot::Borrowed(value)),
            },
            None => Self::empty(),
        }
    }

    pub const fn is_borrowed(&self) -> bool {
        match &self.slot {
            Some(slot) => slot.is_borrowed(),
            None => false,
        }
    }

    pub fn into_result(self) -> Result<T, Missing>
    where
        T: Clone,
    {
        self.into_option().ok_or(Missing)
    }
}

impl<T> Maybe for Optional<'_, T> {
    type Item = T;

    fn kind(&self) -> &'static str { "optional" }

    fn get(&self) -> Option<&T> { self.slot.as_ref().map(Slot::get) }
}

impl<T: Clone> MaybeOwned for Optional<'_, T> {
    fn into_option(self) -> Option<T> { self.slot.map(Slot::into_owned) }
}

impl<T> Default for Optional<'_, T> {
    fn default() -> Self { Self::empty() }
}

impl<T> From<Option<T>> for Optional<'_, T> {
    fn from(value: Option<T>) -> Self {
        Self {
            slot: value.map(Slot::Owned),
        }
    }
}

impl<T, E> From<Result<T, E>> for Optional<'_, T> {
    fn from(value: Result<T, E>) -> Self { value.ok().into() }
}

impl<T: PartialEq> PartialEq for Optional<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.slot.as_ref().map(Slot::get) == other.slot.as_ref().map(Slot::get)
    }
}

impl<T: Eq> Eq for Optional<'_, T> {}

impl<T: fmt::Display> fmt::Display for Optional<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            Some(slot) => write!(f, "Optional[{}]", slot.get()),
            None => f.write_str("Optional[]"),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Optional<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            Some(slot) => write!(f, "Optional[{:?}]", slot.get()),
            None => f.write_str("Optional[]"),
        }
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Optional<'_, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        crate::wire::serialize(self.slot.as_ref().map(Slot::get), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Optional<'_, T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        crate::wire::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(feature = "serde")]
impl<T> Optional<'_, T> {
    /// Replaces the contents with a value decoded from `deserializer`. On
    /// error the container is left untouched.
    pub fn decode_from<'de, D>(&mut self, deserializer: D) -> Result<(), D::Error>
    where
        T: serde::Deserialize<'de>,
        D: serde::Deserializer<'de>,
    {
        let decoded = crate::wire::deserialize(deserializer)?;
        self.put(decoded);
        Ok(())
    }

    fn put(&mut self, value: Option<T>) {
        log::trace!("optional decoded {}", if value.is_some() { "a value" } else { "null" });
        self.slot = value.map(Slot::Owned);
    }
}

#[cfg(feature = "json")]
impl<T> Optional<'_, T> {
    pub fn to_json(&self) -> Result<alloc::vec::Vec<u8>, crate::error::WireError>
    where
        T: serde::Serialize,
    {
        crate::wire::encode_json(self.slot.as_ref().map(Slot::get))
    }

    /// Like [`Optional::decode_from`], reading JSON. An empty payload clears
    /// the container just like `null`.
    ///
    /// # Examples
    /// ```
    /// # use optionals::prelude::*;
    /// let mut port = Optional::from_value(80u16);
    /// port.decode_json(b"8080").unwrap();
    /// assert_eq!(port.must_get(), &8080);
    /// port.decode_json(b"").unwrap();
    /// assert!(port.is_empty());
    /// ```
    pub fn decode_json(&mut self, payload: &[u8]) -> Result<(), crate::error::WireError>
    where
        T: serde::de::DeserializeOwned,
    {
        let decoded = crate::wire::decode_json(payload)?;
        self.put(decoded);
        Ok(())
    }
}
