#![doc = include_str!("readme.md")]
#![no_std]

#[cfg(feature = "json")]
extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod either;
pub mod error;
pub mod expected;
pub mod maybe;
pub mod optional;
mod slot;
#[cfg(feature = "serde")]
pub mod wire;

pub mod prelude {
    pub use core::convert::Infallible;

    #[cfg(feature = "json")]
    pub use crate::error::WireError;
    pub use crate::either::Either;
    pub use crate::error::Missing;
    pub use crate::expected::Expected;
    pub use crate::maybe::{Maybe, MaybeOwned};
    pub use crate::optional::Optional;
}
