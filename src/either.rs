use core::fmt;

use crate::maybe::{Maybe, MaybeOwned};

/// The result of a container fallback: the receiver (`Left`) when it held a
/// value, otherwise the fallback (`Right`). Both sides share an `Item`, so
/// the pair is itself a [`Maybe`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<L, R> Either<L, R> {
    pub fn left(self) -> Option<L> {
        match self {
            Self::Left(left) => Some(left),
            Self::Right(_) => None,
        }
    }

    pub fn right(self) -> Option<R> {
        match self {
            Self::Left(_) => None,
            Self::Right(right) => Some(right),
        }
    }

    pub const fn is_left(&self) -> bool { matches!(self, Self::Left(_)) }

    pub const fn is_right(&self) -> bool { matches!(self, Self::Right(_)) }
}

impl<T> Either<T, T> {
    /// Whichever side is held, for fallbacks between containers of one kind.
    pub fn into_inner(self) -> T {
        match self {
            Self::Left(inner) | Self::Right(inner) => inner,
        }
    }
}

impl<L, R> Maybe for Either<L, R>
where
    L: Maybe,
    R: Maybe<Item = L::Item>,
{
    type Item = L::Item;

    fn kind(&self) -> &'static str {
        match self {
            Self::Left(left) => left.kind(),
            Self::Right(right) => right.kind(),
        }
    }

    fn get(&self) -> Option<&L::Item> {
        match self {
            Self::Left(left) => left.get(),
            Self::Right(right) => right.get(),
        }
    }
}

impl<L, R> MaybeOwned for Either<L, R>
where
    L: MaybeOwned,
    R: MaybeOwned<Item = L::Item>,
{
    fn into_option(self) -> Option<L::Item> {
        match self {
            Self::Left(left) => left.into_option(),
            Self::Right(right) => right.into_option(),
        }
    }
}

impl<L: fmt::Display, R: fmt::Display> fmt::Display for Either<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left(left) => left.fmt(f),
            Self::Right(right) => right.fmt(f),
        }
    }
}
