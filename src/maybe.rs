use core::convert::Infallible;

use crate::either::Either;
use crate::slot::fatal;

/// A container that either holds an `Item` or does not.
///
/// Every fallback family has one base method taking a cancellation token and
/// a fallible producer; the remaining shapes are lowered onto it. Lazy
/// producers and callbacks run at most once, and never when a value is
/// present. Tokens are handed to the producer as-is and otherwise ignored.
///
/// Everything here works through `&self`, so no bound is placed on `Item`.
/// Taking the value out is [`MaybeOwned`].
pub trait Maybe {
    type Item;

    /// Name used in the panic message of fatal accessors.
    fn kind(&self) -> &'static str;

    fn get(&self) -> Option<&Self::Item>;

    fn has_value(&self) -> bool { self.get().is_some() }

    fn is_empty(&self) -> bool { !self.has_value() }

    /// Panics if there is no value.
    #[track_caller]
    fn require_value(&self) {
        if self.is_empty() {
            fatal(self.kind());
        }
    }

    #[track_caller]
    fn must_get(&self) -> &Self::Item {
        match self.get() {
            Some(value) => value,
            None => fatal(self.kind()),
        }
    }

    /// # Safety
    /// The container must hold a value.
    unsafe fn value_unchecked(&self) -> &Self::Item {
        match self.get() {
            Some(value) => value,
            None => unsafe { core::hint::unreachable_unchecked() },
        }
    }

    /// `self` if present, otherwise `other`, which may be a different kind of
    /// container. `other` has already been built by the caller either way.
    ///
    /// # Examples
    /// ```
    /// # use optionals::prelude::*;
    /// let cached = Optional::<u16>::empty();
    /// let loaded = Expected::<u16, Missing>::from_value(8080);
    /// assert_eq!(cached.or(loaded).must_value(), 8080);
    /// ```
    fn or<M>(self, other: M) -> Either<Self, M>
    where
        Self: Sized,
        M: Maybe<Item = Self::Item>,
    {
        if self.has_value() { Either::Left(self) } else { Either::Right(other) }
    }

    fn or_else<M, F>(self, f: F) -> Either<Self, M>
    where
        Self: Sized,
        M: Maybe<Item = Self::Item>,
        F: FnOnce() -> M,
    {
        match self.or_else_try_with((), |()| Ok::<_, Infallible>(f())) {
            Ok(c) => c,
            Err(b) => match b {},
        }
    }

    fn or_else_try<M, E, F>(self, f: F) -> Result<Either<Self, M>, E>
    where
        Self: Sized,
        M: Maybe<Item = Self::Item>,
        F: FnOnce() -> Result<M, E>,
    {
        self.or_else_try_with((), |()| f())
    }

    fn or_else_with<C, M, F>(self, token: C, f: F) -> Either<Self, M>
    where
        Self: Sized,
        M: Maybe<Item = Self::Item>,
        F: FnOnce(C) -> M,
    {
        match self.or_else_try_with(token, |token| Ok::<_, Infallible>(f(token))) {
            Ok(c) => c,
            Err(b) => match b {},
        }
    }

    fn or_else_try_with<C, M, E, F>(self, token: C, f: F) -> Result<Either<Self, M>, E>
    where
        Self: Sized,
        M: Maybe<Item = Self::Item>,
        F: FnOnce(C) -> Result<M, E>,
    {
        if self.has_value() {
            Ok(Either::Left(self))
        } else {
            f(token).map(Either::Right)
        }
    }

    fn get_or<'r>(&'r self, default: &'r Self::Item) -> &'r Self::Item {
        self.get().unwrap_or(default)
    }

    fn get_or_else<'r, F>(&'r self, f: F) -> &'r Self::Item
    where
        F: FnOnce() -> &'r Self::Item,
    {
        match self.get_or_else_try_with((), |()| Ok::<_, Infallible>(f())) {
            Ok(c) => c,
            Err(b) => match b {},
        }
    }

    fn get_or_else_try<'r, E, F>(&'r self, f: F) -> Result<&'r Self::Item, E>
    where
        F: FnOnce() -> Result<&'r Self::Item, E>,
    {
        self.get_or_else_try_with((), |()| f())
    }

    fn get_or_else_with<'r, C, F>(&'r self, token: C, f: F) -> &'r Self::Item
    where
        F: FnOnce(C) -> &'r Self::Item,
    {
        match self.get_or_else_try_with(token, |token| Ok::<_, Infallible>(f(token))) {
            Ok(c) => c,
            Err(b) => match b {},
        }
    }

    fn get_or_else_try_with<'r, C, E, F>(&'r self, token: C, f: F) -> Result<&'r Self::Item, E>
    where
        F: FnOnce(C) -> Result<&'r Self::Item, E>,
    {
        match self.get() {
            Some(value) => Ok(value),
            None => f(token),
        }
    }

    fn for_each_ref<F>(&self, f: F)
    where
        F: FnOnce(&Self::Item),
    {
        let f = |(), value: &Self::Item| {
            f(value);
            Ok::<_, Infallible>(())
        };
        match self.try_for_each_ref_with((), f) {
            Ok(()) => (),
            Err(b) => match b {},
        }
    }

    fn try_for_each_ref<E, F>(&self, f: F) -> Result<(), E>
    where
        F: FnOnce(&Self::Item) -> Result<(), E>,
    {
        self.try_for_each_ref_with((), |(), value| f(value))
    }

    fn for_each_ref_with<C, F>(&self, token: C, f: F)
    where
        F: FnOnce(C, &Self::Item),
    {
        let f = |token, value: &Self::Item| {
            f(token, value);
            Ok::<_, Infallible>(())
        };
        match self.try_for_each_ref_with(token, f) {
            Ok(()) => (),
            Err(b) => match b {},
        }
    }

    fn try_for_each_ref_with<C, E, F>(&self, token: C, f: F) -> Result<(), E>
    where
        F: FnOnce(C, &Self::Item) -> Result<(), E>,
    {
        match self.get() {
            Some(value) => f(token, value),
            None => Ok(()),
        }
    }
}

/// By-value access. Implemented by the containers for `Item: Clone`; a
/// borrowed value is cloned on release.
pub trait MaybeOwned: Maybe {
    fn into_option(self) -> Option<Self::Item>
    where
        Self: Sized;

    /// # Examples
    /// ```
    /// # use optionals::prelude::*;
    /// assert_eq!(Optional::from_value(3).must_value(), 3);
    /// ```
    #[track_caller]
    fn must_value(self) -> Self::Item
    where
        Self: Sized,
    {
        let kind = self.kind();
        match self.into_option() {
            Some(value) => value,
            None => fatal(kind),
        }
    }

    /// # Safety
    /// The container must hold a value.
    unsafe fn into_value_unchecked(self) -> Self::Item
    where
        Self: Sized,
    {
        match self.into_option() {
            Some(value) => value,
            None => unsafe { core::hint::unreachable_unchecked() },
        }
    }

    /// The value and `true`, or the zero value and `false`.
    fn value_or_flag(self) -> (Self::Item, bool)
    where
        Self: Sized,
        Self::Item: Default,
    {
        match self.into_option() {
            Some(value) => (value, true),
            None => (Default::default(), false),
        }
    }

    fn value_or(self, default: Self::Item) -> Self::Item
    where
        Self: Sized,
    {
        self.into_option().unwrap_or(default)
    }

    fn value_or_zero(self) -> Self::Item
    where
        Self: Sized,
        Self::Item: Default,
    {
        self.into_option().unwrap_or_default()
    }

    fn value_or_else<F>(self, f: F) -> Self::Item
    where
        Self: Sized,
        F: FnOnce() -> Self::Item,
    {
        match self.value_or_else_try_with((), |()| Ok::<_, Infallible>(f())) {
            Ok(c) => c,
            Err(b) => match b {},
        }
    }

    fn value_or_else_try<E, F>(self, f: F) -> Result<Self::Item, E>
    where
        Self: Sized,
        F: FnOnce() -> Result<Self::Item, E>,
    {
        self.value_or_else_try_with((), |()| f())
    }

    fn value_or_else_with<C, F>(self, token: C, f: F) -> Self::Item
    where
        Self: Sized,
        F: FnOnce(C) -> Self::Item,
    {
        match self.value_or_else_try_with(token, |token| Ok::<_, Infallible>(f(token))) {
            Ok(c) => c,
            Err(b) => match b {},
        }
    }

    /// # Examples
    /// ```
    /// # use optionals::prelude::*;
    /// let empty = Optional::<u32>::empty();
    /// let res = empty.value_or_else_try_with("ctx", |_| Err::<u32, _>("gave up"));
    /// assert_eq!(res, Err("gave up"));
    /// ```
    fn value_or_else_try_with<C, E, F>(self, token: C, f: F) -> Result<Self::Item, E>
    where
        Self: Sized,
        F: FnOnce(C) -> Result<Self::Item, E>,
    {
        match self.into_option() {
            Some(value) => Ok(value),
            None => f(token),
        }
    }

    fn for_each<F>(self, f: F)
    where
        Self: Sized,
        F: FnOnce(Self::Item),
    {
        let f = |(), value| {
            f(value);
            Ok::<_, Infallible>(())
        };
        match self.try_for_each_with((), f) {
            Ok(()) => (),
            Err(b) => match b {},
        }
    }

    fn try_for_each<E, F>(self, f: F) -> Result<(), E>
    where
        Self: Sized,
        F: FnOnce(Self::Item) -> Result<(), E>,
    {
        self.try_for_each_with((), |(), value| f(value))
    }

    fn for_each_with<C, F>(self, token: C, f: F)
    where
        Self: Sized,
        F: FnOnce(C, Self::Item),
    {
        let f = |token, value| {
            f(token, value);
            Ok::<_, Infallible>(())
        };
        match self.try_for_each_with(token, f) {
            Ok(()) => (),
            Err(b) => match b {},
        }
    }

    fn try_for_each_with<C, E, F>(self, token: C, f: F) -> Result<(), E>
    where
        Self: Sized,
        F: FnOnce(C, Self::Item) -> Result<(), E>,
    {
        match self.into_option() {
            Some(value) => f(token, value),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;
    use std::string::String;

    use crate::prelude::*;

    /// Fails the test if ever called.
    fn never<T>() -> T { panic!("fallback evaluated for a present container") }

    #[test]
    fn presence_queries_are_exclusive() {
        let present = Optional::from_value(1);
        let absent = Optional::<i32>::empty();
        assert!(present.has_value() && !present.is_empty());
        assert!(absent.is_empty() && !absent.has_value());
    }

    #[derive(Debug, PartialEq)]
    struct Handle(u8);

    #[test]
    fn shared_surface_needs_no_clone() {
        let present = Optional::from_value(Handle(1));
        let absent = Expected::<Handle, Missing>::from_failure(Missing);
        assert!(present.has_value());
        assert!(absent.is_empty());
        present.require_value();
        assert_eq!(present.must_get(), &Handle(1));
        assert_eq!(absent.get_or(&Handle(9)), &Handle(9));
        assert_eq!(present.get_or_else(never), &Handle(1));

        let seen = Cell::new(0);
        present.for_each_ref(|h| seen.set(h.0));
        absent.for_each_ref(|_| never::<()>());
        assert_eq!(seen.get(), 1);

        let chosen = absent.or(present);
        assert!(chosen.is_right());
        assert_eq!(chosen.must_get(), &Handle(1));
    }

    #[test]
    fn lazy_container_fallbacks_skip_producer_when_present() {
        let present = || Optional::from_value(1);
        assert_eq!(present().or_else(never::<Optional<i32>>).must_value(), 1);
        assert_eq!(
            present().or_else_try(never::<Result<Optional<i32>, ()>>),
            Ok(Either::Left(present()))
        );
        assert_eq!(present().or_else_with(7u8, |_| never::<Optional<i32>>()).must_value(), 1);
        assert_eq!(
            present().or_else_try_with(7u8, |_| never::<Result<Optional<i32>, ()>>()),
            Ok(Either::Left(present()))
        );
    }

    #[test]
    fn lazy_scalar_fallbacks_skip_producer_when_present() {
        let present = || Expected::<_, Missing>::from_value(1);
        assert_eq!(present().value_or_else(never), 1);
        assert_eq!(present().value_or_else_try(never::<Result<_, ()>>), Ok(1));
        assert_eq!(present().value_or_else_with((), |()| never()), 1);
        assert_eq!(present().value_or_else_try_with((), |()| never::<Result<_, ()>>()), Ok(1));
    }

    #[test]
    fn lazy_reference_fallbacks_skip_producer_when_present() {
        let present = Optional::from_value(1);
        assert_eq!(present.get_or_else(never), &1);
        assert_eq!(present.get_or_else_try(never::<Result<_, ()>>), Ok(&1));
        assert_eq!(present.get_or_else_with((), |()| never()), &1);
        assert_eq!(present.get_or_else_try_with((), |()| never::<Result<_, ()>>()), Ok(&1));
    }

    #[test]
    fn absent_container_evaluates_exactly_one_fallback() {
        let calls = Cell::new(0);
        let fallback = || {
            calls.set(calls.get() + 1);
            Optional::from_value(9)
        };
        let result = Optional::<i32>::empty().or_else(fallback);
        assert_eq!(result.must_value(), 9);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn fallback_failure_is_returned_verbatim() {
        let absent = Optional::<u8>::empty();
        assert_eq!(absent.clone().or_else_try(|| Err::<Optional<u8>, _>("down")), Err("down"));
        assert_eq!(absent.value_or_else_try(|| Err::<u8, _>(42)), Err(42));
    }

    #[test]
    fn fallback_crosses_container_kinds() {
        let failed = Expected::<u8, Missing>::from_failure(Missing);
        let recovered = failed.clone().or_else(|| Optional::from_value(4u8));
        assert!(recovered.is_right());
        assert_eq!(recovered.must_value(), 4);

        let chained = Optional::<u8>::empty().or(failed).or_else(|| Optional::from_value(5u8));
        assert_eq!(chained.kind(), "optional");
        assert_eq!(chained.value_or_zero(), 5);

        let kept = Optional::from_value(1u8).or_else(never::<Expected<u8, Missing>>);
        assert_eq!(kept.left().map(Optional::must_value), Some(1));
    }

    #[test]
    fn same_kind_chain_collapses() {
        let opt: Optional<'_, i32> = Optional::empty().or(Optional::from_value(3)).into_inner();
        assert_eq!(opt, Optional::from_value(3));
    }

    #[test]
    fn token_reaches_producer_untouched() {
        let absent = Expected::<String, &str>::from_failure("miss");
        let value = absent.value_or_else_with(String::from("token"), |token| token + "!");
        assert_eq!(value, "token!");

        let reason = Expected::<u8, &str>::from_failure("miss")
            .or_else_with(3u8, |token| Expected::<u8, &str>::from_value(token * 2));
        assert_eq!(reason.must_value(), 6);
    }

    #[test]
    fn eager_forms() {
        let absent = Optional::<i32>::empty();
        assert_eq!(absent.clone().or(Optional::from_value(2)).must_value(), 2);
        assert_eq!(Optional::from_value(1).or(Optional::from_value(2)).must_value(), 1);
        assert_eq!(absent.get_or(&5), &5);
        assert_eq!(absent.clone().value_or(5), 5);
        assert_eq!(absent.value_or_zero(), 0);
    }

    #[test]
    fn eager_forms_keep_present_expected() {
        let present = Expected::<i32, Missing>::from_value(1);
        assert_eq!(present.get_or(&2), &1);

        let chosen = present.clone().or(Optional::from_value(2));
        assert_eq!(chosen, Either::Left(present));
    }

    #[test]
    fn value_or_flag_reports_presence() {
        assert_eq!(Optional::from_value(4).value_or_flag(), (4, true));
        assert_eq!(Optional::<i32>::empty().value_or_flag(), (0, false));
        assert_eq!(Expected::<u8, Missing>::from_failure(Missing).value_or_flag(), (0, false));
    }

    #[test]
    fn iteration_visits_present_value_once() {
        let seen = Cell::new(0);
        Optional::from_value(3).for_each(|v| seen.set(seen.get() + v));
        Optional::from_value(4).for_each_ref(|v| seen.set(seen.get() + *v));
        Optional::from_value(5).for_each_with(10, |token, v| seen.set(seen.get() + token + v));
        assert_eq!(seen.get(), 22);
    }

    #[test]
    fn iteration_is_noop_when_absent() {
        let absent = Expected::<i32, Missing>::from_failure(Missing);
        absent.for_each_ref(|_| never::<()>());
        absent.for_each_ref_with((), |(), _| never::<()>());
        absent.clone().for_each(|_| never::<()>());
        absent.clone().for_each_with((), |(), _| never::<()>());
        Optional::<i32>::empty().for_each(|_| never::<()>());
        Optional::<i32>::empty().for_each_with(1u8, |_, _| never::<()>());
        assert_eq!(absent.try_for_each_ref(|_| never::<Result<(), &str>>()), Ok(()));
        assert_eq!(absent.try_for_each_ref_with((), |(), _| never::<Result<(), &str>>()), Ok(()));
        assert_eq!(absent.clone().try_for_each(|_| never::<Result<(), &str>>()), Ok(()));
        assert_eq!(absent.try_for_each_with((), |(), _| never::<Result<(), &str>>()), Ok(()));
    }

    #[test]
    fn iteration_failure_propagates() {
        let present = Optional::from_value(1);
        assert_eq!(present.try_for_each_ref(|_| Err("boom")), Err("boom"));
        assert_eq!(present.try_for_each(|v| if v > 0 { Err(v) } else { Ok(()) }), Err(1));
    }

    #[test]
    fn unchecked_access_after_check() {
        let present = Optional::from_value(8);
        if present.has_value() {
            assert_eq!(unsafe { *present.value_unchecked() }, 8);
            assert_eq!(unsafe { present.into_value_unchecked() }, 8);
        }
    }

    #[test]
    #[should_panic(expected = "optional is required")]
    fn require_value_on_empty_optional_halts() { Optional::<u8>::empty().require_value() }

    #[test]
    #[should_panic(expected = "expected is required")]
    fn must_value_on_failed_expected_halts() {
        let _ = Expected::<u8, Missing>::from_failure(Missing).must_value();
    }

    #[test]
    #[should_panic(expected = "optional is required")]
    fn must_get_on_empty_optional_halts() { let _ = Optional::<u8>::empty().must_get(); }

    #[test]
    #[should_panic(expected = "expected is required")]
    fn require_value_names_the_active_side() {
        Optional::<u8>::empty()
            .or(Expected::<u8, Missing>::from_failure(Missing))
            .require_value();
    }

    fn total<M: MaybeOwned<Item = u32>>(items: impl IntoIterator<Item = M>) -> u32 {
        items.into_iter().map(MaybeOwned::value_or_zero).sum()
    }

    #[test]
    fn generic_callers_accept_both_containers() {
        assert_eq!(total([Optional::from_value(1), Optional::empty()]), 1);
        assert_eq!(total([Expected::from_value(2), Expected::from_failure(Missing)]), 2);
    }
}
