/// Storage for a present value: either owned by the container or borrowed
/// from the caller for `'a`.
#[derive(Clone)]
pub(crate) enum Slot<'a, T> {
    Owned(T),
    Borrowed(&'a T),
}

impl<T> Slot<'_, T> {
    pub(crate) const fn get(&self) -> &T {
        match *self {
            Self::Owned(ref value) => value,
            Self::Borrowed(value) => value,
        }
    }

    pub(crate) const fn is_borrowed(&self) -> bool { matches!(self, Self::Borrowed(_)) }

    pub(crate) fn into_owned(self) -> T
    where
        T: Clone,
    {
        match self {
            Self::Owned(value) => value,
            Self::Borrowed(value) => value.clone(),
        }
    }
}

#[cold]
#[track_caller]
pub(crate) fn fatal(kind: &'static str) -> ! {
    log::error!("{kind} accessed without a value");
    panic!("{kind} is required")
}
