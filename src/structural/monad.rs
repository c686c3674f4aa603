//! Monad
//! Example: Optional/Maybe Type
//!
//! `Maybe<T>` wraps a value that may be absent and lets callers chain work on
//! it without checking for absence at every step. `std::option::Option`
//! already is this monad; `Maybe` spells the machinery out.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Maybe<T> {
    Just(T),
    Nothing,
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Maybe::Nothing
    }
}

impl<T> Maybe<T> {
    /// `unit` / `return`
    pub fn some(value: T) -> Self {
        Maybe::Just(value)
    }

    pub fn none() -> Self {
        Maybe::Nothing
    }

    pub fn is_some(&self) -> bool {
        matches!(self, Maybe::Just(_))
    }

    pub fn is_none(&self) -> bool {
        !self.is_some()
    }

    pub fn as_ref(&self) -> Maybe<&T> {
        match self {
            Maybe::Just(value) => Maybe::Just(value),
            Maybe::Nothing => Maybe::Nothing,
        }
    }

    pub fn into_inner(self) -> Option<T> {
        self.into()
    }

    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Maybe::Just(value) => value,
            Maybe::Nothing => default,
        }
    }

    pub fn unwrap_or_else(self, default: impl FnOnce() -> T) -> T {
        match self {
            Maybe::Just(value) => value,
            Maybe::Nothing => default(),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Maybe<U> {
        match self {
            Maybe::Just(value) => Maybe::Just(f(value)),
            Maybe::Nothing => Maybe::Nothing,
        }
    }

    /// `bind`: the step that makes this a monad rather than a functor.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Maybe<U>) -> Maybe<U> {
        match self {
            Maybe::Just(value) => f(value),
            Maybe::Nothing => Maybe::Nothing,
        }
    }

    pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Maybe<T> {
        match self {
            Maybe::Just(value) if predicate(&value) => Maybe::Just(value),
            _ => Maybe::Nothing,
        }
    }

    pub fn or(self, other: Maybe<T>) -> Maybe<T> {
        match self {
            Maybe::Just(_) => self,
            Maybe::Nothing => other,
        }
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Maybe::Just(value),
            None => Maybe::Nothing,
        }
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(value: Maybe<T>) -> Self {
        match value {
            Maybe::Just(value) => Some(value),
            Maybe::Nothing => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Maybe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Maybe::Just(value) => write!(f, "Maybe({value})"),
            Maybe::Nothing => write!(f, "Maybe(None)"),
        }
    }
}

impl<T> IntoIterator for Maybe<T> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_inner().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half(x: i32) -> Maybe<i32> {
        if x % 2 == 0 {
            Maybe::some(x / 2)
        } else {
            Maybe::none()
        }
    }

    fn decrement(x: i32) -> Maybe<i32> {
        if x > 0 {
            Maybe::some(x - 1)
        } else {
            Maybe::none()
        }
    }

    #[test]
    fn test_map_and_unwrap_or() {
        assert_eq!(Maybe::some(5).map(|x| x + 1), Maybe::some(6));
        assert_eq!(Maybe::<i32>::none().map(|x| x + 1), Maybe::none());
        assert_eq!(Maybe::some(5).unwrap_or(10), 5);
        assert_eq!(Maybe::none().unwrap_or(10), 10);
    }

    #[test]
    fn test_display() {
        assert_eq!(Maybe::some(6).to_string(), "Maybe(6)");
        assert_eq!(Maybe::<i32>::none().to_string(), "Maybe(None)");
    }

    #[test]
    fn test_and_then_short_circuits() {
        let mut calls = 0;
        let result = Maybe::some(3).and_then(half).and_then(|x| {
            calls += 1;
            decrement(x)
        });
        assert_eq!(result, Maybe::none());
        assert_eq!(calls, 0);

        assert_eq!(Maybe::some(8).and_then(half).and_then(half), Maybe::some(2));
    }

    #[test]
    fn test_monad_laws() {
        for x in [-2, 0, 3, 8] {
            // left identity
            assert_eq!(Maybe::some(x).and_then(half), half(x));
            // right identity
            assert_eq!(Maybe::some(x).and_then(Maybe::some), Maybe::some(x));
            // associativity
            assert_eq!(
                Maybe::some(x).and_then(half).and_then(decrement),
                Maybe::some(x).and_then(|v| half(v).and_then(decrement))
            );
        }
    }

    #[test]
    fn test_option_round_trip_and_filter() {
        let m: Maybe<&str> = Some("rust").into();
        assert!(m.is_some());
        assert_eq!(m.filter(|s| s.len() > 10), Maybe::none());
        assert_eq!(m.into_inner(), Some("rust"));
        assert_eq!(Maybe::<u8>::default().or(Maybe::some(1)), Maybe::some(1));
        assert_eq!(Maybe::some(1).into_iter().count(), 1);
    }
}
