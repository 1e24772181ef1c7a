//! Presence adapter between callers and the internal `Option` model.
//!
//! Inbound, an external "maybe absent" value (`Option<T>`) becomes an
//! [`Override`]: `None` means leave the field alone, `Some(v)` means replace
//! it. Clearing a field is never expressed through an override; it goes
//! through the clear sets instead, so "absent" can never be mistaken for
//! "unchanged".
//!
//! Outbound, [`try_get`] and [`try_get_ref`] turn a stored `Option` into a
//! presence flag plus an output slot that carries either the value or the
//! field type's [`Sentinel`].

use chrono::{DateTime, TimeDelta, Utc};

/// Per-field override in an update: carry the old value forward, or replace it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Override<T> {
    Unchanged,
    Set(T),
}

impl<T> Default for Override<T> {
    fn default() -> Self {
        Override::Unchanged
    }
}

impl<T> From<Option<T>> for Override<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Override::Set(v),
            None => Override::Unchanged,
        }
    }
}

impl<T> Override<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Override::Unchanged)
    }

    /// Resolve a required field against its current value.
    pub fn apply(self, current: &T) -> T
    where
        T: Clone,
    {
        match self {
            Override::Unchanged => current.clone(),
            Override::Set(v) => v,
        }
    }

    /// Resolve an optional field. Setting always yields a present value.
    pub fn apply_optional(self, current: &Option<T>) -> Option<T>
    where
        T: Clone,
    {
        match self {
            Override::Unchanged => current.clone(),
            Override::Set(v) => Some(v),
        }
    }
}

/// Reset a field to its empty default when flagged, otherwise copy it.
pub(crate) fn cleared<T: Clone + Default>(flag: bool, current: &T) -> T {
    if flag { T::default() } else { current.clone() }
}

/// Documented stand-in written to an output slot when a field is absent.
///
/// Sentinels are legitimate data elsewhere (a `-1` offset, the minimum
/// timestamp), so callers must gate on the presence flag and never compare
/// against the sentinel to infer absence.
pub trait Sentinel {
    fn sentinel() -> Self;
}

/// Absent lengths read as `-1`.
impl Sentinel for i64 {
    fn sentinel() -> Self {
        -1
    }
}

impl Sentinel for TimeDelta {
    fn sentinel() -> Self {
        TimeDelta::MIN
    }
}

impl Sentinel for DateTime<Utc> {
    fn sentinel() -> Self {
        DateTime::<Utc>::MIN_UTC
    }
}

/// Reference-like values read as `None`, the empty reference.
impl<T> Sentinel for Option<T> {
    fn sentinel() -> Self {
        None
    }
}

/// Write `value` (or the sentinel) into `out` and report presence.
pub fn try_get<V: Sentinel>(value: Option<V>, out: &mut V) -> bool {
    match value {
        Some(v) => {
            *out = v;
            true
        }
        None => {
            *out = V::sentinel();
            false
        }
    }
}

/// [`try_get`] for values handed out by reference.
pub fn try_get_ref<'a, V>(value: &'a Option<V>, out: &mut Option<&'a V>) -> bool {
    try_get(value.as_ref().map(Some), out)
}
