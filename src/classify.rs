//! Nil, zero and length classification of arbitrary values.
//!
//! Each function is a pure function of the value's [`Shape`] and the
//! accessors of [`Inspect`]. None of them panic.

use crate::shape::{Inspect, Shape};
use tracing::trace;

/// Whether `v` is absent: the untyped nil, or a nilable reference that is null.
///
/// Empty but allocated containers are not nil.
pub fn is_nil(v: &dyn Inspect) -> bool {
    let shape = v.shape();
    let nil = match shape {
        Shape::Nil => true,
        s if s.is_nilable() => v.is_null(),
        _ => false,
    };
    trace!(%shape, nil, "is_nil");
    nil
}

/// Whether `v` is the zero value of its shape.
///
/// Containers are zero when empty, whether or not they were ever allocated.
/// Pointers are zero when null or when they point at a zero value.
pub fn is_zero(v: &dyn Inspect) -> bool {
    let shape = v.shape();
    if shape == Shape::Nil {
        return true;
    }
    if let Some(check) = v.zero_check() {
        return check.is_zero();
    }
    let zero = match shape {
        Shape::Channel | Shape::Mapping | Shape::Sequence => v.count().unwrap_or(0) == 0,
        Shape::Pointer => match v.pointee() {
            None => true,
            Some(target) => is_zero(target),
        },
        _ => v.is_default(),
    };
    trace!(%shape, zero, "is_zero");
    zero
}

/// Length of `v`, or `None` when length is undefined for its shape.
///
/// A pointer to a fixed-size array reports the array type's length without
/// dereferencing, so a null pointer-to-array still has a length.
pub fn length(v: &dyn Inspect) -> Option<usize> {
    match v.shape() {
        Shape::FixedArray | Shape::Channel | Shape::Mapping | Shape::Sequence | Shape::String => {
            v.count()
        }
        Shape::Pointer => v.pointee_fixed_len(),
        _ => None,
    }
}
