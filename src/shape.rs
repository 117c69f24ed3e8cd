use serde_json::Value;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::error::Error;
use std::fmt;
use std::io;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Runtime classification of a value's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Nil,
    Pointer,
    Mapping,
    Sequence,
    FixedArray,
    Channel,
    Function,
    Interface,
    String,
    Number,
    Bool,
    Struct,
}

impl Shape {
    /// Shapes whose values are references that may be absent.
    pub fn is_nilable(self) -> bool {
        matches!(
            self,
            Shape::Channel
                | Shape::Function
                | Shape::Interface
                | Shape::Mapping
                | Shape::Pointer
                | Shape::Sequence
        )
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Nil => "nil",
            Shape::Pointer => "pointer",
            Shape::Mapping => "mapping",
            Shape::Sequence => "sequence",
            Shape::FixedArray => "fixed array",
            Shape::Channel => "channel",
            Shape::Function => "function",
            Shape::Interface => "interface",
            Shape::String => "string",
            Shape::Number => "number",
            Shape::Bool => "bool",
            Shape::Struct => "struct",
        };
        f.write_str(name)
    }
}

/// Lets a type define its own zero value instead of relying on
/// [`Inspect::is_default`].
pub trait ZeroCheck {
    fn is_zero(&self) -> bool;
}

/// Exposes the runtime shape of a value to the classifier.
///
/// Only `shape` and `is_default` are required; the remaining methods carry
/// meaning for the shapes that use them and keep their defaults otherwise.
pub trait Inspect: fmt::Debug {
    fn shape(&self) -> Shape;

    /// Whether a nilable reference is absent.
    fn is_null(&self) -> bool {
        false
    }

    /// Element, byte or entry count at call time.
    fn count(&self) -> Option<usize> {
        None
    }

    /// The referenced value of a pointer, `None` when the pointer is null.
    fn pointee(&self) -> Option<&dyn Inspect> {
        None
    }

    /// Type-level length of the fixed-size array behind a pointer. Known even
    /// when the pointer is null.
    fn pointee_fixed_len(&self) -> Option<usize> {
        None
    }

    /// Whether the value is identical to the zero-initialized instance of its
    /// type.
    fn is_default(&self) -> bool;

    fn zero_check(&self) -> Option<&dyn ZeroCheck> {
        None
    }

    fn fixed_len() -> Option<usize>
    where
        Self: Sized,
    {
        None
    }

    /// Shape an `Option<Self>` takes on. Containers and interfaces set it so
    /// that `None` reads as a null container or interface rather than a null
    /// pointer to one.
    fn nullable_shape() -> Option<Shape>
    where
        Self: Sized,
    {
        None
    }
}

/// The untyped absence of a value.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Nil;

impl fmt::Debug for Nil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<nil>")
    }
}

impl Inspect for Nil {
    fn shape(&self) -> Shape {
        Shape::Nil
    }

    fn is_default(&self) -> bool {
        true
    }
}

macro_rules! inspect_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl Inspect for $ty {
            fn shape(&self) -> Shape {
                Shape::Number
            }

            fn is_default(&self) -> bool {
                *self == 0
            }
        }
    )*};
}

inspect_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! inspect_float {
    ($($ty:ty),* $(,)?) => {$(
        impl Inspect for $ty {
            fn shape(&self) -> Shape {
                Shape::Number
            }

            // -0.0 is not the zero bit pattern
            fn is_default(&self) -> bool {
                self.to_bits() == 0
            }
        }
    )*};
}

inspect_float!(f32, f64);

impl Inspect for char {
    fn shape(&self) -> Shape {
        Shape::Number
    }

    fn is_default(&self) -> bool {
        *self == '\0'
    }
}

impl Inspect for Duration {
    fn shape(&self) -> Shape {
        Shape::Number
    }

    fn is_default(&self) -> bool {
        self.is_zero()
    }
}

impl Inspect for bool {
    fn shape(&self) -> Shape {
        Shape::Bool
    }

    fn is_default(&self) -> bool {
        !*self
    }
}

impl Inspect for () {
    fn shape(&self) -> Shape {
        Shape::Struct
    }

    fn is_default(&self) -> bool {
        true
    }
}

macro_rules! inspect_string {
    ($($ty:ty),* $(,)?) => {$(
        impl Inspect for $ty {
            fn shape(&self) -> Shape {
                Shape::String
            }

            fn count(&self) -> Option<usize> {
                Some(self.len())
            }

            fn is_default(&self) -> bool {
                self.is_empty()
            }
        }
    )*};
}

inspect_string!(String, &str, Cow<'_, str>);

macro_rules! inspect_container {
    ($shape:expr => $($ty:ty),* $(,)?) => {$(
        impl<T: fmt::Debug> Inspect for $ty {
            fn shape(&self) -> Shape {
                $shape
            }

            fn count(&self) -> Option<usize> {
                Some(self.len())
            }

            fn is_default(&self) -> bool {
                self.is_empty()
            }

            fn nullable_shape() -> Option<Shape> {
                Some($shape)
            }
        }
    )*};
}

inspect_container!(Shape::Sequence => Vec<T>, VecDeque<T>, &[T]);
inspect_container!(Shape::Mapping => BTreeSet<T>);

impl<T: fmt::Debug, S> Inspect for HashSet<T, S> {
    fn shape(&self) -> Shape {
        Shape::Mapping
    }

    fn count(&self) -> Option<usize> {
        Some(self.len())
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn nullable_shape() -> Option<Shape> {
        Some(Shape::Mapping)
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> Inspect for HashMap<K, V, S> {
    fn shape(&self) -> Shape {
        Shape::Mapping
    }

    fn count(&self) -> Option<usize> {
        Some(self.len())
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn nullable_shape() -> Option<Shape> {
        Some(Shape::Mapping)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> Inspect for BTreeMap<K, V> {
    fn shape(&self) -> Shape {
        Shape::Mapping
    }

    fn count(&self) -> Option<usize> {
        Some(self.len())
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn nullable_shape() -> Option<Shape> {
        Some(Shape::Mapping)
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn shape(&self) -> Shape {
        Shape::FixedArray
    }

    fn count(&self) -> Option<usize> {
        Some(N)
    }

    fn is_default(&self) -> bool {
        self.iter().all(Inspect::is_default)
    }

    fn fixed_len() -> Option<usize> {
        Some(N)
    }
}

/// `None` is the null pointer, or the null container or interface when `T`
/// is one: `None::<Vec<T>>` stands for a nil sequence.
impl<T: Inspect> Inspect for Option<T> {
    fn shape(&self) -> Shape {
        T::nullable_shape().unwrap_or(Shape::Pointer)
    }

    fn is_null(&self) -> bool {
        self.is_none()
    }

    fn count(&self) -> Option<usize> {
        match self {
            Some(v) => v.count(),
            None => T::nullable_shape().map(|_| 0),
        }
    }

    fn pointee(&self) -> Option<&dyn Inspect> {
        self.as_ref().map(|v| v as &dyn Inspect)
    }

    fn pointee_fixed_len(&self) -> Option<usize> {
        T::fixed_len()
    }

    fn is_default(&self) -> bool {
        self.is_none()
    }
}

macro_rules! inspect_pointer {
    ($($ty:ty),* $(,)?) => {$(
        impl<T: Inspect> Inspect for $ty {
            fn shape(&self) -> Shape {
                Shape::Pointer
            }

            fn pointee(&self) -> Option<&dyn Inspect> {
                let target: &T = self;
                Some(target)
            }

            fn pointee_fixed_len(&self) -> Option<usize> {
                T::fixed_len()
            }

            fn is_default(&self) -> bool {
                false
            }
        }
    )*};
}

inspect_pointer!(&T, Box<T>, Rc<T>, Arc<T>);

macro_rules! inspect_fn {
    ($(($($arg:ident),*)),* $(,)?) => {$(
        impl<R, $($arg),*> Inspect for fn($($arg),*) -> R {
            fn shape(&self) -> Shape {
                Shape::Function
            }

            fn is_default(&self) -> bool {
                false
            }
        }
    )*};
}

inspect_fn!((), (A), (A, B), (A, B, C));

// Pointers to functions taking references, such as `fn(&str) -> usize`.
impl<R, A: ?Sized> Inspect for for<'a> fn(&'a A) -> R {
    fn shape(&self) -> Shape {
        Shape::Function
    }

    fn is_default(&self) -> bool {
        false
    }
}

impl<R, A: ?Sized, B: ?Sized> Inspect for for<'a, 'b> fn(&'a A, &'b B) -> R {
    fn shape(&self) -> Shape {
        Shape::Function
    }

    fn is_default(&self) -> bool {
        false
    }
}

// Errors play the part of a non-nil error interface; `None` is the nil one.
crate::inspect_error!(
    Box<dyn Error>,
    Box<dyn Error + Send + Sync>,
    io::Error,
);

impl<T> Inspect for crossbeam_channel::Receiver<T> {
    fn shape(&self) -> Shape {
        Shape::Channel
    }

    fn count(&self) -> Option<usize> {
        Some(self.len())
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn nullable_shape() -> Option<Shape> {
        Some(Shape::Channel)
    }
}

impl<T> Inspect for crossbeam_channel::Sender<T> {
    fn shape(&self) -> Shape {
        Shape::Channel
    }

    fn count(&self) -> Option<usize> {
        Some(self.len())
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn nullable_shape() -> Option<Shape> {
        Some(Shape::Channel)
    }
}

/// A JSON value behaves like an `any`: `Null` is a nil interface, every other
/// variant reports the shape it holds.
impl Inspect for Value {
    fn shape(&self) -> Shape {
        match self {
            Value::Null => Shape::Interface,
            Value::Bool(_) => Shape::Bool,
            Value::Number(_) => Shape::Number,
            Value::String(_) => Shape::String,
            Value::Array(_) => Shape::Sequence,
            Value::Object(_) => Shape::Mapping,
        }
    }

    fn is_null(&self) -> bool {
        self.is_null()
    }

    fn count(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.len()),
            Value::Array(a) => Some(a.len()),
            Value::Object(o) => Some(o.len()),
            _ => None,
        }
    }

    fn is_default(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !*b,
            Value::Number(n) => {
                n.as_i64() == Some(0)
                    || n.as_u64() == Some(0)
                    || n.as_f64().map(f64::to_bits) == Some(0)
            }
            Value::String(s) => s.is_empty(),
            Value::Array(a) => a.is_empty(),
            Value::Object(o) => o.is_empty(),
        }
    }
}

/// The epoch stands in for the zero timestamp.
impl ZeroCheck for SystemTime {
    fn is_zero(&self) -> bool {
        *self == UNIX_EPOCH
    }
}

impl Inspect for SystemTime {
    fn shape(&self) -> Shape {
        Shape::Struct
    }

    fn is_default(&self) -> bool {
        ZeroCheck::is_zero(self)
    }

    fn zero_check(&self) -> Option<&dyn ZeroCheck> {
        Some(self)
    }
}

/// Implements [`Inspect`] for plain structs. The zero value is whatever
/// `Default::default()` returns, compared with `PartialEq`.
///
/// ```
/// use fluent_assert::{inspect_struct, classify};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Point { x: i32, y: i32 }
/// inspect_struct!(Point);
///
/// assert!(classify::is_zero(&Point::default()));
/// assert!(!classify::is_zero(&Point { x: 1, y: 0 }));
/// ```
#[macro_export]
macro_rules! inspect_struct {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::Inspect for $ty {
            fn shape(&self) -> $crate::Shape {
                $crate::Shape::Struct
            }

            fn is_default(&self) -> bool {
                *self == <$ty as ::core::default::Default>::default()
            }
        }
    )+};
}

/// Implements [`Inspect`] for structs that report their own zero value
/// through [`ZeroCheck`].
#[macro_export]
macro_rules! inspect_zero_check {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::Inspect for $ty {
            fn shape(&self) -> $crate::Shape {
                $crate::Shape::Struct
            }

            fn is_default(&self) -> bool {
                $crate::ZeroCheck::is_zero(self)
            }

            fn zero_check(&self) -> ::core::option::Option<&dyn $crate::ZeroCheck> {
                ::core::option::Option::Some(self)
            }
        }
    )+};
}

/// Implements [`Inspect`] for error types, which classify as non-nil
/// interfaces. `Option<E>` is then nil exactly when it is `None`.
#[macro_export]
macro_rules! inspect_error {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::Inspect for $ty {
            fn shape(&self) -> $crate::Shape {
                $crate::Shape::Interface
            }

            fn is_default(&self) -> bool {
                false
            }

            fn nullable_shape() -> ::core::option::Option<$crate::Shape> {
                ::core::option::Option::Some($crate::Shape::Interface)
            }
        }
    )+};
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn shapes_of_std_types() {
        assert_eq!(Nil.shape(), Shape::Nil);
        assert_eq!(5u8.shape(), Shape::Number);
        assert_eq!("go".shape(), Shape::String);
        assert_eq!(vec![1].shape(), Shape::Sequence);
        assert_eq!([1, 2].shape(), Shape::FixedArray);
        assert_eq!(HashMap::<i32, i32>::new().shape(), Shape::Mapping);
        assert_eq!(Some(1).shape(), Shape::Pointer);
        assert_eq!(Box::new(1).shape(), Shape::Pointer);
        assert_eq!(json!(null).shape(), Shape::Interface);
        assert_eq!(json!({"a": 1}).shape(), Shape::Mapping);
        assert_eq!(UNIX_EPOCH.shape(), Shape::Struct);
    }

    #[test]
    fn function_pointers() {
        fn noop() {}
        fn double(x: i32) -> i32 {
            x * 2
        }
        let f: fn() = noop;
        let g: fn(i32) -> i32 = double;
        assert_eq!(f.shape(), Shape::Function);
        assert_eq!(g.shape(), Shape::Function);
        assert!(!g.is_null());

        let by_ref: fn(&str) -> usize = str::len;
        let pair: fn(&str, &[u8]) -> bool = |a, b| a.len() == b.len();
        assert_eq!(by_ref.shape(), Shape::Function);
        assert_eq!(pair.shape(), Shape::Function);
    }

    #[test]
    fn option_of_container_is_a_nullable_container() {
        let nil_seq: Option<Vec<String>> = None;
        assert_eq!(nil_seq.shape(), Shape::Sequence);
        assert!(nil_seq.is_null());
        assert_eq!(nil_seq.count(), Some(0));
        assert_eq!(Some(vec![1, 2]).count(), Some(2));
        assert_eq!(None::<HashMap<u8, u8>>.shape(), Shape::Mapping);
        assert_eq!(None::<Option<Vec<u8>>>.shape(), Shape::Pointer);
        assert_eq!(None::<i32>.count(), None);
    }

    #[test]
    fn errors_are_interfaces() {
        let boxed: Box<dyn std::error::Error> = "boom".into();
        assert_eq!(boxed.shape(), Shape::Interface);
        assert_eq!(None::<io::Error>.shape(), Shape::Interface);
        assert!(None::<Box<dyn std::error::Error + Send + Sync>>.is_null());
    }

    #[test]
    fn floats_use_bit_pattern() {
        assert!(0.0f64.is_default());
        assert!(!(-0.0f64).is_default());
    }

    #[test]
    fn pointer_to_array_knows_its_length_when_null() {
        let p: Option<[u8; 4]> = None;
        assert_eq!(p.pointee_fixed_len(), Some(4));
        assert!(p.pointee().is_none());
        assert_eq!(Box::new([0u8; 3]).pointee_fixed_len(), Some(3));
        assert_eq!(Box::new(7).pointee_fixed_len(), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(Shape::FixedArray.to_string(), "fixed array");
        assert_eq!(Shape::Number.to_string(), "number");
        assert_eq!(format!("{:?}", Nil), "<nil>");
    }
}
