//! Route arguments.
//!
//! The router extracts an ordered list of values from the URL and the
//! dispatch layer passes them positionally to the action. Actions pull each
//! position out with the type they expect:
//!
//! ```rust
//! use switchyard_core::route_args;
//!
//! let args = route_args![5, "x"];
//! let id: i64 = args.arg(0).unwrap();
//! let slug: String = args.arg(1).unwrap();
//! assert_eq!((id, slug.as_str()), (5, "x"));
//! ```
//!
//! Arguments beyond what an action reads are ignored.

use crate::error::DispatchError;
use std::fmt;

/// A single value extracted from the request path.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteValue {
    /// An integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A boolean.
    Bool(bool),
    /// Anything else, usually the raw path segment.
    Str(String),
}

impl RouteValue {
    /// A short name for the kind of value held.
    pub const fn kind(&self) -> &'static str {
        match self {
            RouteValue::Int(_) => "int",
            RouteValue::Float(_) => "float",
            RouteValue::Bool(_) => "bool",
            RouteValue::Str(_) => "string",
        }
    }
}

impl fmt::Display for RouteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteValue::Int(v) => write!(f, "{v}"),
            RouteValue::Float(v) => write!(f, "{v}"),
            RouteValue::Bool(v) => write!(f, "{v}"),
            RouteValue::Str(v) => f.write_str(v),
        }
    }
}

macro_rules! impl_route_value_from {
    ($($t:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$t> for RouteValue {
                fn from(value: $t) -> Self {
                    RouteValue::$variant(value.into())
                }
            }
        )+
    };
}

impl_route_value_from!(
    i64 => Int,
    i32 => Int,
    i16 => Int,
    u32 => Int,
    u16 => Int,
    f64 => Float,
    f32 => Float,
    bool => Bool,
    String => Str,
    &str => Str,
);

/// Conversion from a [`RouteValue`] into the type an action expects.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be extracted from a route argument",
    label = "missing `FromRouteValue` implementation",
    note = "Implement `FromRouteValue` for `{Self}` to use it as an action parameter."
)]
pub trait FromRouteValue: Sized {
    /// Name of the type, used in error messages.
    const EXPECTED: &'static str;

    /// Attempt the conversion.
    fn from_route_value(value: &RouteValue) -> Option<Self>;
}

macro_rules! impl_from_route_value_int {
    ($($t:ty),+) => {
        $(
            impl FromRouteValue for $t {
                const EXPECTED: &'static str = stringify!($t);

                fn from_route_value(value: &RouteValue) -> Option<Self> {
                    match value {
                        RouteValue::Int(v) => <$t>::try_from(*v).ok(),
                        RouteValue::Str(s) => s.trim().parse().ok(),
                        _ => None,
                    }
                }
            }
        )+
    };
}

impl_from_route_value_int!(i64, i32, u64, u32, usize);

impl FromRouteValue for f64 {
    const EXPECTED: &'static str = "f64";

    fn from_route_value(value: &RouteValue) -> Option<Self> {
        match value {
            RouteValue::Float(v) => Some(*v),
            RouteValue::Int(v) => Some(*v as f64),
            RouteValue::Str(s) => s.trim().parse().ok(),
            RouteValue::Bool(_) => None,
        }
    }
}

impl FromRouteValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_route_value(value: &RouteValue) -> Option<Self> {
        match value {
            RouteValue::Bool(v) => Some(*v),
            RouteValue::Str(s) => match s.as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

impl FromRouteValue for String {
    const EXPECTED: &'static str = "string";

    fn from_route_value(value: &RouteValue) -> Option<Self> {
        Some(value.to_string())
    }
}

impl FromRouteValue for RouteValue {
    const EXPECTED: &'static str = "value";

    fn from_route_value(value: &RouteValue) -> Option<Self> {
        Some(value.clone())
    }
}

/// The ordered arguments of one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteArgs {
    values: Vec<RouteValue>,
}

impl RouteArgs {
    /// Create an empty argument list.
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Append a value.
    pub fn push(&mut self, value: impl Into<RouteValue>) {
        self.values.push(value.into());
    }

    /// Append a value, builder style.
    pub fn with(mut self, value: impl Into<RouteValue>) -> Self {
        self.push(value);
        self
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The raw value at `index`.
    pub fn get(&self, index: usize) -> Option<&RouteValue> {
        self.values.get(index)
    }

    /// Iterate over the values in order.
    pub fn iter(&self) -> std::slice::Iter<'_, RouteValue> {
        self.values.iter()
    }

    /// Extract the argument at `index` as `T`.
    ///
    /// # Errors
    ///
    /// [`DispatchError::MissingArgument`] if there is no value at `index`,
    /// [`DispatchError::InvalidArgument`] if it doesn't convert to `T`.
    pub fn arg<T: FromRouteValue>(&self, index: usize) -> Result<T, DispatchError> {
        let value = self
            .values
            .get(index)
            .ok_or(DispatchError::MissingArgument { index })?;

        T::from_route_value(value).ok_or_else(|| DispatchError::InvalidArgument {
            index,
            expected: T::EXPECTED,
            found: value.to_string(),
        })
    }

    /// Consume the list, returning the values.
    pub fn into_vec(self) -> Vec<RouteValue> {
        self.values
    }
}

impl From<Vec<RouteValue>> for RouteArgs {
    fn from(values: Vec<RouteValue>) -> Self {
        Self { values }
    }
}

impl FromIterator<RouteValue> for RouteArgs {
    fn from_iter<I: IntoIterator<Item = RouteValue>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RouteArgs {
    type Item = RouteValue;
    type IntoIter = std::vec::IntoIter<RouteValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a RouteArgs {
    type Item = &'a RouteValue;
    type IntoIter = std::slice::Iter<'a, RouteValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Build a [`RouteArgs`] from a list of values.
///
/// ```rust
/// use switchyard_core::route_args;
///
/// let args = route_args![42, "slug", true];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! route_args {
    () => {
        $crate::RouteArgs::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::RouteArgs::from(::std::vec![$($crate::RouteValue::from($value)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_extraction() {
        let args = route_args![5, "x"];
        assert_eq!(args.arg::<i64>(0).unwrap(), 5);
        assert_eq!(args.arg::<String>(1).unwrap(), "x");
    }

    #[test]
    fn test_path_segments_parse_into_numbers() {
        let args = route_args!["17", "2.5", "true"];
        assert_eq!(args.arg::<u32>(0).unwrap(), 17);
        assert_eq!(args.arg::<f64>(1).unwrap(), 2.5);
        assert!(args.arg::<bool>(2).unwrap());
    }

    #[test]
    fn test_missing_argument() {
        let args = route_args![1];
        assert!(matches!(
            args.arg::<i64>(1),
            Err(DispatchError::MissingArgument { index: 1 })
        ));
    }

    #[test]
    fn test_invalid_argument() {
        let args = route_args!["abc"];
        match args.arg::<i64>(0) {
            Err(DispatchError::InvalidArgument {
                index,
                expected,
                found,
            }) => {
                assert_eq!(index, 0);
                assert_eq!(expected, "i64");
                assert_eq!(found, "abc");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_negative_value_rejected_for_unsigned() {
        let args = route_args![-3];
        assert!(args.arg::<u32>(0).is_err());
        assert_eq!(args.arg::<i32>(0).unwrap(), -3);
    }

    #[test]
    fn test_empty_macro() {
        let args = route_args![];
        assert!(args.is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let args = RouteArgs::new().with(1).with("two").with(3.0);
        let kinds: Vec<_> = args.iter().map(RouteValue::kind).collect();
        assert_eq!(kinds, vec!["int", "string", "float"]);
    }
}
