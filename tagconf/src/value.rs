//! Coerced values and the leaf field types that can receive them.
//!
//! Coercers never produce a field's type directly. They return a [`Value`],
//! a closed set of shapes with integers and floats widened to 64 bits, and
//! the field's [`Leaf`] impl converts that value into the exact declared type.

use std::any::TypeId;
use std::time::Duration;

use crate::error::ParseError;

/// Underlying primitive kind of a leaf type.
///
/// Coercer providers fall back to the kind when they have no entry for the
/// exact type, so a newtype around `u16` that reports [`Kind::U16`] is parsed
/// by the stock `u16` coercer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    String,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    /// Anything without a primitive kind (durations, sequences, user types).
    /// Only exact-type entries can handle it.
    Other,
}

/// Identity of a leaf field's declared type, used for coercer lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldType {
    /// Exact type identity for tier-1 lookup
    pub id: TypeId,
    /// Type name for error messages
    pub name: &'static str,
    /// Primitive kind for tier-2 lookup
    pub kind: Kind,
}

impl FieldType {
    /// Describe `T` with the given primitive kind.
    pub fn of<T: 'static>(kind: Kind) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            kind,
        }
    }
}

/// A coerced value, before conversion to the field's exact type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    String(String),
    /// Any signed integer, already range-checked by the coercer
    Int(i64),
    /// Any unsigned integer, already range-checked by the coercer
    Uint(u64),
    /// Any float; `f32` coercers store the widened `f32`
    Float(f64),
    Duration(Duration),
    Bytes(Vec<u8>),
    StringList(Vec<String>),
    IntList(Vec<i64>),
}

impl Value {
    /// Short name of the value's shape, for mismatch errors.
    pub fn shape(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Int(_) => "signed integer",
            Value::Uint(_) => "unsigned integer",
            Value::Float(_) => "float",
            Value::Duration(_) => "duration",
            Value::Bytes(_) => "bytes",
            Value::StringList(_) => "string list",
            Value::IntList(_) => "integer list",
        }
    }
}

/// A field type that holds a single coerced value.
///
/// Implemented here for `bool`, `String`, every integer and float type,
/// [`Duration`], `Vec<u8>`, `Vec<String>` and `Vec<i64>`. Implement it for
/// your own types to make them usable as config fields; pair it with a
/// [`CoercerTable`](crate::CoercerTable) entry when the type needs its own
/// lexical form.
///
/// `Default` supplies the zero value: a leaf whose value is absent and allowed
/// to be empty is reset to it.
pub trait Leaf: Default + Sized + 'static {
    /// Type identity and primitive kind used to find a coercer.
    fn field_type() -> FieldType;

    /// Convert a coerced value into this type.
    fn from_value(value: Value) -> Result<Self, ParseError>;
}

fn mismatch<T>(value: &Value) -> ParseError {
    ParseError::Mismatch {
        found: value.shape(),
        expected: std::any::type_name::<T>(),
    }
}

fn out_of_range<T>(value: impl std::fmt::Display) -> ParseError {
    ParseError::OutOfRange {
        value: value.to_string(),
        type_name: std::any::type_name::<T>(),
    }
}

macro_rules! impl_integer_leaf {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Leaf for $ty {
                fn field_type() -> FieldType {
                    FieldType::of::<$ty>(Kind::$kind)
                }

                fn from_value(value: Value) -> Result<Self, ParseError> {
                    match value {
                        Value::Int(v) => <$ty>::try_from(v).map_err(|_| out_of_range::<$ty>(v)),
                        Value::Uint(v) => <$ty>::try_from(v).map_err(|_| out_of_range::<$ty>(v)),
                        other => Err(mismatch::<$ty>(&other)),
                    }
                }
            }
        )*
    };
}

impl_integer_leaf! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
}

impl Leaf for f32 {
    fn field_type() -> FieldType {
        FieldType::of::<f32>(Kind::F32)
    }

    fn from_value(value: Value) -> Result<Self, ParseError> {
        match value {
            Value::Float(v) => Ok(v as f32),
            other => Err(mismatch::<f32>(&other)),
        }
    }
}

impl Leaf for f64 {
    fn field_type() -> FieldType {
        FieldType::of::<f64>(Kind::F64)
    }

    fn from_value(value: Value) -> Result<Self, ParseError> {
        match value {
            Value::Float(v) => Ok(v),
            other => Err(mismatch::<f64>(&other)),
        }
    }
}

// Shapes that map one-to-one onto a `Value` variant.
macro_rules! impl_shape_leaf {
    ($($ty:ty => $kind:ident, $variant:ident);* $(;)?) => {
        $(
            impl Leaf for $ty {
                fn field_type() -> FieldType {
                    FieldType::of::<$ty>(Kind::$kind)
                }

                fn from_value(value: Value) -> Result<Self, ParseError> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(mismatch::<$ty>(&other)),
                    }
                }
            }
        )*
    };
}

impl_shape_leaf! {
    bool => Bool, Bool;
    String => String, String;
    Duration => Other, Duration;
    Vec<u8> => Other, Bytes;
    Vec<String> => Other, StringList;
    Vec<i64> => Other, IntList;
}
