//! String-to-value coercers and the providers that hand them out.
//!
//! A provider is asked for a coercer in two tiers: first by the field's exact
//! type, then by its primitive [`Kind`]. The loader asks its providers in
//! registration order and takes the first answer, so an earlier provider
//! shadows later ones for every type it covers.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Duration;

use crate::duration::parse_duration;
use crate::error::ParseError;
use crate::value::{FieldType, Kind, Leaf, Value};

/// Converts a raw string into a [`Value`].
pub type Coercer = fn(&str) -> Result<Value, ParseError>;

/// Source of coercers for field types.
pub trait CoercerProvider: Send + Sync {
    /// Coercer registered for exactly this type.
    fn by_type(&self, field_type: &FieldType) -> Option<Coercer>;

    /// Coercer registered for this primitive kind.
    fn by_kind(&self, kind: Kind) -> Option<Coercer>;

    /// Exact type first, then kind.
    fn lookup(&self, field_type: &FieldType) -> Option<Coercer> {
        self.by_type(field_type)
            .or_else(|| self.by_kind(field_type.kind))
    }
}

/// Parse a boolean.
///
/// Accepted spellings: `1`, `t`, `T`, `TRUE`, `true`, `True` and `0`, `f`,
/// `F`, `FALSE`, `false`, `False`. Anything else fails, including mixed case
/// such as `tRUE` and surrounding whitespace.
pub fn parse_bool(raw: &str) -> Result<bool, ParseError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ParseError::Bool(raw.to_string())),
    }
}

fn coerce_bool(raw: &str) -> Result<Value, ParseError> {
    parse_bool(raw).map(Value::Bool)
}

fn coerce_string(raw: &str) -> Result<Value, ParseError> {
    Ok(Value::String(raw.to_string()))
}

fn coerce_duration(raw: &str) -> Result<Value, ParseError> {
    Ok(Value::Duration(parse_duration(raw)?))
}

fn coerce_bytes(raw: &str) -> Result<Value, ParseError> {
    Ok(Value::Bytes(raw.as_bytes().to_vec()))
}

fn coerce_string_list(raw: &str) -> Result<Value, ParseError> {
    Ok(Value::StringList(raw.split(',').map(String::from).collect()))
}

fn coerce_int_list(raw: &str) -> Result<Value, ParseError> {
    raw.split(',')
        .map(|part| part.trim().parse::<i64>().map_err(ParseError::from))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::IntList)
}

macro_rules! signed_coercer {
    ($name:ident, $ty:ty) => {
        fn $name(raw: &str) -> Result<Value, ParseError> {
            Ok(Value::Int(raw.parse::<$ty>()? as i64))
        }
    };
}

macro_rules! unsigned_coercer {
    ($name:ident, $ty:ty) => {
        fn $name(raw: &str) -> Result<Value, ParseError> {
            Ok(Value::Uint(raw.parse::<$ty>()? as u64))
        }
    };
}

signed_coercer!(coerce_i8, i8);
signed_coercer!(coerce_i16, i16);
signed_coercer!(coerce_i32, i32);
signed_coercer!(coerce_i64, i64);
signed_coercer!(coerce_isize, isize);
unsigned_coercer!(coerce_u8, u8);
unsigned_coercer!(coerce_u16, u16);
unsigned_coercer!(coerce_u32, u32);
unsigned_coercer!(coerce_u64, u64);
unsigned_coercer!(coerce_usize, usize);

fn coerce_f32(raw: &str) -> Result<Value, ParseError> {
    let value = raw.parse::<f32>()?;
    finite_unless_infinity::<f32>(raw, value.is_infinite())?;
    Ok(Value::Float(f64::from(value)))
}

fn coerce_f64(raw: &str) -> Result<Value, ParseError> {
    let value = raw.parse::<f64>()?;
    finite_unless_infinity::<f64>(raw, value.is_infinite())?;
    Ok(Value::Float(value))
}

/// `str::parse` saturates out-of-range floats to infinity; only an explicit
/// infinity literal may produce one.
fn finite_unless_infinity<T>(raw: &str, infinite: bool) -> Result<(), ParseError> {
    let unsigned = raw.trim_start_matches(['+', '-']);
    let literal =
        unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity");
    if infinite && !literal {
        return Err(ParseError::OutOfRange {
            value: raw.to_string(),
            type_name: std::any::type_name::<T>(),
        });
    }
    Ok(())
}

static DEFAULT_TYPE_COERCERS: LazyLock<HashMap<TypeId, Coercer>> = LazyLock::new(|| {
    HashMap::from([
        (TypeId::of::<Duration>(), coerce_duration as Coercer),
        (TypeId::of::<Vec<u8>>(), coerce_bytes as Coercer),
        (TypeId::of::<Vec<String>>(), coerce_string_list as Coercer),
        (TypeId::of::<Vec<i64>>(), coerce_int_list as Coercer),
    ])
});

static DEFAULT_KIND_COERCERS: LazyLock<HashMap<Kind, Coercer>> = LazyLock::new(|| {
    HashMap::from([
        (Kind::Bool, coerce_bool as Coercer),
        (Kind::String, coerce_string as Coercer),
        (Kind::I8, coerce_i8 as Coercer),
        (Kind::I16, coerce_i16 as Coercer),
        (Kind::I32, coerce_i32 as Coercer),
        (Kind::I64, coerce_i64 as Coercer),
        (Kind::Isize, coerce_isize as Coercer),
        (Kind::U8, coerce_u8 as Coercer),
        (Kind::U16, coerce_u16 as Coercer),
        (Kind::U32, coerce_u32 as Coercer),
        (Kind::U64, coerce_u64 as Coercer),
        (Kind::Usize, coerce_usize as Coercer),
        (Kind::F32, coerce_f32 as Coercer),
        (Kind::F64, coerce_f64 as Coercer),
    ])
});

/// The built-in coercers for every [`Leaf`] type this crate implements.
///
/// Backed by process-wide tables that are built on first use and never
/// modified, so any number of loaders can share them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCoercers;

impl CoercerProvider for DefaultCoercers {
    fn by_type(&self, field_type: &FieldType) -> Option<Coercer> {
        DEFAULT_TYPE_COERCERS.get(&field_type.id).copied()
    }

    fn by_kind(&self, kind: Kind) -> Option<Coercer> {
        DEFAULT_KIND_COERCERS.get(&kind).copied()
    }
}

/// A user-assembled provider.
///
/// ```
/// use tagconf::{CoercerTable, Kind, ParseError, Value};
///
/// // Accept "yes"/"no" for every bool field.
/// let table = CoercerTable::new().with_kind(Kind::Bool, |raw| match raw {
///     "yes" => Ok(Value::Bool(true)),
///     "no" => Ok(Value::Bool(false)),
///     other => Err(ParseError::custom(format!("expected yes or no, got {other}"))),
/// });
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoercerTable {
    types: HashMap<TypeId, Coercer>,
    kinds: HashMap<Kind, Coercer>,
}

impl CoercerTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a coercer for exactly `T`.
    pub fn with_type<T: Leaf>(mut self, coercer: Coercer) -> Self {
        self.types.insert(T::field_type().id, coercer);
        self
    }

    /// Register a coercer for every type of the given kind.
    pub fn with_kind(mut self, kind: Kind, coercer: Coercer) -> Self {
        self.kinds.insert(kind, coercer);
        self
    }
}

impl CoercerProvider for CoercerTable {
    fn by_type(&self, field_type: &FieldType) -> Option<Coercer> {
        self.types.get(&field_type.id).copied()
    }

    fn by_kind(&self, kind: Kind) -> Option<Coercer> {
        self.kinds.get(&kind).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coerce<T: Leaf>(raw: &str) -> Result<T, ParseError> {
        let coercer = DefaultCoercers
            .lookup(&T::field_type())
            .expect("default coercer");
        T::from_value(coercer(raw)?)
    }

    #[test]
    fn test_bool_spellings() {
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(parse_bool(raw).unwrap(), "{raw}");
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            assert!(!parse_bool(raw).unwrap(), "{raw}");
        }
        for raw in ["yes", "tRUE", " true", "2", ""] {
            assert!(parse_bool(raw).is_err(), "{raw}");
        }
    }

    #[test]
    fn test_signed_width_limits() {
        assert_eq!(coerce::<i8>("-128").unwrap(), i8::MIN);
        assert_eq!(coerce::<i16>("-32768").unwrap(), i16::MIN);
        assert_eq!(coerce::<i32>("-2147483648").unwrap(), i32::MIN);
        assert_eq!(coerce::<i64>("-9223372036854775808").unwrap(), i64::MIN);
        assert!(matches!(coerce::<i8>("128"), Err(ParseError::Int(_))));
        assert!(matches!(coerce::<i32>("2147483648"), Err(ParseError::Int(_))));
    }

    #[test]
    fn test_unsigned_width_limits() {
        assert_eq!(coerce::<u8>("255").unwrap(), u8::MAX);
        assert_eq!(coerce::<u16>("65535").unwrap(), u16::MAX);
        assert_eq!(coerce::<u32>("4294967295").unwrap(), u32::MAX);
        assert_eq!(coerce::<u64>("18446744073709551615").unwrap(), u64::MAX);
        assert!(coerce::<u8>("256").is_err());
        assert!(coerce::<u32>("-1").is_err());
    }

    #[test]
    fn test_floats() {
        assert_eq!(coerce::<f32>("3.5").unwrap(), 3.5f32);
        assert_eq!(coerce::<f64>("6.02214076").unwrap(), 6.02214076);
        assert!(matches!(coerce::<f64>("pi"), Err(ParseError::Float(_))));
    }

    #[test]
    fn test_float_out_of_range() {
        assert!(matches!(
            coerce::<f32>("1e40"),
            Err(ParseError::OutOfRange { type_name: "f32", .. })
        ));
        assert!(matches!(
            coerce::<f64>("-1e400"),
            Err(ParseError::OutOfRange { type_name: "f64", .. })
        ));
        // Fits an f64 but not an f32.
        assert_eq!(coerce::<f64>("1e40").unwrap(), 1e40);

        assert_eq!(coerce::<f32>("inf").unwrap(), f32::INFINITY);
        assert_eq!(coerce::<f64>("-Infinity").unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_duration() {
        assert_eq!(coerce::<Duration>("5s").unwrap(), Duration::from_secs(5));
        assert!(matches!(
            coerce::<Duration>("5 seconds"),
            Err(ParseError::Duration(_))
        ));
    }

    #[test]
    fn test_bytes_are_raw_utf8() {
        assert_eq!(coerce::<Vec<u8>>("héllo").unwrap(), "héllo".as_bytes());
    }

    #[test]
    fn test_string_list_keeps_whitespace() {
        assert_eq!(
            coerce::<Vec<String>>("a, b ,c").unwrap(),
            vec!["a", " b ", "c"]
        );
        assert_eq!(coerce::<Vec<String>>("solo").unwrap(), vec!["solo"]);
    }

    #[test]
    fn test_int_list_trims_and_fails_fast() {
        assert_eq!(coerce::<Vec<i64>>("1, 2 ,3").unwrap(), vec![1, 2, 3]);
        assert!(matches!(
            coerce::<Vec<i64>>("1,x,3"),
            Err(ParseError::Int(_))
        ));
    }

    #[test]
    fn test_unknown_type_has_no_coercer() {
        assert!(DefaultCoercers.lookup(&FieldType::of::<u128>(Kind::Other)).is_none());
    }

    #[test]
    fn test_exact_type_before_kind() {
        let table = CoercerTable::new()
            .with_kind(Kind::U32, |_| Ok(Value::Uint(1)))
            .with_type::<u32>(|_| Ok(Value::Uint(2)));

        let coercer = table.lookup(&u32::field_type()).unwrap();
        assert_eq!(coercer("ignored").unwrap(), Value::Uint(2));

        let coercer = table.lookup(&FieldType::of::<u8>(Kind::U32)).unwrap();
        assert_eq!(coercer("ignored").unwrap(), Value::Uint(1));
    }
}
