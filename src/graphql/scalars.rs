use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use std::fmt;
use uuid::Uuid;

/// `UUID` scalar. Input must be the 36-character hyphenated form; output is lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UuidScalar(pub Uuid);

impl UuidScalar {
    pub fn parse_str(text: &str) -> Option<Self> {
        // Uuid::try_parse also takes the simple, braced and urn forms; only the
        // hyphenated form is 36 characters long.
        if text.len() != 36 {
            return None;
        }
        Uuid::try_parse(text).ok().map(UuidScalar)
    }
}

#[Scalar(name = "UUID")]
impl ScalarType for UuidScalar {
    fn parse(value: Value) -> InputValueResult<Self> {
        match &value {
            Value::String(text) => UuidScalar::parse_str(text).ok_or_else(|| {
                InputValueError::custom(format!("\"{text}\" is not a valid UUID"))
            }),
            _ => Err(InputValueError::expected_type(value)),
        }
    }

    fn is_valid(value: &Value) -> bool {
        matches!(value, Value::String(text) if UuidScalar::parse_str(text).is_some())
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.to_string())
    }
}

impl From<Uuid> for UuidScalar {
    fn from(id: Uuid) -> Self {
        UuidScalar(id)
    }
}

impl From<UuidScalar> for Uuid {
    fn from(id: UuidScalar) -> Self {
        id.0
    }
}

impl fmt::Display for UuidScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
