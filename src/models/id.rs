use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opaque identifier used by the upstream services for users and companies.
///
/// Upstream payloads may carry ids as JSON strings or numbers. The JSON kind
/// is part of the identity: `1` and `"1"` render the same but are different
/// ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id {
    kind: IdKind,
    text: String,
}

/// JSON kind an [`Id`] was received as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    Text,
    Number,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

/// Integral floats print without a fraction, so `1.0` and `1` are one id.
fn float_text(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(value) => Self::from_string(value),
            RawId::Unsigned(value) => Self::number(value),
            RawId::Signed(value) => Self::number(value),
            RawId::Float(value) => Self::number(float_text(value)),
        })
    }
}

impl Serialize for Id {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.kind {
            IdKind::Text => serializer.serialize_str(&self.text),
            IdKind::Number => {
                if let Ok(value) = self.text.parse::<u64>() {
                    serializer.serialize_u64(value)
                } else if let Ok(value) = self.text.parse::<i64>() {
                    serializer.serialize_i64(value)
                } else if let Ok(value) = self.text.parse::<f64>() {
                    serializer.serialize_f64(value)
                } else {
                    serializer.serialize_str(&self.text)
                }
            }
        }
    }
}

impl Id {
    /// A string id.
    pub fn from_string(value: impl Into<String>) -> Self {
        Self {
            kind: IdKind::Text,
            text: value.into(),
        }
    }

    /// A numeric id, kept in its printed form.
    pub fn number(value: impl fmt::Display) -> Self {
        Self {
            kind: IdKind::Number,
            text: value.to_string(),
        }
    }

    pub fn kind(&self) -> IdKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.text.fmt(f)
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self::from_string(value)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::from_string(value)
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
