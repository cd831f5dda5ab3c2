use crate::is_prime_magnitude;

/// A pool value ready to be stored, before the sink assigns it an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewNumber {
    pub value: i32,
    pub is_prime: bool,
}

impl NewNumber {
    /// Builds a record from a pool value, flagging whether its magnitude is
    /// prime.
    pub const fn from_value(value: i32) -> Self {
        Self {
            value,
            is_prime: is_prime_magnitude(value),
        }
    }

    /// Attaches a sink-assigned id.
    pub const fn with_id(self, id: u64) -> PersistedNumber {
        PersistedNumber {
            id,
            value: self.value,
            is_prime: self.is_prime,
        }
    }
}

/// A stored pool value as the sink sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct PersistedNumber {
    pub id: u64,
    pub value: i32,
    pub is_prime: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_prime_magnitudes() {
        assert!(NewNumber::from_value(-7).is_prime);
        assert!(NewNumber::from_value(11).is_prime);
        assert!(!NewNumber::from_value(12).is_prime);
        assert!(!NewNumber::from_value(-1).is_prime);
    }

    #[test]
    fn keeps_fields_when_assigned_an_id() {
        let stored = NewNumber::from_value(-3).with_id(42);
        assert_eq!(
            stored,
            PersistedNumber {
                id: 42,
                value: -3,
                is_prime: true,
            }
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_in_camel_case() {
        let json = serde_json::to_string(&NewNumber::from_value(5).with_id(1)).unwrap();
        assert_eq!(json, r#"{"id":1,"value":5,"isPrime":true}"#);
    }
}
