use serde::{Deserialize, Serialize};

/// Result of an analysis that can fall back to a placeholder when the input
/// history is too short.
///
/// `Default` carries the fixed "insufficient data" value so callers always have
/// something to render, while still being able to tell it apart from a real result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Outcome<T> {
    Default(T),
    Computed(T),
}

impl<T> Outcome<T> {
    pub fn value(&self) -> &T {
        match self {
            Outcome::Default(v) | Outcome::Computed(v) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Default(v) | Outcome::Computed(v) => v,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Outcome::Default(_))
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Outcome::Computed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(Outcome::Default(3)).unwrap();
        assert_eq!(json["status"], "default");
        assert_eq!(json["value"], 3);

        let json = serde_json::to_value(Outcome::Computed("x")).unwrap();
        assert_eq!(json["status"], "computed");
    }

    #[test]
    fn outcome_accessors() {
        let outcome = Outcome::Computed(5);
        assert!(outcome.is_computed());
        assert!(!outcome.is_default());
        assert_eq!(*outcome.value(), 5);
        assert_eq!(outcome.into_value(), 5);
    }
}
