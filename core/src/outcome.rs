use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Result envelope handed to the orchestrating caller.
///
/// Serializes as `{"status":"success", ..payload fields}` or
/// `{"status":"error","error_message":"..."}`. The payload must serialize as a
/// struct or map so its fields can sit next to `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum Outcome<T> {
    #[serde(rename = "success")]
    Success(T),
    #[serde(rename = "error")]
    Failure { error_message: String },
}

impl<T> Outcome<T> {
    pub fn failure(message: impl Into<String>) -> Self {
        Outcome::Failure { error_message: message.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Outcome::Success(v) => Some(v),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure { error_message } => Some(error_message),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(v) => Outcome::Success(f(v)),
            Outcome::Failure { error_message } => Outcome::Failure { error_message },
        }
    }
}

impl<T, E: Display> From<Result<T, E>> for Outcome<T> {
    fn from(r: Result<T, E>) -> Self {
        match r {
            Ok(v) => Outcome::Success(v),
            Err(e) => Outcome::failure(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Rows {
        data: Vec<u32>,
    }

    #[test]
    fn success_flattens_payload_next_to_status() {
        let o = Outcome::Success(Rows { data: vec![1, 2] });
        assert_eq!(serde_json::to_value(&o).unwrap(), json!({"status": "success", "data": [1, 2]}));
    }

    #[test]
    fn failure_carries_error_message() {
        let o: Outcome<Rows> = Outcome::failure("unable to open database file");
        assert_eq!(
            serde_json::to_value(&o).unwrap(),
            json!({"status": "error", "error_message": "unable to open database file"})
        );
        assert_eq!(o.error_message(), Some("unable to open database file"));
        assert!(!o.is_success());
    }

    #[test]
    fn from_result_uses_display_text() {
        let r: Result<Rows, String> = Err("boom".into());
        let o: Outcome<Rows> = r.into();
        assert_eq!(o, Outcome::failure("boom"));
    }

    #[test]
    fn parses_back_from_json() {
        let o: Outcome<Rows> = serde_json::from_value(json!({"status": "success", "data": [7]})).unwrap();
        assert_eq!(o.success(), Some(&Rows { data: vec![7] }));
    }
}
