//! Schema checks for raw JSON request bodies.
//!
//! Bodies are deserialized loosely (`Option<Value>` per field) so that type
//! mismatches are reported per field instead of failing the whole parse.
//! All fields are checked before returning; the collected errors serialize as
//! `{ "formErrors": [...], "fieldErrors": { field: [...] } }`.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use models::errors::ModelError;

use crate::errors::ServiceError;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    pub form_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn add_field(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn add_form(&mut self, message: impl Into<String>) {
        self.form_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn finish<T>(self, value: T) -> Result<T, ServiceError> {
        if self.is_empty() { Ok(value) } else { Err(ServiceError::Validation(self)) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.form_errors.clone();
        for (field, messages) in &self.field_errors {
            parts.push(format!("{field}: {}", messages.join(", ")));
        }
        f.write_str(&parts.join("; "))
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Field-by-field reader accumulating errors.
#[derive(Debug, Default)]
pub struct Checker {
    errors: FieldErrors,
}

impl Checker {
    pub fn new() -> Self { Self::default() }

    fn model_error(&mut self, field: &str, e: ModelError) {
        match e {
            ModelError::Validation(msg) => self.errors.add_field(field, msg),
            ModelError::Db(msg) => self.errors.add_form(msg),
        }
    }

    /// Required string passed through a model validator.
    pub fn text(
        &mut self,
        field: &str,
        raw: Option<&Value>,
        rule: fn(&str) -> Result<String, ModelError>,
    ) -> Option<String> {
        match raw {
            None => {
                self.errors.add_field(field, "Required");
                None
            }
            Some(v) => self.optional_text(field, Some(v), rule),
        }
    }

    pub fn optional_text(
        &mut self,
        field: &str,
        raw: Option<&Value>,
        rule: fn(&str) -> Result<String, ModelError>,
    ) -> Option<String> {
        match raw? {
            Value::String(s) => match rule(s) {
                Ok(v) => Some(v),
                Err(e) => {
                    self.model_error(field, e);
                    None
                }
            },
            other => {
                self.errors.add_field(field, format!("Expected string, received {}", kind_of(other)));
                None
            }
        }
    }

    /// Required number; numeric strings are coerced.
    pub fn number(
        &mut self,
        field: &str,
        raw: Option<&Value>,
        rule: fn(f64) -> Result<f64, ModelError>,
    ) -> Option<f64> {
        match raw {
            None => {
                self.errors.add_field(field, "Required");
                None
            }
            Some(v) => self.optional_number(field, Some(v), rule),
        }
    }

    pub fn optional_number(
        &mut self,
        field: &str,
        raw: Option<&Value>,
        rule: fn(f64) -> Result<f64, ModelError>,
    ) -> Option<f64> {
        let parsed = match raw? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        let Some(n) = parsed else {
            self.errors.add_field(field, "Expected number");
            return None;
        };
        match rule(n) {
            Ok(v) => Some(v),
            Err(e) => {
                self.model_error(field, e);
                None
            }
        }
    }

    /// Required identifier given as a string.
    pub fn id(&mut self, field: &str, raw: Option<&Value>) -> Option<Uuid> {
        match raw {
            None => {
                self.errors.add_field(field, "Required");
                None
            }
            Some(v) => self.optional_id(field, Some(v)),
        }
    }

    pub fn optional_id(&mut self, field: &str, raw: Option<&Value>) -> Option<Uuid> {
        match raw? {
            Value::String(s) if s.trim().is_empty() => {
                self.errors.add_field(field, "must not be empty");
                None
            }
            Value::String(s) => match Uuid::parse_str(s.trim()) {
                Ok(id) => Some(id),
                Err(_) => {
                    self.errors.add_field(field, "Invalid id");
                    None
                }
            },
            other => {
                self.errors.add_field(field, format!("Expected string, received {}", kind_of(other)));
                None
            }
        }
    }

    pub fn finish<T>(self, value: T) -> Result<T, ServiceError> {
        self.errors.finish(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn name_rule(s: &str) -> Result<String, ModelError> {
        models::validate::required_text(s, 5)
    }

    #[test]
    fn collects_every_field() {
        let mut c = Checker::new();
        let a = c.text("name", None, name_rule);
        let b = c.number("value", Some(&json!("abc")), models::validate::finite_number);
        assert!(a.is_none() && b.is_none());
        let err = c.finish(()).unwrap_err();
        let ServiceError::Validation(fe) = err else { panic!("expected validation") };
        assert_eq!(fe.field_errors["name"], vec!["Required".to_string()]);
        assert_eq!(fe.field_errors["value"], vec!["Expected number".to_string()]);
    }

    #[test]
    fn coerces_numeric_strings() {
        let mut c = Checker::new();
        assert_eq!(c.number("value", Some(&json!(" 12.5 ")), models::validate::finite_number), Some(12.5));
        assert_eq!(c.number("value", Some(&json!(3)), models::validate::finite_number), Some(3.0));
        assert!(c.finish(()).is_ok());
    }

    #[test]
    fn rejects_empty_and_non_finite_strings() {
        let mut c = Checker::new();
        assert!(c.number("value", Some(&json!("")), models::validate::finite_number).is_none());
        assert!(c.number("other", Some(&json!("inf")), models::validate::finite_number).is_none());
        let ServiceError::Validation(fe) = c.finish(()).unwrap_err() else { panic!() };
        assert_eq!(fe.field_errors.len(), 2);
    }

    #[test]
    fn reports_type_mismatch() {
        let mut c = Checker::new();
        assert!(c.text("name", Some(&json!(42)), name_rule).is_none());
        let ServiceError::Validation(fe) = c.finish(()).unwrap_err() else { panic!() };
        assert_eq!(fe.field_errors["name"], vec!["Expected string, received number".to_string()]);
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let mut c = Checker::new();
        assert_eq!(c.optional_text("unit", None, name_rule), None);
        assert_eq!(c.optional_id("typeId", None), None);
        assert!(c.finish(()).is_ok());
    }

    #[test]
    fn ids_must_parse() {
        let mut c = Checker::new();
        let id = Uuid::new_v4();
        assert_eq!(c.id("typeId", Some(&json!(id.to_string()))), Some(id));
        assert!(c.id("other", Some(&json!("nope"))).is_none());
        assert!(c.finish(()).is_err());
    }

    #[test]
    fn serializes_like_a_flattened_schema_error() {
        let mut fe = FieldErrors::default();
        fe.add_field("name", "Required");
        let v = serde_json::to_value(&fe).unwrap();
        assert_eq!(v, json!({"formErrors": [], "fieldErrors": {"name": ["Required"]}}));
    }
}
