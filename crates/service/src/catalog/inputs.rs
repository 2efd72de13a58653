//! Request bodies and the typed commands they validate into.

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use models::{service, service_type, tariff};

use crate::errors::ServiceError;
use crate::validation::Checker;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct TariffInput {
    #[serde(default)]
    pub name: Option<Value>,
}

impl TariffInput {
    pub fn named(name: &str) -> Self { Self { name: Some(Value::from(name)) } }

    /// Validated, trimmed tariff name.
    pub fn validate(&self) -> Result<String, ServiceError> {
        let mut c = Checker::new();
        let name = c.text("name", self.name.as_ref(), tariff::validate_name);
        c.finish(name.unwrap_or_default())
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServiceTypeInput {
    #[serde(default)]
    pub name: Option<Value>,
}

impl ServiceTypeInput {
    pub fn named(name: &str) -> Self { Self { name: Some(Value::from(name)) } }

    pub fn validate(&self) -> Result<String, ServiceError> {
        let mut c = Checker::new();
        let name = c.text("name", self.name.as_ref(), service_type::validate_name);
        c.finish(name.unwrap_or_default())
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInput {
    #[serde(default)]
    pub type_id: Option<Value>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub unit: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub type_id: Uuid,
    pub value: f64,
    pub unit: String,
}

impl ServiceInput {
    pub fn new(type_id: Uuid, value: f64, unit: &str) -> Self {
        Self {
            type_id: Some(Value::from(type_id.to_string())),
            value: Some(Value::from(value)),
            unit: Some(Value::from(unit)),
        }
    }

    pub fn validate(&self) -> Result<NewService, ServiceError> {
        let mut c = Checker::new();
        let type_id = c.id("typeId", self.type_id.as_ref());
        let value = c.number("value", self.value.as_ref(), service::validate_value);
        let unit = c.text("unit", self.unit.as_ref(), service::validate_unit);
        match (type_id, value, unit) {
            (Some(type_id), Some(value), Some(unit)) => c.finish(NewService { type_id, value, unit }),
            _ => c.finish(NewService { type_id: Uuid::nil(), value: 0.0, unit: String::new() }),
        }
    }
}

/// Partial update; `null` counts as absent.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePatchInput {
    #[serde(default)]
    pub type_id: Option<Value>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub unit: Option<Value>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ServicePatch {
    pub type_id: Option<Uuid>,
    pub value: Option<f64>,
    pub unit: Option<String>,
}

impl ServicePatch {
    pub fn is_empty(&self) -> bool {
        self.type_id.is_none() && self.value.is_none() && self.unit.is_none()
    }
}

impl ServicePatchInput {
    pub fn validate(&self) -> Result<ServicePatch, ServiceError> {
        let mut c = Checker::new();
        let patch = ServicePatch {
            type_id: c.optional_id("typeId", self.type_id.as_ref()),
            value: c.optional_number("value", self.value.as_ref(), service::validate_value),
            unit: c.optional_text("unit", self.unit.as_ref(), service::validate_unit),
        };
        let patch = c.finish(patch)?;
        if patch.is_empty() {
            return Err(ServiceError::BadRequest("No fields to update".into()));
        }
        Ok(patch)
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveInput {
    #[serde(default)]
    pub target_tariff_id: Option<Value>,
}

impl MoveInput {
    pub fn to(target: Uuid) -> Self {
        Self { target_tariff_id: Some(Value::from(target.to_string())) }
    }

    /// Target tariff id. A well-formed string that is not a UUID names no
    /// tariff and is reported as a missing target.
    pub fn validate(&self) -> Result<Uuid, ServiceError> {
        let mut c = Checker::new();
        let raw = c.text("targetTariffId", self.target_tariff_id.as_ref(), |s| {
            models::validate::required_text(s, usize::MAX)
        });
        let raw = c.finish(raw.unwrap_or_default())?;
        Uuid::parse_str(&raw).map_err(|_| ServiceError::not_found("Target tariff"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse<T: serde::de::DeserializeOwned>(v: Value) -> T {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn tariff_name_is_trimmed() {
        let input: TariffInput = parse(json!({"name": "  Basic  "}));
        assert_eq!(input.validate().unwrap(), "Basic");
    }

    #[test]
    fn tariff_name_over_limit_is_rejected() {
        let input = TariffInput::named(&"x".repeat(201));
        assert!(matches!(input.validate(), Err(ServiceError::Validation(_))));
        assert!(TariffInput::named(&"x".repeat(200)).validate().is_ok());
    }

    #[test]
    fn service_input_reports_all_bad_fields() {
        let input: ServiceInput = parse(json!({"value": "ten", "unit": ""}));
        let Err(ServiceError::Validation(fe)) = input.validate() else { panic!("expected validation") };
        assert_eq!(fe.field_errors.len(), 3);
        assert!(fe.field_errors.contains_key("typeId"));
    }

    #[test]
    fn service_input_coerces_value() {
        let id = Uuid::new_v4();
        let input: ServiceInput = parse(json!({"typeId": id.to_string(), "value": "10", "unit": "GB"}));
        assert_eq!(input.validate().unwrap(), NewService { type_id: id, value: 10.0, unit: "GB".into() });
    }

    #[test]
    fn unit_limit_is_fifty_chars() {
        let id = Uuid::new_v4();
        assert!(ServiceInput::new(id, 1.0, &"u".repeat(50)).validate().is_ok());
        assert!(ServiceInput::new(id, 1.0, &"u".repeat(51)).validate().is_err());
    }

    #[test]
    fn empty_patch_is_bad_request() {
        let input: ServicePatchInput = parse(json!({}));
        assert!(matches!(input.validate(), Err(ServiceError::BadRequest(m)) if m == "No fields to update"));
        let nulls: ServicePatchInput = parse(json!({"value": null, "unit": null}));
        assert!(matches!(nulls.validate(), Err(ServiceError::BadRequest(_))));
    }

    #[test]
    fn patch_keeps_supplied_fields_only() {
        let input: ServicePatchInput = parse(json!({"unit": "MB"}));
        let patch = input.validate().unwrap();
        assert_eq!(patch, ServicePatch { type_id: None, value: None, unit: Some("MB".into()) });
    }

    #[test]
    fn move_requires_target() {
        let input: MoveInput = parse(json!({}));
        assert!(matches!(input.validate(), Err(ServiceError::Validation(_))));
        let bogus: MoveInput = parse(json!({"targetTariffId": "nope"}));
        assert!(matches!(bogus.validate(), Err(ServiceError::NotFound(m)) if m == "Target tariff not found"));
    }
}
