use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tracing::debug;
use uuid::Uuid;

use common::types::{ServiceTypeView, ServiceView, TariffView};

use crate::error::{ClientError, ErrorBody};

/// Thin wrapper over `reqwest` with one method per endpoint.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

/// Fields to change on a service; `None` leaves a field as is.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServiceChanges {
    pub type_id: Option<Uuid>,
    pub value: Option<f64>,
    pub unit: Option<String>,
}

impl ServiceChanges {
    fn to_body(&self) -> Value {
        let mut body = Map::new();
        if let Some(t) = self.type_id {
            body.insert("typeId".into(), json!(t));
        }
        if let Some(v) = self.value {
            body.insert("value".into(), json!(v));
        }
        if let Some(u) = &self.unit {
            body.insert("unit".into(), json!(u));
        }
        Value::Object(body)
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "api request");
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    async fn check(resp: Response) -> Result<Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.json::<ErrorBody>().await.unwrap_or_default();
        Err(ClientError::from_body(status.as_u16(), body))
    }

    async fn json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, ClientError> {
        let resp = Self::check(req.send().await?).await?;
        Ok(resp.json::<T>().await?)
    }

    async fn empty(req: RequestBuilder) -> Result<(), ClientError> {
        Self::check(req.send().await?).await?;
        Ok(())
    }

    pub async fn list_tariffs(&self) -> Result<Vec<TariffView>, ClientError> {
        Self::json(self.request(Method::GET, "/api/tariffs")).await
    }

    pub async fn get_tariff(&self, id: Uuid) -> Result<TariffView, ClientError> {
        Self::json(self.request(Method::GET, &format!("/api/tariffs/{id}"))).await
    }

    pub async fn create_tariff(&self, name: &str) -> Result<TariffView, ClientError> {
        Self::json(self.request(Method::POST, "/api/tariffs").json(&json!({ "name": name }))).await
    }

    pub async fn rename_tariff(&self, id: Uuid, name: &str) -> Result<TariffView, ClientError> {
        Self::json(self.request(Method::PUT, &format!("/api/tariffs/{id}")).json(&json!({ "name": name }))).await
    }

    pub async fn delete_tariff(&self, id: Uuid) -> Result<(), ClientError> {
        Self::empty(self.request(Method::DELETE, &format!("/api/tariffs/{id}"))).await
    }

    pub async fn list_service_types(&self) -> Result<Vec<ServiceTypeView>, ClientError> {
        Self::json(self.request(Method::GET, "/api/service-types")).await
    }

    pub async fn create_service_type(&self, name: &str) -> Result<ServiceTypeView, ClientError> {
        Self::json(self.request(Method::POST, "/api/service-types").json(&json!({ "name": name }))).await
    }

    pub async fn rename_service_type(&self, id: Uuid, name: &str) -> Result<ServiceTypeView, ClientError> {
        Self::json(self.request(Method::PUT, &format!("/api/service-types/{id}")).json(&json!({ "name": name }))).await
    }

    pub async fn delete_service_type(&self, id: Uuid) -> Result<(), ClientError> {
        Self::empty(self.request(Method::DELETE, &format!("/api/service-types/{id}"))).await
    }

    pub async fn add_service(&self, tariff_id: Uuid, type_id: Uuid, value: f64, unit: &str) -> Result<ServiceView, ClientError> {
        let body = json!({ "typeId": type_id, "value": value, "unit": unit });
        Self::json(self.request(Method::POST, &format!("/api/tariffs/{tariff_id}/services")).json(&body)).await
    }

    pub async fn update_service(&self, id: Uuid, changes: &ServiceChanges) -> Result<ServiceView, ClientError> {
        Self::json(self.request(Method::PUT, &format!("/api/services/{id}")).json(&changes.to_body())).await
    }

    pub async fn delete_service(&self, id: Uuid) -> Result<(), ClientError> {
        Self::empty(self.request(Method::DELETE, &format!("/api/services/{id}"))).await
    }

    pub async fn move_service(&self, id: Uuid, target_tariff_id: Uuid) -> Result<ServiceView, ClientError> {
        let body = json!({ "targetTariffId": target_tariff_id });
        Self::json(self.request(Method::POST, &format!("/api/services/{id}/move")).json(&body)).await
    }
}
