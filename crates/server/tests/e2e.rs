mod support;

use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use support::{start_server, TestApp, INDEX_HTML};

struct Api {
    app: TestApp,
    http: reqwest::Client,
}

impl Api {
    async fn start() -> anyhow::Result<Self> {
        Ok(Self { app: start_server().await?, http: reqwest::Client::new() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.app.base_url, path)
    }

    async fn get(&self, path: &str) -> anyhow::Result<(StatusCode, Value)> {
        let res = self.http.get(self.url(path)).send().await?;
        Self::split(res).await
    }

    async fn send(&self, method: reqwest::Method, path: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
        let res = self.http.request(method, self.url(path)).json(&body).send().await?;
        Self::split(res).await
    }

    async fn post(&self, path: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
        self.send(reqwest::Method::POST, path, body).await
    }

    async fn put(&self, path: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
        self.send(reqwest::Method::PUT, path, body).await
    }

    async fn delete(&self, path: &str) -> anyhow::Result<StatusCode> {
        Ok(self.http.delete(self.url(path)).send().await?.status())
    }

    async fn split(res: reqwest::Response) -> anyhow::Result<(StatusCode, Value)> {
        let status = res.status();
        let text = res.text().await?;
        let body = if text.is_empty() { Value::Null } else { serde_json::from_str(&text)? };
        Ok((status, body))
    }

    async fn tariff(&self, name: &str) -> anyhow::Result<String> {
        let (s, body) = self.post("/api/tariffs", json!({ "name": name })).await?;
        assert_eq!(s, StatusCode::CREATED);
        Ok(body["id"].as_str().unwrap().to_string())
    }

    async fn service_type(&self, name: &str) -> anyhow::Result<String> {
        let (s, body) = self.post("/api/service-types", json!({ "name": name })).await?;
        assert_eq!(s, StatusCode::CREATED);
        Ok(body["id"].as_str().unwrap().to_string())
    }

    async fn service(&self, tariff: &str, type_id: &str, value: f64, unit: &str) -> anyhow::Result<(StatusCode, Value)> {
        self.post(
            &format!("/api/tariffs/{tariff}/services"),
            json!({ "typeId": type_id, "value": value, "unit": unit }),
        )
        .await
    }
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let api = Api::start().await?;
    let (s, body) = api.get("/health").await?;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
    Ok(())
}

#[tokio::test]
async fn e2e_tariff_round_trip() -> anyhow::Result<()> {
    let api = Api::start().await?;
    let internet = api.service_type("Internet").await?;
    let basic = api.tariff("Basic").await?;

    let (s, svc) = api.service(&basic, &internet, 10.0, "GB").await?;
    assert_eq!(s, StatusCode::CREATED);
    assert_eq!(svc["tariffId"], basic.as_str());
    assert_eq!(svc["type"]["name"], "Internet");

    let (s, tariff) = api.get(&format!("/api/tariffs/{basic}")).await?;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(tariff["name"], "Basic");
    let services = tariff["services"].as_array().unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0]["value"], 10.0);
    assert_eq!(services[0]["unit"], "GB");
    assert_eq!(services[0]["type"]["name"], "Internet");

    let (s, list) = api.get("/api/tariffs").await?;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn e2e_duplicate_type_in_tariff_conflicts() -> anyhow::Result<()> {
    let api = Api::start().await?;
    let internet = api.service_type("Internet").await?;
    api.service_type("Voice").await?;
    let a = api.tariff("A").await?;

    let (s, _) = api.service(&a, &internet, 10.0, "GB").await?;
    assert_eq!(s, StatusCode::CREATED);
    let (s, body) = api.service(&a, &internet, 20.0, "GB").await?;
    assert_eq!(s, StatusCode::CONFLICT);
    assert_eq!(body["message"], "This service type already exists in the tariff");

    let (_, tariff) = api.get(&format!("/api/tariffs/{a}")).await?;
    assert_eq!(tariff["services"].as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn e2e_move_between_tariffs() -> anyhow::Result<()> {
    let api = Api::start().await?;
    let voice = api.service_type("Voice").await?;
    let a = api.tariff("A").await?;
    let b = api.tariff("B").await?;
    let (_, svc) = api.service(&a, &voice, 100.0, "min").await?;
    let id = svc["id"].as_str().unwrap();

    let (s, moved) = api.post(&format!("/api/services/{id}/move"), json!({ "targetTariffId": b })).await?;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(moved["tariffId"], b.as_str());

    let (_, ta) = api.get(&format!("/api/tariffs/{a}")).await?;
    let (_, tb) = api.get(&format!("/api/tariffs/{b}")).await?;
    assert!(ta["services"].as_array().unwrap().is_empty());
    assert_eq!(tb["services"][0]["id"], id);
    Ok(())
}

#[tokio::test]
async fn e2e_move_conflict_leaves_service_in_place() -> anyhow::Result<()> {
    let api = Api::start().await?;
    let voice = api.service_type("Voice").await?;
    let a = api.tariff("A").await?;
    let b = api.tariff("B").await?;
    let (_, x) = api.service(&a, &voice, 100.0, "min").await?;
    api.service(&b, &voice, 50.0, "min").await?;
    let id = x["id"].as_str().unwrap();

    let (s, body) = api.post(&format!("/api/services/{id}/move"), json!({ "targetTariffId": b })).await?;
    assert_eq!(s, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Cannot move: target tariff already has this service type");

    let (_, ta) = api.get(&format!("/api/tariffs/{a}")).await?;
    assert_eq!(ta["services"][0]["id"], id);

    let (s, body) = api
        .post(&format!("/api/services/{id}/move"), json!({ "targetTariffId": Uuid::new_v4() }))
        .await?;
    assert_eq!(s, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Target tariff not found");
    Ok(())
}

#[tokio::test]
async fn e2e_type_in_use_cannot_be_deleted() -> anyhow::Result<()> {
    let api = Api::start().await?;
    let internet = api.service_type("Internet").await?;
    let a = api.tariff("A").await?;
    api.service(&a, &internet, 1.0, "GB").await?;

    let res = api.http.delete(api.url(&format!("/api/service-types/{internet}"))).send().await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Cannot delete type: it is used by services");

    let (_, types) = api.get("/api/service-types").await?;
    assert_eq!(types.as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn e2e_duplicate_type_name_conflicts() -> anyhow::Result<()> {
    let api = Api::start().await?;
    api.service_type("Internet").await?;
    let (s, body) = api.post("/api/service-types", json!({ "name": "Internet" })).await?;
    assert_eq!(s, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Service type already exists");

    let (s, _) = api.post("/api/service-types", json!({ "name": "internet" })).await?;
    assert_eq!(s, StatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn e2e_delete_tariff_cascades() -> anyhow::Result<()> {
    let api = Api::start().await?;
    let internet = api.service_type("Internet").await?;
    let a = api.tariff("A").await?;
    let (_, svc) = api.service(&a, &internet, 1.0, "GB").await?;
    let svc_id = svc["id"].as_str().unwrap();

    assert_eq!(api.delete(&format!("/api/tariffs/{a}")).await?, StatusCode::NO_CONTENT);
    assert_eq!(api.delete(&format!("/api/services/{svc_id}")).await?, StatusCode::NOT_FOUND);
    assert_eq!(api.delete(&format!("/api/service-types/{internet}")).await?, StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn e2e_validation_errors() -> anyhow::Result<()> {
    let api = Api::start().await?;

    let (s, body) = api.post("/api/tariffs", json!({ "name": "   " })).await?;
    assert_eq!(s, StatusCode::BAD_REQUEST);
    assert!(body["fieldErrors"]["name"].is_array());
    assert!(body["formErrors"].is_array());

    let a = api.tariff("A").await?;
    let (s, body) = api.post(&format!("/api/tariffs/{a}/services"), json!({ "value": "lots" })).await?;
    assert_eq!(s, StatusCode::BAD_REQUEST);
    for field in ["typeId", "value", "unit"] {
        assert!(body["fieldErrors"][field].is_array(), "missing {field}");
    }

    let res = api
        .http
        .post(api.url("/api/tariffs"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["formErrors"].as_array().map(|a| a.len()), Some(1));
    Ok(())
}

#[tokio::test]
async fn e2e_service_update_rules() -> anyhow::Result<()> {
    let api = Api::start().await?;
    let internet = api.service_type("Internet").await?;
    let voice = api.service_type("Voice").await?;
    let a = api.tariff("A").await?;
    let (_, net) = api.service(&a, &internet, 10.0, "GB").await?;
    api.service(&a, &voice, 100.0, "min").await?;
    let id = net["id"].as_str().unwrap();

    let (s, body) = api.put(&format!("/api/services/{id}"), json!({})).await?;
    assert_eq!(s, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No fields to update");

    let (s, _) = api.put(&format!("/api/services/{id}"), json!({ "typeId": voice })).await?;
    assert_eq!(s, StatusCode::CONFLICT);

    let (s, updated) = api.put(&format!("/api/services/{id}"), json!({ "value": 25, "unit": "TB" })).await?;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(updated["value"], 25.0);
    assert_eq!(updated["unit"], "TB");
    assert_eq!(updated["type"]["name"], "Internet");
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_ids_are_404() -> anyhow::Result<()> {
    let api = Api::start().await?;
    let missing = Uuid::new_v4();

    let (s, body) = api.get(&format!("/api/tariffs/{missing}")).await?;
    assert_eq!(s, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Tariff not found");

    let (s, _) = api.get("/api/tariffs/not-a-uuid").await?;
    assert_eq!(s, StatusCode::NOT_FOUND);

    let (s, _) = api.put(&format!("/api/tariffs/{missing}"), json!({ "name": "X" })).await?;
    assert_eq!(s, StatusCode::NOT_FOUND);

    let (s, _) = api.put(&format!("/api/service-types/{missing}"), json!({ "name": "X" })).await?;
    assert_eq!(s, StatusCode::NOT_FOUND);

    let internet = api.service_type("Internet").await?;
    let (s, body) = api.service(&missing.to_string(), &internet, 1.0, "GB").await?;
    assert_eq!(s, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Tariff not found");
    Ok(())
}

#[tokio::test]
async fn e2e_spa_fallback_and_docs() -> anyhow::Result<()> {
    let api = Api::start().await?;

    let res = api.http.get(api.url("/some/client/route")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, INDEX_HTML);

    let (s, doc) = api.get("/api-docs/openapi.json").await?;
    assert_eq!(s, StatusCode::OK);
    assert!(doc["paths"]["/api/services/{id}/move"].is_object());
    Ok(())
}

#[tokio::test]
async fn e2e_unmatched_api_paths_are_json_404() -> anyhow::Result<()> {
    let api = Api::start().await?;

    let (s, body) = api.post("/api/nope", json!({})).await?;
    assert_eq!(s, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not found");

    let (s, body) = api.get("/api/nope").await?;
    assert_eq!(s, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not found");

    let res = api.http.delete(api.url("/some/client/route")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
