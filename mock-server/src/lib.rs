//! In-memory stand-in for the licensing backend.
//!
//! Serves `/{resource}` and `/{resource}/{id}` for the console's collections.
//! Each collection answers in one of the three styles the real backend mixes:
//! canonical `succeeded` envelopes, legacy `isSuccess` envelopes, or bare
//! bodies.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

/// How a collection wraps its responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStyle {
    /// `{"succeeded": bool, "message": ..., "data": ...}`
    Canonical,
    /// `{"isSuccess": bool, "message": ..., "data": ...}`
    Legacy,
    /// Bare payloads; failures as `{"title": ..., "detail": ...}`.
    Bare,
}

struct Collection {
    style: ResponseStyle,
    required: &'static [&'static str],
    singular: &'static str,
}

fn collection(resource: &str) -> Option<Collection> {
    let (style, required, singular): (ResponseStyle, &'static [&'static str], &'static str) = match resource {
        "apps" => (ResponseStyle::Canonical, &["appName"], "Uygulama"),
        "users" => (ResponseStyle::Canonical, &["userName"], "Kullanıcı"),
        "licenses" => (ResponseStyle::Canonical, &["licenseKey", "programId"], "Lisans"),
        "dealers" => (ResponseStyle::Legacy, &["name"], "Bayi"),
        "authorizations" => (ResponseStyle::Legacy, &["userId"], "Yetki"),
        "programs" => (ResponseStyle::Bare, &["programName"], "Program"),
        _ => return None,
    };
    Some(Collection {
        style,
        required,
        singular,
    })
}

pub type Entity = Map<String, Value>;

/// Records per collection, in insertion order.
pub type Db = Arc<RwLock<HashMap<String, Vec<Entity>>>>;

pub fn app() -> Router {
    app_with_state(Db::default())
}

/// Router over an existing store, for tests that seed data.
pub fn app_with_state(db: Db) -> Router {
    Router::new()
        .route("/{resource}", get(list_entities).post(create_entity))
        .route(
            "/{resource}/{id}",
            get(get_entity).put(update_entity).delete(delete_entity),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock backend listening");
    }
    axum::serve(listener, app()).await
}

fn success(style: ResponseStyle, status: StatusCode, message: Option<&str>, data: Value) -> Response {
    let body = match style {
        ResponseStyle::Bare => {
            if data.is_null() {
                return StatusCode::NO_CONTENT.into_response();
            }
            data
        }
        ResponseStyle::Canonical => json!({"succeeded": true, "message": message, "data": data}),
        ResponseStyle::Legacy => json!({"isSuccess": true, "message": message, "data": data}),
    };
    (status, Json(body)).into_response()
}

fn failure(style: ResponseStyle, status: StatusCode, message: &str, errors: Option<Value>) -> Response {
    let body = match style {
        ResponseStyle::Canonical => json!({"succeeded": false, "message": message, "errors": errors}),
        ResponseStyle::Legacy => json!({"isSuccess": false, "message": message, "errors": errors}),
        ResponseStyle::Bare => json!({
            "title": status.canonical_reason().unwrap_or("Error"),
            "detail": message,
            "errors": errors,
        }),
    };
    (status, Json(body)).into_response()
}

fn unknown_resource(resource: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"title": "Not Found", "detail": format!("unknown resource '{resource}'")})),
    )
        .into_response()
}

fn not_found(c: &Collection) -> Response {
    failure(c.style, StatusCode::NOT_FOUND, &format!("{} bulunamadı", c.singular), None)
}

/// Checks required string fields, returning field errors keyed by name.
fn validate(c: &Collection, input: &Value) -> Result<Entity, Response> {
    let Some(fields) = input.as_object() else {
        return Err(failure(
            c.style,
            StatusCode::BAD_REQUEST,
            "Geçersiz istek gövdesi",
            Some(json!(["İstek gövdesi bir JSON nesnesi olmalıdır"])),
        ));
    };
    let mut errors = Map::new();
    for field in c.required {
        let present = fields
            .get(*field)
            .and_then(Value::as_str)
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false);
        if !present {
            errors.insert(field.to_string(), json!([format!("{field} alanı zorunludur")]));
        }
    }
    if !errors.is_empty() {
        return Err(failure(
            c.style,
            StatusCode::BAD_REQUEST,
            "Doğrulama hatası",
            Some(Value::Object(errors)),
        ));
    }
    Ok(fields.clone())
}

async fn list_entities(State(db): State<Db>, Path(resource): Path<String>) -> Response {
    let Some(c) = collection(&resource) else {
        return unknown_resource(&resource);
    };
    let items = db.read().await.get(&resource).cloned().unwrap_or_default();
    debug!(%resource, count = items.len(), "list");
    let items = items.into_iter().map(Value::Object).collect();
    success(c.style, StatusCode::OK, None, Value::Array(items))
}

async fn create_entity(
    State(db): State<Db>,
    Path(resource): Path<String>,
    Json(input): Json<Value>,
) -> Response {
    let Some(c) = collection(&resource) else {
        return unknown_resource(&resource);
    };
    let mut entity = match validate(&c, &input) {
        Ok(entity) => entity,
        Err(response) => return response,
    };
    entity.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
    db.write()
        .await
        .entry(resource.clone())
        .or_default()
        .push(entity.clone());
    debug!(%resource, "created");
    success(
        c.style,
        StatusCode::CREATED,
        Some(&format!("{} oluşturuldu", c.singular)),
        Value::Object(entity),
    )
}

async fn get_entity(State(db): State<Db>, Path((resource, id)): Path<(String, String)>) -> Response {
    let Some(c) = collection(&resource) else {
        return unknown_resource(&resource);
    };
    let db = db.read().await;
    let found = db
        .get(&resource)
        .and_then(|items| items.iter().find(|item| item.get("id").and_then(Value::as_str) == Some(id.as_str())));
    match found {
        Some(entity) => success(c.style, StatusCode::OK, None, Value::Object(entity.clone())),
        None => not_found(&c),
    }
}

async fn update_entity(
    State(db): State<Db>,
    Path((resource, id)): Path<(String, String)>,
    Json(input): Json<Value>,
) -> Response {
    let Some(c) = collection(&resource) else {
        return unknown_resource(&resource);
    };
    let fields = match validate(&c, &input) {
        Ok(fields) => fields,
        Err(response) => return response,
    };
    let mut db = db.write().await;
    let Some(entity) = db
        .get_mut(&resource)
        .and_then(|items| items.iter_mut().find(|item| item.get("id").and_then(Value::as_str) == Some(id.as_str())))
    else {
        return not_found(&c);
    };
    for (key, value) in fields {
        if key != "id" {
            entity.insert(key, value);
        }
    }
    debug!(%resource, %id, "updated");
    success(
        c.style,
        StatusCode::OK,
        Some(&format!("{} güncellendi", c.singular)),
        Value::Object(entity.clone()),
    )
}

async fn delete_entity(State(db): State<Db>, Path((resource, id)): Path<(String, String)>) -> Response {
    let Some(c) = collection(&resource) else {
        return unknown_resource(&resource);
    };
    let mut db = db.write().await;
    let Some(items) = db.get_mut(&resource) else {
        return not_found(&c);
    };
    let before = items.len();
    items.retain(|item| item.get("id").and_then(Value::as_str) != Some(id.as_str()));
    if items.len() == before {
        return not_found(&c);
    }
    debug!(%resource, %id, "deleted");
    success(c.style, StatusCode::OK, Some(&format!("{} silindi", c.singular)), Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_console_resource_is_served() {
        for resource in ["apps", "users", "licenses", "dealers", "authorizations", "programs"] {
            assert!(collection(resource).is_some(), "{resource}");
        }
        assert!(collection("invoices").is_none());
    }

    #[test]
    fn styles_cover_all_conventions() {
        assert_eq!(collection("apps").unwrap().style, ResponseStyle::Canonical);
        assert_eq!(collection("dealers").unwrap().style, ResponseStyle::Legacy);
        assert_eq!(collection("programs").unwrap().style, ResponseStyle::Bare);
    }

    #[test]
    fn validate_reports_each_missing_field() {
        let c = collection("licenses").unwrap();
        let err = validate(&c, &json!({"licenseKey": " "})).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let ok = validate(&c, &json!({"licenseKey": "K", "programId": "p"})).unwrap();
        assert_eq!(ok.len(), 2);
    }

    #[test]
    fn validate_rejects_non_objects() {
        let c = collection("apps").unwrap();
        assert!(validate(&c, &json!([1])).is_err());
    }

    #[test]
    fn bare_success_without_data_is_no_content() {
        let response = success(ResponseStyle::Bare, StatusCode::OK, Some("silindi"), Value::Null);
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
