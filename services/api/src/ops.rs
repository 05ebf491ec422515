use std::collections::HashMap;

use schema::{NewPrice, NewUser, validate_new_price, validate_new_user};
use serde_json::{Value, json};
use store::{Filter, StoreError};

use crate::db::DatabaseHandle;
use crate::transport::HttpResponse;

const DEFAULT_SEASON: &str = "kharif";

/// Fixed-path liveness marker; deliberately independent of store
/// availability.
pub(crate) fn health() -> HttpResponse {
    HttpResponse::ok_json(&json!({
        "status": "healthy",
        "timestamp": schema::now_rfc3339(),
    }))
}

pub(crate) async fn list_crops(handle: &DatabaseHandle) -> Result<HttpResponse, StoreError> {
    let crops = handle
        .store()
        .find(schema::CROPS_COLLECTION, &Filter::all())
        .await?;
    Ok(HttpResponse::ok_json(&documents_json(crops)))
}

/// Exact season equality; an absent or empty `season` parameter falls back
/// to the kharif season.
pub(crate) async fn crops_by_season(
    handle: &DatabaseHandle,
    query: &HashMap<String, String>,
) -> Result<HttpResponse, StoreError> {
    let season = query
        .get("season")
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_SEASON);
    let crops = handle
        .store()
        .find(schema::CROPS_COLLECTION, &Filter::all().eq("season", season))
        .await?;
    Ok(HttpResponse::ok_json(&documents_json(crops)))
}

/// State and district, when provided and non-empty, are case-insensitive
/// substring constraints; otherwise they impose none.
pub(crate) async fn prices_by_location(
    handle: &DatabaseHandle,
    query: &HashMap<String, String>,
) -> Result<HttpResponse, StoreError> {
    let mut filter = Filter::all();
    if let Some(state) = query.get("state").filter(|value| !value.is_empty()) {
        filter = filter.contains_insensitive("state", state);
    }
    if let Some(district) = query.get("district").filter(|value| !value.is_empty()) {
        filter = filter.contains_insensitive("district", district);
    }
    let prices = handle
        .store()
        .find(schema::PRICES_COLLECTION, &filter)
        .await?;
    Ok(HttpResponse::ok_json(&documents_json(prices)))
}

pub(crate) async fn create_price(
    handle: &DatabaseHandle,
    body: &[u8],
) -> Result<HttpResponse, StoreError> {
    let payload: NewPrice = match parse_body(body) {
        Ok(payload) => payload,
        Err(response) => return Ok(response),
    };
    if validate_new_price(&payload).is_err() {
        return Ok(HttpResponse::bad_request("crop and price are required"));
    }

    let document = json_document(json!({
        "crop": payload.crop,
        "price": payload.price,
        "state": payload.state.unwrap_or_default(),
        "district": payload.district.unwrap_or_default(),
        "date": payload.date.unwrap_or_else(schema::now_rfc3339),
    }));
    let id = handle
        .store()
        .insert_one(schema::PRICES_COLLECTION, document)
        .await?;
    Ok(HttpResponse::created(&json!({ "id": id })))
}

pub(crate) async fn list_schemes(handle: &DatabaseHandle) -> Result<HttpResponse, StoreError> {
    let schemes = handle
        .store()
        .find(schema::SCHEMES_COLLECTION, &Filter::all())
        .await?;
    Ok(HttpResponse::ok_json(&documents_json(schemes)))
}

/// Exact state equality. An absent parameter still filters on the empty
/// string; see DESIGN.md for why this asymmetry is preserved.
pub(crate) async fn schemes_by_state(
    handle: &DatabaseHandle,
    query: &HashMap<String, String>,
) -> Result<HttpResponse, StoreError> {
    let state = query.get("state").map(String::as_str).unwrap_or_default();
    let schemes = handle
        .store()
        .find(schema::SCHEMES_COLLECTION, &Filter::all().eq("state", state))
        .await?;
    Ok(HttpResponse::ok_json(&documents_json(schemes)))
}

pub(crate) async fn user_profile(
    handle: &DatabaseHandle,
    query: &HashMap<String, String>,
) -> Result<HttpResponse, StoreError> {
    let Some(user_id) = query.get("id").filter(|value| !value.is_empty()) else {
        return Ok(HttpResponse::bad_request("id is required"));
    };
    match handle
        .store()
        .find_one_by_id(schema::USERS_COLLECTION, user_id)
        .await?
    {
        Some(user) => Ok(HttpResponse::ok_json(&Value::Object(user))),
        None => Ok(HttpResponse::not_found("User not found")),
    }
}

pub(crate) async fn create_user(
    handle: &DatabaseHandle,
    body: &[u8],
) -> Result<HttpResponse, StoreError> {
    let payload: NewUser = match parse_body(body) {
        Ok(payload) => payload,
        Err(response) => return Ok(response),
    };
    if validate_new_user(&payload).is_err() {
        return Ok(HttpResponse::bad_request("name and email are required"));
    }

    let document = json_document(json!({
        "name": payload.name,
        "email": payload.email,
        "phone": payload.phone.unwrap_or_default(),
        "createdAt": schema::now_rfc3339(),
    }));
    let id = handle
        .store()
        .insert_one(schema::USERS_COLLECTION, document)
        .await?;
    Ok(HttpResponse::created(&json!({ "id": id })))
}

fn documents_json(documents: Vec<store::Document>) -> Value {
    Value::Array(documents.into_iter().map(Value::Object).collect())
}

fn json_document(value: Value) -> store::Document {
    match value {
        Value::Object(map) => map,
        _ => store::Document::new(),
    }
}

/// An empty body, and a well-formed body whose fields have the wrong types,
/// both parse as an all-defaults payload so that required-field validation
/// produces the 400. Only unparseable JSON gets the parse-error message.
fn parse_body<T>(body: &[u8]) -> Result<T, HttpResponse>
where
    T: serde::de::DeserializeOwned + Default,
{
    if body.is_empty() {
        return Ok(T::default());
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| HttpResponse::bad_request("request body must be valid JSON"))?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
