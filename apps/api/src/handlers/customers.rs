//! `/customers` handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ApiResult;
use crate::extract::{parse_id, ApiJson};
use crate::state::AppState;
use meeple_core::validation::{validate_customer, validate_search_term};
use meeple_core::{CoreError, Customer, CustomerInput};

#[derive(Debug, Default, Deserialize)]
pub struct CustomerQuery {
    pub cpf: Option<String>,
}

/// `GET /customers?cpf=`
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
) -> ApiResult<Json<Vec<Customer>>> {
    let cpf = validate_search_term("cpf", query.cpf.as_deref())?;
    Ok(Json(state.db.customers().list(cpf.as_deref()).await?))
}

/// `GET /customers/{id}`
///
/// Answers with a one-element array, which is what existing clients read.
pub async fn get(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Vec<Customer>>> {
    let id = parse_id("id", &raw_id)?;

    let customer = state
        .db
        .customers()
        .get_by_id(id)
        .await?
        .ok_or(CoreError::CustomerNotFound(id))?;

    Ok(Json(vec![customer]))
}

/// `POST /customers`
pub async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CustomerInput>,
) -> ApiResult<(StatusCode, Json<Customer>)> {
    let payload = payload.trimmed();
    let birthday = validate_customer(&payload)?;

    let customers = state.db.customers();
    if customers.cpf_owner(&payload.cpf).await?.is_some() {
        warn!("Customer cpf already registered");
        return Err(CoreError::DuplicateCpf(payload.cpf).into());
    }

    let customer = customers.insert(&payload, birthday).await?;
    info!(id = customer.id, "Customer registered");

    Ok((StatusCode::CREATED, Json(customer)))
}

/// `PUT /customers/{id}`
///
/// ## Checks, in order
/// 1. Id and payload shape (400)
/// 2. Customer exists (404)
/// 3. The cpf is free or already this customer's (409 otherwise)
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ApiJson(payload): ApiJson<CustomerInput>,
) -> ApiResult<Json<Customer>> {
    let id = parse_id("id", &raw_id)?;
    let payload = payload.trimmed();
    let birthday = validate_customer(&payload)?;

    let customers = state.db.customers();
    if !customers.exists(id).await? {
        return Err(CoreError::CustomerNotFound(id).into());
    }

    if let Some(owner) = customers.cpf_owner(&payload.cpf).await? {
        if owner != id {
            warn!(id = id, owner = owner, "cpf belongs to another customer");
            return Err(CoreError::DuplicateCpf(payload.cpf).into());
        }
    }

    let customer = customers.update(id, &payload, birthday).await?;
    info!(id = customer.id, "Customer updated");

    Ok(Json(customer))
}
