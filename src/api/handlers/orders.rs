//! Print order endpoints.
//!
//! Orders are an open-ended document: the server owns `id`, `createdAt`,
//! `status`, and `adminNotes` defaults, and everything else the client sends
//! (device identifier, contact info, material, address, ...) is kept verbatim
//! in a flattened field map. Client-supplied known fields win over the
//! defaults, matching what the admin frontend expects when importing orders.

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::notify::{self, Notification, NotificationSink};
use crate::store::FileStore;

use super::take_string;

pub(crate) const ORDERS_DOC: &str = "orders";

pub const DEFAULT_STATUS: &str = "pending";

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub status: String,
    pub admin_notes: String,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct OrdersQuery {
    /// Restrict the listing to orders created from this device.
    pub device_id: Option<String>,
}

/// Build an order from a creation payload: defaults first, then whatever the
/// client sent on top. Unparseable `createdAt` values fall back to the
/// server clock so the collection stays sortable.
fn order_from_request(mut body: Map<String, Value>) -> Order {
    let id = take_string(&mut body, "id").unwrap_or_else(|| Uuid::new_v4().to_string());
    let created_at = take_string(&mut body, "createdAt")
        .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
        .map_or_else(Utc::now, |parsed| parsed.with_timezone(&Utc));
    let status = take_string(&mut body, "status").unwrap_or_else(|| DEFAULT_STATUS.to_string());
    let admin_notes = take_string(&mut body, "adminNotes").unwrap_or_default();

    Order {
        id,
        created_at,
        status,
        admin_notes,
        extra: body,
    }
}

fn apply_updates(order: &mut Order, updates: Map<String, Value>) {
    for (key, value) in updates {
        if key == "status" {
            if let Value::String(status) = value {
                order.status = status;
            }
        } else if key == "adminNotes" {
            if let Value::String(notes) = value {
                order.admin_notes = notes;
            }
        } else if key == "id" {
            if let Value::String(id) = value {
                if !id.trim().is_empty() {
                    order.id = id;
                }
            }
        } else if key == "createdAt" {
            if let Some(parsed) = value
                .as_str()
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            {
                order.created_at = parsed.with_timezone(&Utc);
            }
        } else {
            order.extra.insert(key, value);
        }
    }
}

/// List orders, newest first, optionally filtered by device identifier.
#[utoipa::path(
    get,
    path = "/api/orders",
    params(OrdersQuery),
    responses((status = 200, description = "Orders, newest first", body = [Order])),
    tag = "orders"
)]
pub async fn list_orders(
    Extension(store): Extension<FileStore>,
    Query(query): Query<OrdersQuery>,
) -> Json<Vec<Order>> {
    let mut orders: Vec<Order> = store.load(ORDERS_DOC, Vec::new()).await;

    if let Some(device_id) = &query.device_id {
        orders.retain(|order| {
            order.extra.get("deviceId").and_then(Value::as_str) == Some(device_id.as_str())
        });
    }

    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Json(orders)
}

/// Create an order and fire a best-effort new-order alert.
#[utoipa::path(
    post,
    path = "/api/orders",
    responses((status = 201, description = "Created order", body = Order)),
    tag = "orders"
)]
pub async fn create_order(
    Extension(store): Extension<FileStore>,
    Extension(notifier): Extension<Arc<dyn NotificationSink>>,
    payload: Option<Json<Map<String, Value>>>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let body = payload.map(|Json(map)| map).unwrap_or_default();
    let order = order_from_request(body);

    let mut orders: Vec<Order> = store.load(ORDERS_DOC, Vec::new()).await;
    orders.push(order.clone());
    store.save(ORDERS_DOC, &orders).await?;

    notify::dispatch(
        &notifier,
        Notification::new(
            "New print order",
            format!("Order {} ({}) was created", order.id, order.status),
        ),
    );

    Ok((StatusCode::CREATED, Json(order)))
}

/// Merge updates into an order and return the full collection.
#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    params(("id" = String, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Full collection after the update", body = [Order]),
        (status = 404, description = "Unknown order id")
    ),
    tag = "orders"
)]
pub async fn update_order(
    Extension(store): Extension<FileStore>,
    Path(id): Path<String>,
    payload: Option<Json<Map<String, Value>>>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let updates = payload.map(|Json(map)| map).unwrap_or_default();

    let mut orders: Vec<Order> = store.load(ORDERS_DOC, Vec::new()).await;
    let Some(order) = orders.iter_mut().find(|order| order.id == id) else {
        return Err(ApiError::OrderNotFound);
    };

    apply_updates(order, updates);
    store.save(ORDERS_DOC, &orders).await?;
    Ok(Json(orders))
}

/// Delete an order and return the remaining collection.
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(("id" = String, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Full collection after the delete", body = [Order]),
        (status = 404, description = "Unknown order id")
    ),
    tag = "orders"
)]
pub async fn delete_order(
    Extension(store): Extension<FileStore>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let mut orders: Vec<Order> = store.load(ORDERS_DOC, Vec::new()).await;

    let before = orders.len();
    orders.retain(|order| order.id != id);
    if orders.len() == before {
        return Err(ApiError::OrderNotFound);
    }

    store.save(ORDERS_DOC, &orders).await?;
    Ok(Json(orders))
}
