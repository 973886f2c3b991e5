//! Filament inventory endpoints.
//!
//! The inventory is seeded with a set of stock spools the first time the
//! document is read. Unlike orders, updates and deletes here answer with
//! the full collection unconditionally; an unknown id is a silent no-op,
//! which the admin UI relies on (it re-renders from the returned list).

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::store::FileStore;

use super::{take_bool, take_string};

pub(crate) const FILAMENTS_DOC: &str = "filaments";

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Filament {
    pub id: String,
    pub name: String,
    pub color: String,
    pub hex: String,
    pub material: String,
    pub in_stock: bool,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

fn spool(id: &str, name: &str, color: &str, hex: &str, material: &str) -> Filament {
    Filament {
        id: id.to_string(),
        name: name.to_string(),
        color: color.to_string(),
        hex: hex.to_string(),
        material: material.to_string(),
        in_stock: true,
        extra: Map::new(),
    }
}

/// Stock inventory written on first run. Ids are stable slugs so the
/// frontend can reference them across restarts.
#[must_use]
pub fn seed_filaments() -> Vec<Filament> {
    vec![
        spool("fil-galaxy-black", "Galaxy Black", "Black", "#111111", "PLA"),
        spool("fil-arctic-white", "Arctic White", "White", "#F5F5F5", "PLA"),
        spool("fil-signal-red", "Signal Red", "Red", "#D32F2F", "PLA"),
        spool("fil-cobalt-blue", "Cobalt Blue", "Blue", "#1565C0", "PLA"),
        spool("fil-forest-green", "Forest Green", "Green", "#2E7D32", "PLA"),
        spool("fil-sunflower", "Sunflower", "Yellow", "#F9A825", "PLA"),
        spool("fil-violet-silk", "Violet Silk", "Purple", "#7B1FA2", "PLA"),
        spool("fil-tangerine-petg", "Tangerine", "Orange", "#EF6C00", "PETG"),
        spool("fil-clear-petg", "Clear", "Natural", "#E0E0E0", "PETG"),
        spool("fil-graphite-abs", "Graphite", "Grey", "#455A64", "ABS"),
        spool("fil-flex-black-tpu", "Flex Black", "Black", "#212121", "TPU"),
    ]
}

fn filament_from_request(mut body: Map<String, Value>) -> Filament {
    let id = take_string(&mut body, "id").unwrap_or_else(|| Uuid::new_v4().to_string());
    let name = take_string(&mut body, "name").unwrap_or_default();
    let color = take_string(&mut body, "color").unwrap_or_default();
    let hex = take_string(&mut body, "hex").unwrap_or_default();
    let material = take_string(&mut body, "material").unwrap_or_default();
    let in_stock = take_bool(&mut body, "inStock").unwrap_or(true);

    Filament {
        id,
        name,
        color,
        hex,
        material,
        in_stock,
        extra: body,
    }
}

fn apply_updates(filament: &mut Filament, updates: Map<String, Value>) {
    for (key, value) in updates {
        if key == "name" {
            if let Value::String(name) = value {
                filament.name = name;
            }
        } else if key == "color" {
            if let Value::String(color) = value {
                filament.color = color;
            }
        } else if key == "hex" {
            if let Value::String(hex) = value {
                filament.hex = hex;
            }
        } else if key == "material" {
            if let Value::String(material) = value {
                filament.material = material;
            }
        } else if key == "inStock" {
            if let Value::Bool(in_stock) = value {
                filament.in_stock = in_stock;
            }
        } else if key == "id" {
            if let Value::String(id) = value {
                if !id.trim().is_empty() {
                    filament.id = id;
                }
            }
        } else {
            filament.extra.insert(key, value);
        }
    }
}

/// List the filament inventory.
#[utoipa::path(
    get,
    path = "/api/filaments",
    responses((status = 200, description = "Filament inventory", body = [Filament])),
    tag = "filaments"
)]
pub async fn list_filaments(Extension(store): Extension<FileStore>) -> Json<Vec<Filament>> {
    Json(store.load(FILAMENTS_DOC, seed_filaments()).await)
}

/// Add a filament and return the full inventory.
#[utoipa::path(
    post,
    path = "/api/filaments",
    responses((status = 201, description = "Inventory after the insert", body = [Filament])),
    tag = "filaments"
)]
pub async fn create_filament(
    Extension(store): Extension<FileStore>,
    payload: Option<Json<Map<String, Value>>>,
) -> Result<(StatusCode, Json<Vec<Filament>>), ApiError> {
    let body = payload.map(|Json(map)| map).unwrap_or_default();
    let filament = filament_from_request(body);

    let mut filaments: Vec<Filament> = store.load(FILAMENTS_DOC, seed_filaments()).await;
    filaments.push(filament);
    store.save(FILAMENTS_DOC, &filaments).await?;

    Ok((StatusCode::CREATED, Json(filaments)))
}

/// Merge updates into a filament. An unknown id is a silent no-op.
#[utoipa::path(
    put,
    path = "/api/filaments/{id}",
    params(("id" = String, Path, description = "Filament identifier")),
    responses((status = 200, description = "Inventory after the update", body = [Filament])),
    tag = "filaments"
)]
pub async fn update_filament(
    Extension(store): Extension<FileStore>,
    Path(id): Path<String>,
    payload: Option<Json<Map<String, Value>>>,
) -> Result<Json<Vec<Filament>>, ApiError> {
    let updates = payload.map(|Json(map)| map).unwrap_or_default();

    let mut filaments: Vec<Filament> = store.load(FILAMENTS_DOC, seed_filaments()).await;
    if let Some(filament) = filaments.iter_mut().find(|filament| filament.id == id) {
        apply_updates(filament, updates);
        store.save(FILAMENTS_DOC, &filaments).await?;
    }

    Ok(Json(filaments))
}

/// Remove a filament and return the remaining inventory.
#[utoipa::path(
    delete,
    path = "/api/filaments/{id}",
    params(("id" = String, Path, description = "Filament identifier")),
    responses((status = 200, description = "Inventory after the delete", body = [Filament])),
    tag = "filaments"
)]
pub async fn delete_filament(
    Extension(store): Extension<FileStore>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Filament>>, ApiError> {
    let mut filaments: Vec<Filament> = store.load(FILAMENTS_DOC, seed_filaments()).await;

    let before = filaments.len();
    filaments.retain(|filament| filament.id != id);
    if filaments.len() != before {
        store.save(FILAMENTS_DOC, &filaments).await?;
    }

    Ok(Json(filaments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());
        (dir, store)
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn seed_inventory_has_eleven_spools_in_stock() {
        let seed = seed_filaments();
        assert_eq!(seed.len(), 11);
        assert!(seed.iter().all(|f| f.in_stock));
    }

    #[tokio::test]
    async fn listing_starts_from_the_seed_inventory() {
        let (_dir, store) = store();
        let Json(filaments) = list_filaments(Extension(store)).await;
        assert_eq!(filaments.len(), 11);
    }

    #[tokio::test]
    async fn create_defaults_in_stock_to_true() -> Result<()> {
        let (_dir, store) = store();
        let (status, Json(filaments)) = create_filament(
            Extension(store),
            Some(Json(object(json!({
                "name": "Bronze Fill",
                "color": "Bronze",
                "hex": "#8C7853",
                "material": "PLA"
            })))),
        )
        .await?;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(filaments.len(), 12);
        let added = filaments.last().expect("created filament");
        assert!(added.in_stock);
        assert!(!added.id.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_toggles_stock_and_unknown_id_noops() -> Result<()> {
        let (_dir, store) = store();

        let Json(filaments) = update_filament(
            Extension(store.clone()),
            Path("fil-signal-red".to_string()),
            Some(Json(object(json!({"inStock": false})))),
        )
        .await?;
        let red = filaments
            .iter()
            .find(|f| f.id == "fil-signal-red")
            .expect("seed spool");
        assert!(!red.in_stock);

        // Unknown id: still 200 with the collection, nothing changed.
        let Json(unchanged) = update_filament(
            Extension(store),
            Path("fil-unknown".to_string()),
            Some(Json(object(json!({"inStock": false})))),
        )
        .await?;
        assert_eq!(unchanged.len(), filaments.len());
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_not_an_error_for_unknown_ids() -> Result<()> {
        let (_dir, store) = store();

        let Json(after) = delete_filament(
            Extension(store.clone()),
            Path("fil-galaxy-black".to_string()),
        )
        .await?;
        assert_eq!(after.len(), 10);

        let Json(unchanged) =
            delete_filament(Extension(store), Path("fil-galaxy-black".to_string())).await?;
        assert_eq!(unchanged.len(), 10);
        Ok(())
    }
}
