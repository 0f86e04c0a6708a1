//! # Experiment Routes
//!
//! Axum routes for the three endpoint groups. Every group gets the same
//! list and retrieve handlers with its own state.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::experiment::{Experiment, ExperimentStore};
use crate::observability::MetricsRegistry;

use super::errors::{RestError, RestResult};
use super::group::ExperimentGroup;

/// State shared by the handlers of one group
pub struct GroupState {
    pub group: ExperimentGroup,
    pub store: Arc<dyn ExperimentStore>,
    pub metrics: Arc<MetricsRegistry>,
}

/// Routes for all groups under `{prefix}/experiments`
///
/// `prefix` is either empty or starts with `/` and has no trailing slash.
pub fn experiment_routes(
    prefix: &str,
    store: Arc<dyn ExperimentStore>,
    metrics: Arc<MetricsRegistry>,
) -> Router {
    let base = format!("{}/experiments", prefix);
    let groups = [
        (base.clone(), ExperimentGroup::all()),
        (format!("{}/draft", base), ExperimentGroup::draft()),
        (format!("{}/first-run", base), ExperimentGroup::first_run()),
    ];

    groups
        .into_iter()
        .fold(Router::new(), |router, (path, group)| {
            let state = Arc::new(GroupState {
                group,
                store: store.clone(),
                metrics: metrics.clone(),
            });
            router.merge(group_routes(&path, state))
        })
}

/// List and retrieve routes for one group, with and without trailing slash
fn group_routes(path: &str, state: Arc<GroupState>) -> Router {
    Router::new()
        .route(path, get(list_handler))
        .route(&format!("{}/", path), get(list_handler))
        .route(&format!("{}/:slug", path), get(retrieve_handler))
        .route(&format!("{}/:slug/", path), get(retrieve_handler))
        .with_state(state)
}

/// List records in the group
async fn list_handler(
    State(state): State<Arc<GroupState>>,
    Query(query): Query<HashMap<String, String>>,
) -> RestResult<Json<Vec<Experiment>>> {
    let filter = state.group.parse_filter(&query).map_err(|e| {
        state.metrics.increment_rejected();
        e
    })?;

    let records = state.group.list(state.store.as_ref(), filter)?;
    tracing::debug!(
        group = state.group.name(),
        field = state.group.filter_field().as_str(),
        filter = ?filter.map(|f| f.value),
        count = records.len(),
        "listed experiments"
    );
    state.metrics.record_list(records.len());

    Ok(Json(records))
}

/// Get a single record in the group by slug
async fn retrieve_handler(
    State(state): State<Arc<GroupState>>,
    Path(slug): Path<String>,
) -> RestResult<Json<Experiment>> {
    match state.group.retrieve(state.store.as_ref(), &slug) {
        Ok(experiment) => {
            state.metrics.record_retrieve();
            Ok(Json(experiment))
        }
        Err(RestError::NotFound) => {
            tracing::debug!(group = state.group.name(), slug = %slug, "experiment not found");
            state.metrics.increment_not_found();
            Err(RestError::NotFound)
        }
        Err(e) => Err(e),
    }
}
