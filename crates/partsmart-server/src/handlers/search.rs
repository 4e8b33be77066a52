//! Part search and the per-user search log

use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use partsmart_core::{
    MarketError, NewSearch, PartStore, Search, SearchCriteria, SearchResult, SearchStore,
};
use tracing::{debug, warn};

/// Searches are logged only when the request names a user. An unknown user
/// (a stale client session) skips the log but still gets results.
pub async fn search(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewSearch>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let criteria = SearchCriteria::from(&req);

    if req.user_id.is_some() {
        match state.store.create_search(req).await {
            Ok(_) => {}
            Err(MarketError::MissingReference { entity, id }) => {
                warn!("Search not logged: {} {} does not exist", entity, id);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let results = state.store.search_parts(&criteria).await?;
    debug!("Search {:?} matched {} sellers", criteria, results.len());
    Ok(Json(results))
}

pub async fn user_searches(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Search>>, ApiError> {
    Ok(Json(state.store.list_user_searches(&user_id).await?))
}
