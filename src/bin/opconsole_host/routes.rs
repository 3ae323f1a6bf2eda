use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use super::HostState;
use super::data;

pub(crate) fn router(state: Arc<HostState>) -> Router {
    let authed = Router::new()
        .route("/openapi/v2/account/teams", get(list_teams))
        .route("/openapi/v2/account/users/search", get(search_users))
        .route("/openapi/v2/project/projects", get(list_projects))
        .route("/openapi/v2/team/info", get(team_info))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer,
        ));

    Router::new()
        .route("/healthz", get(healthz))
        .route("/manifest", get(manifest))
        .merge(authed)
        .with_state(state)
}

async fn require_bearer(
    State(state): State<Arc<HostState>>,
    req: Request,
    next: Next,
) -> Response {
    let ok = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|t| t == state.token);
    if !ok {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "unauthorized" })),
        )
            .into_response();
    }
    next.run(req).await
}

async fn healthz() -> &'static str {
    "ok"
}

async fn manifest() -> Json<Value> {
    Json(data::manifest())
}

async fn list_teams() -> Json<Value> {
    Json(json!({ "data": { "teams": data::teams() } }))
}

async fn search_users(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let team = params
        .get("teamID")
        .map(String::as_str)
        .filter(|t| !t.is_empty())
        .unwrap_or(data::TEAM_ALPHA);
    Json(json!({ "data": { "list": data::users(team) } }))
}

async fn list_projects(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let team = params
        .get("teamID")
        .map(String::as_str)
        .filter(|t| !t.is_empty())
        .unwrap_or(data::TEAM_ALPHA);
    Json(json!({ "data": { "list": data::projects(team) } }))
}

async fn team_info() -> Json<Value> {
    Json(data::team_info())
}
