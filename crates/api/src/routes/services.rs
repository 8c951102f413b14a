use axum::{middleware, routing::get, Router};
use std::sync::Arc;

use crate::{handlers, middleware::auth::require_auth, ApiState};

pub fn routes(state: Arc<ApiState>) -> Router<Arc<ApiState>> {
    let protected = Router::new()
        .route("/api/services", get(handlers::services::list_services))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .merge(protected)
        .route("/api/public/services", get(handlers::services::public_services))
}
