use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, middleware::auth::require_auth, ApiState};

pub fn routes(state: Arc<ApiState>) -> Router<Arc<ApiState>> {
    let protected = Router::new()
        .route("/api/slots/generate", post(handlers::slots::generate_slots))
        .route("/api/slots", get(handlers::slots::list_business_slots))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .merge(protected)
        .route("/api/public/slots", get(handlers::slots::public_slots))
}
