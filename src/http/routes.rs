use axum::{
    Router,
    routing::{get, patch, post, put},
};

use crate::{http::handlers::*, state::AppState};

pub fn create_http_routes(state: AppState) -> Router {
    let network_routes = Router::new()
        .route(
            "/ratings",
            get(list_ratings_handler).post(create_rating_handler),
        )
        .route(
            "/ratings/{rating_id}",
            get(get_rating_handler)
                .put(update_rating_handler)
                .delete(delete_rating_handler),
        )
        .route(
            "/ratings/{rating_id}/comments",
            get(list_rating_comments_handler),
        )
        .route("/comments", post(create_comment_handler))
        .route("/comments/{comment_id}", put(update_comment_handler))
        .route("/comments/{comment_id}/like", patch(toggle_like_handler))
        .route(
            "/devices",
            get(list_devices_handler).post(create_device_handler),
        )
        .route(
            "/isp-providers",
            get(list_networks_handler).post(create_network_handler),
        )
        .route("/statistics", get(network_overview_handler))
        .route("/statistics/{network_id}", get(network_detail_handler))
        .route(
            "/statistics/{network_id}/trend",
            get(network_trend_handler),
        )
        .route("/users/{user_id}/summary", get(user_summary_handler))
        .route("/recommendations", get(recommendations_handler));

    Router::new()
        .nest("/api/network", network_routes)
        .with_state(state)
}
