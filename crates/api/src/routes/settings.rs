use axum::routing::{get, put};
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Settings routes mounted at `/settings`.
///
/// ```text
/// GET    /                -> get_settings
/// DELETE /                -> reset_settings
/// PUT    /thresholds      -> update_thresholds
/// PUT    /plant-profile   -> update_plant_profile
/// PUT    /auto-control    -> update_auto_control
/// PUT    /system          -> update_system
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(settings::get_settings).delete(settings::reset_settings),
        )
        .route("/thresholds", put(settings::update_thresholds))
        .route("/plant-profile", put(settings::update_plant_profile))
        .route("/auto-control", put(settings::update_auto_control))
        .route("/system", put(settings::update_system))
}
