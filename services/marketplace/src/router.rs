use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use agrilink_core::health::{healthz, readyz};
use agrilink_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    application::{apply_to_job, list_job_applications, list_my_applications},
    auth::{login, logout, me, register, send_otp},
    equipment::{
        create_equipment, delete_equipment, get_equipment, list_equipment, list_my_equipment,
        list_owner_equipment, update_equipment,
    },
    job::{create_job, delete_job, get_job, list_farmer_jobs, list_jobs, list_my_jobs, update_job},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/api/auth/send-otp", post(send_otp))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/auth/logout", post(logout))
        // Jobs
        .route("/api/jobs", get(list_jobs).post(create_job))
        .route("/api/jobs/my", get(list_my_jobs))
        .route("/api/jobs/farmer/{farmer_id}", get(list_farmer_jobs))
        .route(
            "/api/jobs/{id}",
            get(get_job).patch(update_job).delete(delete_job),
        )
        // Applications
        .route("/api/jobs/{id}/apply", post(apply_to_job))
        .route("/api/jobs/{id}/applications", get(list_job_applications))
        .route("/api/applications/my", get(list_my_applications))
        // Equipment
        .route("/api/equipment", get(list_equipment).post(create_equipment))
        .route("/api/equipment/my", get(list_my_equipment))
        .route("/api/equipment/owner/{owner_id}", get(list_owner_equipment))
        .route(
            "/api/equipment/{id}",
            get(get_equipment)
                .patch(update_equipment)
                .delete(delete_equipment),
        )
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
