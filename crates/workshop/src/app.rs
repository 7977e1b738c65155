use axum::{
    http::{header, HeaderName, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    context::{EMAIL_HEADER, ROLE_HEADER, USERNAME_HEADER},
    handlers::{
        health::{healthz, livez},
        references::{list_cars, list_clients, list_mechanics, list_services},
        repair_jobs::{
            cancel_repair_job, create_repair_job, delete_repair_job, get_repair_job,
            list_repair_jobs, update_repair_job,
        },
        reservations::{
            cancel_reservation, create_reservation, delete_reservation, get_reservation,
            list_reservations, update_reservation,
        },
        schedule::get_schedule,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(ROLE_HEADER),
            HeaderName::from_static(EMAIL_HEADER),
            HeaderName::from_static(USERNAME_HEADER),
        ]);

    let api_routes = Router::new()
        .route("/schedule", get(get_schedule))
        // Reservation routes
        .route(
            "/reservations",
            get(list_reservations).post(create_reservation),
        )
        .route(
            "/reservations/{id}",
            get(get_reservation)
                .put(update_reservation)
                .delete(delete_reservation),
        )
        .route("/reservations/{id}/cancel", post(cancel_reservation))
        // Repair job routes
        .route("/repair-jobs", get(list_repair_jobs).post(create_repair_job))
        .route(
            "/repair-jobs/{id}",
            get(get_repair_job)
                .put(update_repair_job)
                .delete(delete_repair_job),
        )
        .route("/repair-jobs/{id}/cancel", post(cancel_repair_job))
        // Reference data
        .route("/clients", get(list_clients))
        .route("/mechanics", get(list_mechanics))
        .route("/services", get(list_services))
        .route("/cars", get(list_cars))
        .layer(cors);

    let timeout = state.config.request_timeout();

    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .with_state(state)
}
