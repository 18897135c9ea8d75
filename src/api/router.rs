//! HTTP router.
//!
//! Routes are declared once in [`route_table`] and folded into an axum
//! `Router` by [`api_router`].
//!
//! Layer stack (outermost → innermost):
//! 1. CORS → 2. `Cache-Control: no-store` → 3. Access log → 4. Body limit

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post, MethodRouter};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// One path with every method it serves.
pub struct Route {
    pub name: &'static str,
    pub path: &'static str,
    pub handler: MethodRouter<ApiContext>,
}

impl Route {
    fn new(name: &'static str, path: &'static str, handler: MethodRouter<ApiContext>) -> Self {
        Self { name, path, handler }
    }
}

/// Every route the service exposes.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn route_table() -> Vec<Route> {
    use crate::api::endpoints::*;

    vec![
        Route::new("index", "/", get(health::index)),
        Route::new("health", "/health", get(health::check)),
        Route::new(
            "patients",
            "/patients",
            post(patients::create).put(patients::update),
        ),
        Route::new(
            "patient_by_id",
            "/patients/patientuuid/:id",
            get(patients::detail),
        ),
        Route::new(
            "patients_by_doctor",
            "/patients/doctoruuid/:id",
            get(patients::seen_by_doctor),
        ),
        Route::new("doctors", "/doctors", post(doctors::create).get(doctors::list)),
        Route::new(
            "doctor_by_id",
            "/doctors/doctoruuid/:id",
            get(doctors::detail),
        ),
        Route::new(
            "scheduled_appointments",
            "/scheduledappointments",
            post(appointments::schedule),
        ),
        Route::new(
            "scheduled_appointment_by_id",
            "/scheduledappointments/appointmentuuid/:id",
            get(appointments::scheduled_detail).delete(appointments::cancel),
        ),
        Route::new(
            "completed_appointments",
            "/completedappointments",
            post(appointments::complete),
        ),
        Route::new(
            "completed_appointment_by_id",
            "/completedappointments/appointmentuuid/:id",
            get(appointments::completed_detail),
        ),
        Route::new(
            "appointments_by_patient",
            "/appointments/patientuuid/:id",
            get(appointments::by_patient),
        ),
        Route::new(
            "appointments_by_doctor",
            "/appointments/doctoruuid/:id",
            get(appointments::by_doctor),
        ),
        Route::new(
            "prescriptions",
            "/prescriptions",
            post(prescriptions::create_batch),
        ),
        Route::new(
            "prescriptions_by_patient",
            "/prescriptions/patientuuid/:id",
            get(prescriptions::by_patient),
        ),
        Route::new("notifications", "/notifications", post(notifications::send)),
        Route::new(
            "notifications_by_doctor",
            "/notifications/doctoruuid/:id",
            get(notifications::inbox),
        ),
        Route::new("documents", "/documents", post(documents::upload)),
        Route::new(
            "document_by_id",
            "/documents/documentuuid/:id",
            get(documents::download),
        ),
        Route::new(
            "documents_by_patient",
            "/documents/patientuuid/:id",
            get(documents::by_patient),
        ),
    ]
}

/// Build the service router with its full layer stack.
pub fn api_router(ctx: ApiContext) -> Router {
    let body_limit = ctx.config.max_document_bytes;
    let cors = cors_layer(ctx.config.allowed_origin.as_deref());

    let mut router = Router::new();
    for route in route_table() {
        tracing::debug!(name = route.name, path = route.path, "registering route");
        router = router.route(route.path, route.handler);
    }

    router
        .with_state(ctx)
        // Innermost first, outermost last
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(cors)
}

fn cors_layer(allowed_origin: Option<&str>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    match allowed_origin.and_then(|origin| HeaderValue::from_str(origin).ok()) {
        Some(origin) => cors.allow_origin(origin),
        None => cors.allow_origin(Any),
    }
}
