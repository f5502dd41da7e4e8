use actix_web::{web, HttpResponse, Responder};
use crate::models::{ErrorResponse, HealthResponse, ProvidersQuery};
use crate::services::JobService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub jobs: JobService,
}

/// Configure all job-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/jobs", web::get().to(list_jobs))
        .route("/jobs/{job_id}/providers", web::get().to(providers_for_job));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// All jobs endpoint
///
/// GET /api/jobs
async fn list_jobs(state: web::Data<AppState>) -> impl Responder {
    tracing::info!("[GET] /jobs");

    match state.jobs.get_jobs().await {
        Ok(jobs) => HttpResponse::Ok().json(jobs),
        Err(e) => {
            tracing::error!("Failed to fetch jobs: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Error fetching jobs", e))
        }
    }
}

/// Ranked providers endpoint
///
/// GET /api/jobs/{jobId}/providers?costWeight=&ratingWeight=&turnoverWeight=&proximityWeight=
///
/// Any weight that is missing, infinite or not a number counts as 0. A
/// repeated weight takes its first value. An unknown job returns an empty
/// array.
async fn providers_for_job(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<Vec<(String, String)>>,
) -> impl Responder {
    let job_id = path.into_inner();
    let preferences = ProvidersQuery::from_pairs(query.as_slice()).preferences();

    tracing::info!(
        "[GET] /jobs/{}/providers - costWeight: {} - ratingWeight: {} - turnoverWeight: {} - proximityWeight: {}",
        job_id,
        preferences.cost_weight,
        preferences.rating_weight,
        preferences.turnover_weight,
        preferences.proximity_weight
    );

    match state.jobs.providers_for_job(&job_id, preferences).await {
        Ok(providers) => HttpResponse::Ok().json(providers),
        Err(e) => {
            tracing::error!("Failed to rank providers for job {}: {}", job_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Error fetching providers", e))
        }
    }
}
