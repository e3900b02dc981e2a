use crate::routes::ApiError;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tessera::domain::constants::JOBS_TAG;
use tessera::domain::legacy::MigrationJob;
use tessera::features::legacy::Legacy;
use tessera::kernel::prelude::ApiState;
use utoipa::{IntoParams, ToSchema};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub(crate) fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(start_job, list_jobs))
        .routes(routes!(get_job))
        .routes(routes!(record_progress))
        .routes(routes!(complete_job))
        .routes(routes!(fail_job))
        .routes(routes!(cancel_job))
}

/// A tracked migration job.
#[derive(Debug, Serialize, ToSchema)]
struct JobResponse {
    job_id: String,
    kind: String,
    status: String,
    started_at: i64,
    completed_at: Option<i64>,
    total_items: i64,
    processed_items: i64,
    error_count: i64,
    warning_count: i64,
    progress_ratio: f64,
}

impl From<MigrationJob> for JobResponse {
    fn from(job: MigrationJob) -> Self {
        let progress_ratio = job.progress_ratio();
        Self {
            job_id: job.job_id,
            kind: job.kind,
            status: job.status.as_str().to_owned(),
            started_at: job.started_at,
            completed_at: job.completed_at,
            total_items: job.total_items,
            processed_items: job.processed_items,
            error_count: job.error_count,
            warning_count: job.warning_count,
            progress_ratio,
        }
    }
}

/// Fields for starting a tracked bulk migration job.
#[derive(Debug, Deserialize, ToSchema)]
struct StartJobRequest {
    /// Job family, e.g. `bulk_import` or `resync`.
    kind: String,
    total_items: i64,
    /// Refuse to start while another job of the same kind is running.
    #[serde(default)]
    exclusive: bool,
}

/// Absolute progress counters reported by the worker driving the job.
#[derive(Debug, Deserialize, ToSchema)]
struct ProgressRequest {
    processed_items: i64,
    #[serde(default)]
    error_count: i64,
    #[serde(default)]
    warning_count: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
struct ListJobsQuery {
    /// Restrict the listing to jobs still running.
    #[serde(default)]
    running_only: bool,
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = StartJobRequest,
    responses(
        (status = CREATED, description = "Job started", body = JobResponse),
        (status = CONFLICT, description = "Exclusive kind already running"),
    ),
    tag = JOBS_TAG,
)]
async fn start_job(
    State(state): State<ApiState>,
    Json(request): Json<StartJobRequest>,
) -> Result<(StatusCode, Json<JobResponse>), ApiError> {
    let legacy = state.try_get_slice::<Legacy>()?;
    let job =
        legacy.jobs().start_job(&request.kind, request.total_items, request.exclusive).await?;
    Ok((StatusCode::CREATED, Json(job.into())))
}

#[utoipa::path(
    get,
    path = "/api/jobs",
    params(ListJobsQuery),
    responses((status = OK, description = "Jobs newest first", body = [JobResponse])),
    tag = JOBS_TAG,
)]
async fn list_jobs(
    State(state): State<ApiState>,
    Query(query): Query<ListJobsQuery>,
) -> Result<Json<Vec<JobResponse>>, ApiError> {
    let legacy = state.try_get_slice::<Legacy>()?;
    let jobs = legacy.jobs().list(query.running_only).await?;
    Ok(Json(jobs.into_iter().map(JobResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{job_id}",
    params(("job_id" = String, Path, description = "Job id")),
    responses(
        (status = OK, description = "The job", body = JobResponse),
        (status = NOT_FOUND, description = "Unknown job id"),
    ),
    tag = JOBS_TAG,
)]
async fn get_job(
    State(state): State<ApiState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobResponse>, ApiError> {
    let legacy = state.try_get_slice::<Legacy>()?;
    let job = legacy.jobs().get(&job_id).await?;
    Ok(Json(job.into()))
}

#[utoipa::path(
    put,
    path = "/api/jobs/{job_id}/progress",
    params(("job_id" = String, Path, description = "Job id")),
    request_body = ProgressRequest,
    responses(
        (status = OK, description = "Updated job", body = JobResponse),
        (status = NOT_FOUND, description = "Unknown job id"),
        (status = CONFLICT, description = "Job already terminal"),
    ),
    tag = JOBS_TAG,
)]
async fn record_progress(
    State(state): State<ApiState>,
    Path(job_id): Path<String>,
    Json(request): Json<ProgressRequest>,
) -> Result<Json<JobResponse>, ApiError> {
    let legacy = state.try_get_slice::<Legacy>()?;
    let job = legacy
        .jobs()
        .record_progress(&job_id, request.processed_items, request.error_count, request.warning_count)
        .await?;
    Ok(Json(job.into()))
}

#[utoipa::path(
    post,
    path = "/api/jobs/{job_id}/complete",
    params(("job_id" = String, Path, description = "Job id")),
    responses(
        (status = OK, description = "Completed job", body = JobResponse),
        (status = CONFLICT, description = "Job already terminal"),
    ),
    tag = JOBS_TAG,
)]
async fn complete_job(
    State(state): State<ApiState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobResponse>, ApiError> {
    let legacy = state.try_get_slice::<Legacy>()?;
    let job = legacy.jobs().complete(&job_id).await?;
    Ok(Json(job.into()))
}

#[utoipa::path(
    post,
    path = "/api/jobs/{job_id}/fail",
    params(("job_id" = String, Path, description = "Job id")),
    responses(
        (status = OK, description = "Failed job", body = JobResponse),
        (status = CONFLICT, description = "Job already terminal"),
    ),
    tag = JOBS_TAG,
)]
async fn fail_job(
    State(state): State<ApiState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobResponse>, ApiError> {
    let legacy = state.try_get_slice::<Legacy>()?;
    let job = legacy.jobs().fail(&job_id).await?;
    Ok(Json(job.into()))
}

#[utoipa::path(
    post,
    path = "/api/jobs/{job_id}/cancel",
    params(("job_id" = String, Path, description = "Job id")),
    responses(
        (status = OK, description = "Cancelled job", body = JobResponse),
        (status = CONFLICT, description = "Job already terminal"),
    ),
    tag = JOBS_TAG,
)]
async fn cancel_job(
    State(state): State<ApiState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobResponse>, ApiError> {
    let legacy = state.try_get_slice::<Legacy>()?;
    let job = legacy.jobs().cancel(&job_id).await?;
    Ok(Json(job.into()))
}
