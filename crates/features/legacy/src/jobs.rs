//! Migration job tracking.
//!
//! A job is a simple state machine: `Running -> {Completed, Failed,
//! Cancelled}`, transitions are terminal. The tracker stores and reports
//! externally-driven progress counters; it performs no retries or
//! cancellation of its own.

use crate::error::LegacyError;
use surrealdb_types::SurrealValue;
use tessera_database::Database;
use tessera_domain::constants::DEFAULT_LIST_LIMIT;
use tessera_domain::legacy::{JobStatus, MigrationJob};
use tessera_event_bus::EventBus;
use tessera_kernel::safe_nanoid;
use tracing::{debug, info};

/// Published on every progress update and terminal transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobProgress {
    pub job_id: String,
    pub status: JobStatus,
    pub processed_items: i64,
    pub total_items: i64,
    pub error_count: i64,
    pub warning_count: i64,
}

impl JobProgress {
    fn from_job(job: &MigrationJob) -> Self {
        Self {
            job_id: job.job_id.clone(),
            status: job.status,
            processed_items: job.processed_items,
            total_items: job.total_items,
            error_count: job.error_count,
            warning_count: job.warning_count,
        }
    }
}

#[derive(Debug, Clone, SurrealValue)]
struct JobRecord {
    job_id: String,
    kind: String,
    status: String,
    started_at: i64,
    completed_at: Option<i64>,
    total_items: i64,
    processed_items: i64,
    error_count: i64,
    warning_count: i64,
}

impl JobRecord {
    fn from_job(job: &MigrationJob) -> Self {
        Self {
            job_id: job.job_id.clone(),
            kind: job.kind.clone(),
            status: job.status.as_str().to_owned(),
            started_at: job.started_at,
            completed_at: job.completed_at,
            total_items: job.total_items,
            processed_items: job.processed_items,
            error_count: job.error_count,
            warning_count: job.warning_count,
        }
    }

    fn into_job(self) -> Result<MigrationJob, LegacyError> {
        let status = JobStatus::parse(&self.status).ok_or_else(|| LegacyError::Corrupt {
            message: format!("unknown job status '{}' on {}", self.status, self.job_id).into(),
        })?;
        Ok(MigrationJob {
            job_id: self.job_id,
            kind: self.kind,
            status,
            started_at: self.started_at,
            completed_at: self.completed_at,
            total_items: self.total_items,
            processed_items: self.processed_items,
            error_count: self.error_count,
            warning_count: self.warning_count,
        })
    }
}

/// Tracks bulk migration jobs and fans progress out over the event bus.
#[derive(Debug, Clone)]
pub struct JobTracker {
    db: Database,
    events: EventBus,
}

impl JobTracker {
    #[must_use]
    pub const fn new(db: Database, events: EventBus) -> Self {
        Self { db, events }
    }

    /// Starts tracking a job. With `exclusive` set, refuses to start while
    /// another job of the same kind is still running.
    ///
    /// # Errors
    /// Returns [`LegacyError::AlreadyRunning`] when the exclusivity check
    /// trips.
    pub async fn start_job(
        &self,
        kind: &str,
        total_items: i64,
        exclusive: bool,
    ) -> Result<MigrationJob, LegacyError> {
        if exclusive {
            let running = self
                .db
                .query(
                    "SELECT * FROM ONLY migration_job \
                     WHERE kind = $kind AND status = 'running' LIMIT 1",
                )
                .bind(("kind", kind.to_owned()))
                .await?
                .take::<Option<JobRecord>>(0)?;
            if running.is_some() {
                return Err(LegacyError::AlreadyRunning { kind: kind.to_owned() });
            }
        }

        let job = MigrationJob {
            job_id: safe_nanoid!(),
            kind: kind.to_owned(),
            status: JobStatus::Running,
            started_at: chrono::Utc::now().timestamp(),
            completed_at: None,
            total_items: total_items.max(0),
            processed_items: 0,
            error_count: 0,
            warning_count: 0,
        };

        self.db
            .query("CREATE type::record('migration_job', $job_id) CONTENT $record")
            .bind(("job_id", job.job_id.clone()))
            .bind(("record", JobRecord::from_job(&job)))
            .await?
            .check()
            .map_err(surrealdb::Error::from)?;

        info!(job_id = %job.job_id, kind, total_items = job.total_items, "Migration job started");
        Ok(job)
    }

    /// Overwrites the progress counters of a running job. `processed_items`
    /// is clamped so it never exceeds `total_items`.
    ///
    /// # Errors
    /// * [`LegacyError::NotFound`] for unknown job ids.
    /// * [`LegacyError::Terminal`] if the job already finished.
    pub async fn record_progress(
        &self,
        job_id: &str,
        processed_items: i64,
        error_count: i64,
        warning_count: i64,
    ) -> Result<MigrationJob, LegacyError> {
        let mut job = self.get(job_id).await?;
        if job.status.is_terminal() {
            return Err(LegacyError::Terminal { job_id: job.job_id, status: job.status });
        }

        job.processed_items = processed_items.clamp(0, job.total_items);
        job.error_count = error_count.max(0);
        job.warning_count = warning_count.max(0);
        self.persist(&job).await?;

        debug!(
            job_id = %job.job_id,
            processed = job.processed_items,
            total = job.total_items,
            "Migration job progress"
        );
        self.events.publish(JobProgress::from_job(&job));
        Ok(job)
    }

    /// Marks a running job completed.
    ///
    /// # Errors
    /// * [`LegacyError::NotFound`] for unknown job ids.
    /// * [`LegacyError::Terminal`] if the job already finished.
    pub async fn complete(&self, job_id: &str) -> Result<MigrationJob, LegacyError> {
        self.finish(job_id, JobStatus::Completed).await
    }

    /// Marks a running job failed. Error tallies stay as the last progress
    /// update reported them.
    ///
    /// # Errors
    /// * [`LegacyError::NotFound`] for unknown job ids.
    /// * [`LegacyError::Terminal`] if the job already finished.
    pub async fn fail(&self, job_id: &str) -> Result<MigrationJob, LegacyError> {
        self.finish(job_id, JobStatus::Failed).await
    }

    /// Marks a running job cancelled on behalf of an external actor.
    ///
    /// # Errors
    /// * [`LegacyError::NotFound`] for unknown job ids.
    /// * [`LegacyError::Terminal`] if the job already finished.
    pub async fn cancel(&self, job_id: &str) -> Result<MigrationJob, LegacyError> {
        self.finish(job_id, JobStatus::Cancelled).await
    }

    async fn finish(&self, job_id: &str, status: JobStatus) -> Result<MigrationJob, LegacyError> {
        let mut job = self.get(job_id).await?;
        if job.status.is_terminal() {
            return Err(LegacyError::Terminal { job_id: job.job_id, status: job.status });
        }

        job.status = status;
        job.completed_at = Some(chrono::Utc::now().timestamp());
        self.persist(&job).await?;

        info!(job_id = %job.job_id, %status, "Migration job finished");
        self.events.publish(JobProgress::from_job(&job));
        Ok(job)
    }

    async fn persist(&self, job: &MigrationJob) -> Result<(), LegacyError> {
        self.db
            .query("UPSERT type::record('migration_job', $job_id) CONTENT $record")
            .bind(("job_id", job.job_id.clone()))
            .bind(("record", JobRecord::from_job(job)))
            .await?
            .check()
            .map_err(surrealdb::Error::from)?;
        Ok(())
    }

    /// Fetches a job by id.
    ///
    /// # Errors
    /// Returns [`LegacyError::NotFound`] for unknown job ids.
    pub async fn get(&self, job_id: &str) -> Result<MigrationJob, LegacyError> {
        self.db
            .query("SELECT * FROM ONLY type::record('migration_job', $job_id)")
            .bind(("job_id", job_id.to_owned()))
            .await?
            .take::<Option<JobRecord>>(0)?
            .ok_or_else(|| LegacyError::NotFound { key: job_id.to_owned().into() })?
            .into_job()
    }

    /// Lists jobs newest first, optionally only running ones.
    ///
    /// # Errors
    /// Returns [`LegacyError::Database`] on store failures.
    pub async fn list(&self, running_only: bool) -> Result<Vec<MigrationJob>, LegacyError> {
        let query = if running_only {
            "SELECT * FROM migration_job WHERE status = 'running' \
             ORDER BY started_at DESC LIMIT $limit"
        } else {
            "SELECT * FROM migration_job ORDER BY started_at DESC LIMIT $limit"
        };

        let limit = i64::try_from(DEFAULT_LIST_LIMIT).unwrap_or(i64::MAX);
        let records =
            self.db.query(query).bind(("limit", limit)).await?.take::<Vec<JobRecord>>(0)?;
        records.into_iter().map(JobRecord::into_job).collect()
    }
}
