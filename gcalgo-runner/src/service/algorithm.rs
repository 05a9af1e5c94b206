//! Algorithm runner
//!
//! Drives one algorithm run from start to finish:
//! 1. Upload the input files as a case
//! 2. Wait for the image import, polling the upload session
//! 3. Wait for the algorithm job, polling the job list
//! 4. Download the resulting mask
//!
//! Every step is awaited in order. Transient transport errors during polling
//! only consume a retry; any other failure ends the run.

use gcalgo_core::domain::job::AlgorithmJob;
use gcalgo_core::dto::job::JobQuery;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::RunnerConfig;
use crate::context::JobContext;
use crate::error::{Phase, Result, RunError};
use crate::repository::AlgorithmRepository;
use crate::retry::ThrottledRetries;
use crate::service::download::{MASK_EXTENSION, download_results, ensure_mask_extension};

/// Summary of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub algorithm: String,
    pub session_id: Uuid,
    pub image_id: Uuid,
    pub job_id: Uuid,
    /// Remote run time in seconds, when reported
    pub job_duration_secs: Option<i64>,
    /// Where the mask was written, `None` if the job produced none
    pub output: Option<PathBuf>,
}

/// Runs a single grand-challenge algorithm on local files
pub struct AlgorithmRunner {
    repository: Arc<dyn AlgorithmRepository>,
    context: JobContext,
    retries: ThrottledRetries,
    config: RunnerConfig,
}

impl AlgorithmRunner {
    /// Resolves the algorithm and prepares a runner
    ///
    /// Performs exactly one lookup, without retries.
    ///
    /// # Errors
    /// `RunError::InvalidAlgorithm` if the slug matches nothing
    pub async fn connect(
        repository: Arc<dyn AlgorithmRepository>,
        algorithm: &str,
        config: RunnerConfig,
    ) -> Result<Self> {
        let found = repository
            .find_algorithm(algorithm)
            .await?
            .ok_or_else(|| RunError::InvalidAlgorithm(algorithm.to_string()))?;

        let context = JobContext::from_algorithm(&found, config.default_headstart);
        info!(
            "Resolved algorithm '{}' to {} (headstart {:?})",
            context.algorithm_slug, context.algorithm_id, context.headstart
        );

        Ok(Self {
            repository,
            context,
            retries: config.retries(),
            config,
        })
    }

    pub fn context(&self) -> &JobContext {
        &self.context
    }

    /// Uploads `input_files`, waits for the job and saves the mask to `output_file`
    pub async fn run(&self, input_files: &[PathBuf], output_file: &Path) -> Result<RunReport> {
        ensure_mask_extension(output_file)?;

        let algorithm = &self.context.algorithm_slug;

        info!("Uploading to grand-challenge.org to run \"{}\"", algorithm);
        let session = self
            .repository
            .upload_cases(input_files, algorithm)
            .await?;

        info!(
            "Waiting for image import to finish for algorithm \"{}\"",
            algorithm
        );
        tokio::time::sleep(self.config.import_headstart).await;
        let image_id = self.wait_for_import(session.pk).await?;

        info!("Waiting for results of algorithm \"{}\"", algorithm);
        tokio::time::sleep(self.context.headstart).await;
        let job = self.wait_for_job(image_id).await?;

        info!("Downloading results of algorithm \"{}\"", algorithm);
        let output = download_results(self.repository.as_ref(), &job.outputs, output_file).await?;

        if output.is_none() {
            if self.config.require_output {
                return Err(RunError::NoMaskProduced {
                    algorithm: algorithm.clone(),
                    expected: MASK_EXTENSION,
                });
            }
            warn!("Job {} finished without a mask output", job.pk);
        }

        Ok(RunReport {
            algorithm: algorithm.clone(),
            session_id: session.pk,
            image_id,
            job_id: job.pk,
            job_duration_secs: job.duration().map(|d| d.num_seconds()),
            output,
        })
    }

    /// Polls the upload session until the import yields an image
    async fn wait_for_import(&self, session_id: Uuid) -> Result<Uuid> {
        let mut attempts = self.retries.attempts();

        while let Some(attempt) = attempts.next_attempt().await {
            let session = match self.repository.get_upload_session(session_id).await {
                Ok(session) => session,
                Err(e) if e.is_transient() => {
                    warn!("Failed to fetch upload session {}: {}", session_id, e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if !session.status.is_terminal() {
                debug!("Import attempt {}: session {} is {}", attempt + 1, session_id, session.status);
                continue;
            }

            if session.status.is_rejected() {
                return Err(RunError::ImportRejected {
                    algorithm: self.context.algorithm_slug.clone(),
                    reason: session.error_message,
                });
            }

            let Some(image_url) = session.first_image() else {
                return Err(RunError::ImageNotImported);
            };

            match self.repository.get_image(image_url).await {
                Ok(image) => return Ok(image.pk),
                Err(e) if e.is_transient() => {
                    warn!("Failed to fetch imported image {}: {}", image_url, e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(RunError::Timeout {
            phase: Phase::Import,
            attempts: attempts.consumed(),
        })
    }

    /// Polls the job list until the job for `image_id` finishes
    async fn wait_for_job(&self, image_id: Uuid) -> Result<AlgorithmJob> {
        let query = JobQuery {
            algorithm: self.context.algorithm_id,
            input_image: image_id,
        };
        let mut attempts = self.retries.attempts();

        while let Some(attempt) = attempts.next_attempt().await {
            let job = match self.repository.find_jobs(&query, 1).await {
                Ok(jobs) => match jobs.into_iter().next() {
                    Some(job) => job,
                    None => {
                        debug!("Job attempt {}: no job for image {} yet", attempt + 1, image_id);
                        continue;
                    }
                },
                Err(e) if e.is_transient() => {
                    warn!("Failed to fetch jobs for image {}: {}", image_id, e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if !job.status.is_terminal() {
                debug!("Job attempt {}: job {} is {}", attempt + 1, job.pk, job.status);
                continue;
            }

            if job.status.is_rejected() {
                return Err(RunError::JobFailed {
                    algorithm: self.context.algorithm_slug.clone(),
                });
            }

            return Ok(job);
        }

        Err(RunError::Timeout {
            phase: Phase::Job,
            attempts: attempts.consumed(),
        })
    }
}
