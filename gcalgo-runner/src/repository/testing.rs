//! Scripted in-memory repository for tests

use async_trait::async_trait;
use gcalgo_client::{ClientError, Result};
use gcalgo_core::domain::algorithm::Algorithm;
use gcalgo_core::domain::image::{Image, ImageFile, ImageType};
use gcalgo_core::domain::job::{AlgorithmJob, JobOutput};
use gcalgo_core::domain::status::Status;
use gcalgo_core::domain::upload::UploadSession;
use gcalgo_core::dto::job::JobQuery;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Mutex;
use uuid::Uuid;

use super::AlgorithmRepository;

/// Repository that replays queued responses and records every call
///
/// A queue that runs dry answers with a non-transient `NotFound` error so an
/// unexpected extra call fails the test instead of looping.
#[derive(Default)]
pub(crate) struct FakeRepository {
    algorithm: Option<Algorithm>,
    uploaded: Option<UploadSession>,
    sessions: Mutex<VecDeque<Result<UploadSession>>>,
    images: Mutex<HashMap<String, VecDeque<Result<Image>>>>,
    jobs: Mutex<VecDeque<Result<Vec<AlgorithmJob>>>>,
    files: HashMap<String, Vec<u8>>,
    calls: Mutex<Vec<String>>,
    queries: Mutex<Vec<(JobQuery, u32)>>,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn with_upload(mut self, session: UploadSession) -> Self {
        self.uploaded = Some(session);
        self
    }

    pub fn with_file(mut self, url: &str, content: &[u8]) -> Self {
        self.files.insert(url.to_string(), content.to_vec());
        self
    }

    pub fn push_session(self, response: Result<UploadSession>) -> Self {
        self.sessions.lock().unwrap().push_back(response);
        self
    }

    pub fn push_image(self, url: &str, response: Result<Image>) -> Self {
        self.images
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(response);
        self
    }

    pub fn push_jobs(self, response: Result<Vec<AlgorithmJob>>) -> Self {
        self.jobs.lock().unwrap().push_back(response);
        self
    }

    /// Names of the methods called so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls().iter().filter(|call| *call == method).count()
    }

    pub fn job_queries(&self) -> Vec<(JobQuery, u32)> {
        self.queries.lock().unwrap().clone()
    }

    fn record(&self, method: &str) {
        self.calls.lock().unwrap().push(method.to_string());
    }
}

fn exhausted(what: &str) -> ClientError {
    ClientError::NotFound(format!("no scripted response for {}", what))
}

#[async_trait]
impl AlgorithmRepository for FakeRepository {
    async fn find_algorithm(&self, _slug: &str) -> Result<Option<Algorithm>> {
        self.record("find_algorithm");
        Ok(self.algorithm.clone())
    }

    async fn upload_cases(&self, _files: &[PathBuf], _algorithm: &str) -> Result<UploadSession> {
        self.record("upload_cases");
        self.uploaded.clone().ok_or_else(|| exhausted("upload_cases"))
    }

    async fn get_upload_session(&self, _session_id: Uuid) -> Result<UploadSession> {
        self.record("get_upload_session");
        self.sessions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(exhausted("get_upload_session")))
    }

    async fn get_image(&self, url: &str) -> Result<Image> {
        self.record("get_image");
        self.images
            .lock()
            .unwrap()
            .get_mut(url)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(exhausted(url)))
    }

    async fn find_jobs(&self, query: &JobQuery, limit: u32) -> Result<Vec<AlgorithmJob>> {
        self.record("find_jobs");
        self.queries.lock().unwrap().push((*query, limit));
        self.jobs
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(exhausted("find_jobs")))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.record("fetch_bytes");
        self.files.get(url).cloned().ok_or_else(|| exhausted(url))
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub(crate) fn algorithm(slug: &str, average_duration: Option<f64>) -> Algorithm {
    Algorithm {
        pk: Uuid::new_v4(),
        slug: slug.to_string(),
        title: String::new(),
        api_url: None,
        average_duration,
    }
}

pub(crate) fn session(status: &str, image_set: &[&str]) -> UploadSession {
    UploadSession {
        pk: Uuid::nil(),
        status: Status::from(status),
        image_set: image_set.iter().map(|url| url.to_string()).collect(),
        error_message: None,
        api_url: None,
    }
}

pub(crate) fn image(pk: Uuid, files: &[(ImageType, &str)]) -> Image {
    Image {
        pk,
        name: String::new(),
        files: files
            .iter()
            .map(|(image_type, url)| ImageFile {
                image_type: image_type.clone(),
                file: url.to_string(),
            })
            .collect(),
    }
}

pub(crate) fn job(status: &str, output_images: &[Option<&str>]) -> AlgorithmJob {
    AlgorithmJob {
        pk: Uuid::new_v4(),
        status: Status::from(status),
        outputs: output_images
            .iter()
            .map(|image| JobOutput {
                image: image.map(str::to_string),
            })
            .collect(),
        started_at: None,
        completed_at: None,
        api_url: None,
    }
}

/// A real transport failure: connecting to a port nothing listens on
pub(crate) async fn transient_error() -> ClientError {
    let err = reqwest::Client::new()
        .get("http://127.0.0.1:1/")
        .send()
        .await
        .unwrap_err();
    let err = ClientError::from(err);
    assert!(err.is_transient());
    err
}
