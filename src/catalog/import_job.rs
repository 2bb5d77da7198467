//! Batch import of converted records
//!
//! Serializes a record batch to a temporary JSON file, submits it as an
//! import job and polls the job until it reaches a terminal state.

use super::{CatalogError, CatalogResult, ImportJobBackend, Job};
use crate::config::ImportSettings;
use crate::models::ImportRecord;
use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// File name reported to the catalog for uploaded batches
pub const IMPORT_FILE_NAME: &str = "temp_import_data.json";

/// Default delay between job status polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Submits import batches and waits for them to finish
pub struct BatchImporter<'a, B: ImportJobBackend> {
    backend: &'a B,
    poll_interval: Duration,
    timeout: Option<Duration>,
}

impl<'a, B: ImportJobBackend> BatchImporter<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
        }
    }

    pub fn from_settings(backend: &'a B, settings: &ImportSettings) -> Self {
        Self::new(backend)
            .with_poll_interval(settings.poll_interval())
            .with_timeout(settings.timeout())
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Give up polling after `timeout`; `None` polls until the job ends
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Upload `records` and wait for the job to reach a terminal state
    ///
    /// The temporary file is removed when this returns, whatever the outcome.
    pub fn import(&self, records: &[ImportRecord]) -> CatalogResult<Job> {
        let mut file = tempfile::Builder::new()
            .prefix("temp_import_data")
            .suffix(".json")
            .tempfile()
            .map_err(|e| CatalogError::Io(format!("Failed to create import file: {}", e)))?;

        serde_json::to_writer(&mut file, records)
            .map_err(|e| CatalogError::Io(format!("Failed to write import file: {}", e)))?;
        file.flush()
            .map_err(|e| CatalogError::Io(format!("Failed to write import file: {}", e)))?;

        let job = self.backend.submit_import(file.path(), IMPORT_FILE_NAME)?;
        info!("Import data sent successfully: job {}", job.id);

        self.wait_for(job)
    }

    /// Poll `job` until it is terminal or the timeout elapses
    pub fn wait_for(&self, mut job: Job) -> CatalogResult<Job> {
        let started = Instant::now();
        while !job.state.is_terminal() {
            if let Some(timeout) = self.timeout
                && started.elapsed() >= timeout
            {
                warn!("Import job {} still {} after {:?}", job.id, job.state, timeout);
                return Err(CatalogError::JobTimeout {
                    job_id: job.id,
                    waited: started.elapsed(),
                });
            }
            thread::sleep(self.poll_interval);
            job = self.backend.get_job(&job.id)?;
            info!("Job state: {}", job.state);
        }
        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::JobState;
    use crate::models::DomainRef;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::path::{Path, PathBuf};
    use uuid::Uuid;

    struct ScriptedJobs {
        states: RefCell<VecDeque<JobState>>,
        uploaded: RefCell<Option<serde_json::Value>>,
        uploaded_path: RefCell<Option<PathBuf>>,
        polls: RefCell<usize>,
        reject_upload: bool,
    }

    impl ScriptedJobs {
        fn new(states: &[JobState]) -> Self {
            Self {
                states: RefCell::new(states.iter().copied().collect()),
                uploaded: RefCell::new(None),
                uploaded_path: RefCell::new(None),
                polls: RefCell::new(0),
                reject_upload: false,
            }
        }

        fn rejecting() -> Self {
            Self {
                reject_upload: true,
                ..Self::new(&[])
            }
        }

        fn uploaded_path(&self) -> PathBuf {
            self.uploaded_path.borrow().clone().unwrap()
        }

        fn next(&self) -> Job {
            let state = self
                .states
                .borrow_mut()
                .pop_front()
                .unwrap_or(JobState::Running);
            Job {
                id: Uuid::from_u128(9),
                state,
            }
        }
    }

    impl ImportJobBackend for ScriptedJobs {
        fn submit_import(&self, file: &Path, file_name: &str) -> CatalogResult<Job> {
            assert_eq!(file_name, IMPORT_FILE_NAME);
            *self.uploaded_path.borrow_mut() = Some(file.to_path_buf());
            if self.reject_upload {
                return Err(CatalogError::Api {
                    status: 400,
                    body: "invalid import file".to_string(),
                });
            }
            let content = std::fs::read_to_string(file).unwrap();
            *self.uploaded.borrow_mut() = Some(serde_json::from_str(&content).unwrap());
            Ok(self.next())
        }

        fn get_job(&self, id: &Uuid) -> CatalogResult<Job> {
            assert_eq!(*id, Uuid::from_u128(9));
            *self.polls.borrow_mut() += 1;
            Ok(self.next())
        }
    }

    fn sample_records() -> Vec<ImportRecord> {
        let domain = DomainRef::new("API Assets", "Data Community");
        vec![ImportRecord::asset("Pet Store", domain, "API", "Pets")]
    }

    #[test]
    fn test_import_polls_until_completed() {
        let backend = ScriptedJobs::new(&[JobState::Waiting, JobState::Running, JobState::Completed]);
        let importer = BatchImporter::new(&backend).with_poll_interval(Duration::ZERO);

        let job = importer.import(&sample_records()).unwrap();
        assert_eq!(job.state, JobState::Completed);
        assert_eq!(*backend.polls.borrow(), 2);

        let uploaded = backend.uploaded.borrow().clone().unwrap();
        assert_eq!(uploaded[0]["identifier"]["name"], "Pet Store");
        assert!(!backend.uploaded_path().exists());
    }

    #[test]
    fn test_rejected_upload_removes_import_file() {
        let backend = ScriptedJobs::rejecting();
        let importer = BatchImporter::new(&backend).with_poll_interval(Duration::ZERO);

        let result = importer.import(&sample_records());
        assert!(matches!(result, Err(CatalogError::Api { status: 400, .. })));
        assert_eq!(*backend.polls.borrow(), 0);
        assert!(!backend.uploaded_path().exists());
    }

    #[test]
    fn test_error_state_is_returned_not_raised() {
        let backend = ScriptedJobs::new(&[JobState::Running, JobState::Error]);
        let importer = BatchImporter::new(&backend).with_poll_interval(Duration::ZERO);
        let job = importer.import(&sample_records()).unwrap();
        assert_eq!(job.state, JobState::Error);
    }

    #[test]
    fn test_timeout_stops_polling() {
        let backend = ScriptedJobs::new(&[]);
        let importer = BatchImporter::new(&backend)
            .with_poll_interval(Duration::from_millis(5))
            .with_timeout(Some(Duration::from_millis(20)));

        let result = importer.import(&sample_records());
        assert!(matches!(result, Err(CatalogError::JobTimeout { .. })));
        assert!(!backend.uploaded_path().exists());
    }
}
