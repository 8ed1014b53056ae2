//! Submit and clear actions of the form

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

use super::session::FormSession;
use crate::{
    error::{AppError, AppResult},
    services::submission::SubmissionService,
};

/// User-visible status line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    /// A submission step is running
    Working(String),
    Success(String),
    Error(String),
}

impl SubmitStatus {
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmitStatus::Idle => None,
            SubmitStatus::Working(m) | SubmitStatus::Success(m) | SubmitStatus::Error(m) => Some(m),
        }
    }
}

/// Outcome of a successful submission
#[derive(Debug)]
pub struct SubmitReceipt {
    pub document_id: String,
    /// Completes once the form has been cleared
    pub reset: JoinHandle<()>,
}

#[derive(Debug, Default)]
struct ControllerState {
    session: FormSession,
    status: SubmitStatus,
    submitting: bool,
    /// Bumped by every submit and reset; a pending delayed reset only fires if it still matches
    generation: u64,
}

/// Owns the form session and runs submissions against it
#[derive(Clone)]
pub struct FormController {
    state: Arc<Mutex<ControllerState>>,
    submission: SubmissionService,
    reset_delay: Duration,
}

impl FormController {
    pub fn new(session: FormSession, submission: SubmissionService, reset_delay: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(ControllerState {
                session,
                ..Default::default()
            })),
            submission,
            reset_delay,
        }
    }

    /// Apply one editor action to the session
    pub fn edit<R>(&self, f: impl FnOnce(&mut FormSession) -> R) -> R {
        f(&mut lock(&self.state).session)
    }

    pub fn read<R>(&self, f: impl FnOnce(&FormSession) -> R) -> R {
        f(&lock(&self.state).session)
    }

    pub fn status(&self) -> SubmitStatus {
        lock(&self.state).status.clone()
    }

    pub fn is_submitting(&self) -> bool {
        lock(&self.state).submitting
    }

    /// Clear the form; refused while a submission is running
    pub fn reset(&self) -> AppResult<()> {
        let mut state = lock(&self.state);
        if state.submitting {
            return Err(AppError::Busy);
        }
        state.generation += 1;
        state.session.reset();
        state.status = SubmitStatus::Idle;
        Ok(())
    }

    /// Submit the current form.
    ///
    /// On success the form is cleared after the reset delay. On failure the
    /// status carries the error message and the form is left as it was.
    pub async fn submit(&self) -> AppResult<SubmitReceipt> {
        let (request, in_flight) = {
            let mut state = lock(&self.state);
            if state.submitting {
                return Err(AppError::Busy);
            }
            state.submitting = true;
            state.generation += 1;
            state.status = SubmitStatus::Idle;
            (
                state.session.snapshot(),
                InFlight {
                    state: self.state.clone(),
                },
            )
        };

        let result = self
            .submission
            .submit(request, |message| {
                lock(&self.state).status = SubmitStatus::Working(message.to_string());
            })
            .await;
        drop(in_flight);

        match result {
            Ok(document_id) => {
                let generation = {
                    let mut state = lock(&self.state);
                    state.status = SubmitStatus::Success(format!(
                        "Equipment inventory submitted successfully! Document ID: {}",
                        document_id
                    ));
                    state.generation
                };
                Ok(SubmitReceipt {
                    document_id,
                    reset: self.schedule_reset(generation),
                })
            }
            Err(e) => {
                if e.is_local() {
                    tracing::warn!(error = %e, "Submission rejected");
                } else {
                    tracing::error!(error = %e, "Submission error");
                }
                lock(&self.state).status = SubmitStatus::Error(e.to_string());
                Err(e)
            }
        }
    }

    /// Clear the form after the reset delay unless it was submitted or reset again meanwhile
    fn schedule_reset(&self, generation: u64) -> JoinHandle<()> {
        let state = self.state.clone();
        let delay = self.reset_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = lock(&state);
            if state.generation != generation {
                tracing::debug!("Skipping form reset: the form was submitted or cleared since");
                return;
            }
            state.session.reset();
            state.status = SubmitStatus::Idle;
            tracing::debug!("Form cleared after successful submission");
        })
    }
}

/// Clears the submitting flag when the submission ends or is dropped
struct InFlight {
    state: Arc<Mutex<ControllerState>>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        lock(&self.state).submitting = false;
    }
}

fn lock(state: &Mutex<ControllerState>) -> MutexGuard<'_, ControllerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
