//! Background job runner
//!
//! Long operations (headless rasterization, proxy fetches) run on a worker
//! thread so the event loop keeps drawing. The runner holds at most one job;
//! the app polls it on every tick and observes completion exactly once.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Instant;

struct BackgroundJob<T> {
    receiver: Receiver<Result<T, String>>,
    start_instant: Instant,
}

/// Single-slot runner for a background computation producing `T`
pub struct JobRunner<T> {
    job: Option<BackgroundJob<T>>,
}

impl<T: Send + 'static> Default for JobRunner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> JobRunner<T> {
    pub fn new() -> Self {
        Self { job: None }
    }

    pub fn is_running(&self) -> bool {
        self.job.is_some()
    }

    /// Seconds since the current job started
    pub fn elapsed_secs(&self) -> f64 {
        self.job
            .as_ref()
            .map(|j| j.start_instant.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Spawn `work` on a worker thread. Any previous job is dropped; its
    /// thread finishes into a closed channel.
    pub fn spawn<F>(&mut self, work: F)
    where
        F: FnOnce() -> Result<T, String> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let _ = tx.send(work());
        });

        self.job = Some(BackgroundJob {
            receiver: rx,
            start_instant: Instant::now(),
        });
    }

    /// Non-blocking completion check; returns the outcome once, then the
    /// runner is empty again.
    pub fn poll(&mut self) -> Option<Result<T, String>> {
        let outcome = match &self.job {
            Some(job) => match job.receiver.try_recv() {
                Ok(result) => Some(result),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    Some(Err("worker thread exited unexpectedly".to_string()))
                }
            },
            None => None,
        };

        if outcome.is_some() {
            self.job = None;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn poll_until<T: Send + 'static>(runner: &mut JobRunner<T>) -> Result<T, String> {
        for _ in 0..200 {
            if let Some(outcome) = runner.poll() {
                return outcome;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("job did not complete in time");
    }

    #[test]
    fn completion_is_observed_once() {
        let mut runner: JobRunner<u32> = JobRunner::new();
        assert!(!runner.is_running());
        assert!(runner.poll().is_none());

        runner.spawn(|| Ok(7));
        assert!(runner.is_running());

        assert_eq!(poll_until(&mut runner), Ok(7));
        assert!(!runner.is_running());
        assert!(runner.poll().is_none());
    }

    #[test]
    fn errors_come_back_as_messages() {
        let mut runner: JobRunner<u32> = JobRunner::new();
        runner.spawn(|| Err("nope".to_string()));
        assert_eq!(poll_until(&mut runner), Err("nope".to_string()));
    }

    #[test]
    fn panicking_worker_reports_failure() {
        let mut runner: JobRunner<u32> = JobRunner::new();
        runner.spawn(|| panic!("boom"));
        assert!(poll_until(&mut runner).is_err());
    }
}
