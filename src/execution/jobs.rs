use std::process::ExitStatus;

use crate::execution::process::ChildProcess;

#[derive(Debug)]
pub struct Job {
    pub id: usize,
    pub command_line: String,
    child: ChildProcess,
}

impl Job {
    pub fn pid(&self) -> u32 {
        self.child.id()
    }
}

/// A background job that has terminated and been reaped.
#[derive(Debug)]
pub struct FinishedJob {
    pub id: usize,
    pub command_line: String,
    pub status: ExitStatus,
}

/// Background children launched with `&`, kept until they are reaped.
#[derive(Debug)]
pub struct JobTable {
    jobs: Vec<Job>,
    next_id: usize,
}

impl Default for JobTable {
    fn default() -> Self {
        Self::new()
    }
}

impl JobTable {
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            next_id: 1,
        }
    }

    /// Register a child and return its job id.
    pub fn push(&mut self, child: ChildProcess, command_line: String) -> usize {
        // numbering restarts once every job is gone, as in bash
        if self.jobs.is_empty() {
            self.next_id = 1;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.jobs.push(Job {
            id,
            command_line,
            child,
        });
        id
    }

    /// Reap every job that has terminated, without blocking.
    ///
    /// A job whose status cannot be queried anymore (already reaped elsewhere) is dropped
    /// from the table silently.
    pub fn reap(&mut self) -> Vec<FinishedJob> {
        let mut finished = Vec::new();
        self.jobs.retain(|job| match job.child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                finished.push(FinishedJob {
                    id: job.id,
                    command_line: job.command_line.clone(),
                    status,
                });
                false
            }
            Err(_) => false,
        });
        finished
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
