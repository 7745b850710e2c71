//! In-memory backends for driving the runner end to end.

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use todo_tracker::extract::display_path;
use todo_tracker::{
    AuthorIdentity, IssueEdit, IssueState, IssueTracker, Provenance, ProvenanceError,
    RenderedIssue, RunnerConfig, TrackedIssue, TrackerError, VersionControl,
};

pub const HEAD: &str = "0123456789abcdef0123456789abcdef01234567";

pub fn fixture_config() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/todo-tracker.toml")
}

pub fn runner_config(root: &Path, dry_run: bool) -> RunnerConfig {
    RunnerConfig::new(
        root.to_path_buf(),
        "git@github.com:acme/widgets.git".to_string(),
        "token".to_string(),
        dry_run,
        2,
    )
}

pub fn write(root: &Path, path: &str, content: &str) {
    let path = root.join(path);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// A mutation received by [`FakeTracker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(String),
    Edit(u64),
    Close(u64),
}

#[derive(Debug, Default)]
struct TrackerState {
    issues: Vec<TrackedIssue>,
    calls: Vec<Call>,
}

/// Issue tracker keeping issues in memory and recording every mutation.
#[derive(Debug, Clone, Default)]
pub struct FakeTracker {
    state: Arc<Mutex<TrackerState>>,
}

impl FakeTracker {
    pub fn boxed(&self) -> Box<dyn IssueTracker> {
        Box::new(self.clone())
    }

    pub fn seed(&self, title: &str, body: &str, labels: &[&str]) -> u64 {
        let mut state = self.state.lock().unwrap();
        let number = state.issues.len() as u64 + 1;
        state.issues.push(TrackedIssue {
            number,
            title: title.to_string(),
            body: Some(body.to_string()),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            state: IssueState::Open,
        });
        number
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn issue(&self, number: u64) -> TrackedIssue {
        self.state.lock().unwrap().issues[number as usize - 1].clone()
    }

    pub fn open_titles(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .issues
            .iter()
            .filter(|i| i.state == IssueState::Open)
            .map(|i| i.title.clone())
            .collect()
    }
}

#[async_trait]
impl IssueTracker for FakeTracker {
    async fn list_open_issues(&self, label: &str) -> Result<Vec<TrackedIssue>, TrackerError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .issues
            .iter()
            .filter(|i| i.state == IssueState::Open && i.has_label(label))
            .cloned()
            .collect())
    }

    async fn list_labels(&self) -> Result<Vec<String>, TrackerError> {
        Ok(vec!["tracker".to_string(), "refactor".to_string()])
    }

    async fn create_issue(&self, issue: &RenderedIssue) -> Result<u64, TrackerError> {
        let mut state = self.state.lock().unwrap();
        let number = state.issues.len() as u64 + 1;
        state.issues.push(TrackedIssue {
            number,
            title: issue.title.clone(),
            body: Some(issue.body.clone()),
            labels: issue.labels.clone(),
            state: IssueState::Open,
        });
        state.calls.push(Call::Create(issue.title.clone()));
        Ok(number)
    }

    async fn edit_issue(&self, number: u64, edit: &IssueEdit) -> Result<(), TrackerError> {
        let mut state = self.state.lock().unwrap();
        let Some(issue) = state.issues.iter_mut().find(|i| i.number == number) else {
            return Err(TrackerError::Remote {
                message: format!("no issue #{number}"),
            });
        };

        if let Some(title) = &edit.title {
            issue.title = title.clone();
        }
        if let Some(body) = &edit.body {
            issue.body = Some(body.clone());
        }
        if let Some(labels) = &edit.labels {
            issue.labels = labels.clone();
        }
        let call = match edit.state {
            Some(new_state) => {
                issue.state = new_state;
                Call::Close(number)
            }
            None => Call::Edit(number),
        };
        state.calls.push(call);
        Ok(())
    }
}

/// History where every line was committed by the same author, in a commit
/// named after the file, except the `uncommitted` (file, line) pairs.
#[derive(Debug, Clone)]
pub struct FakeVcs {
    pub branch: String,
    pub email: String,
    pub uncommitted: Vec<(String, usize)>,
}

impl Default for FakeVcs {
    fn default() -> Self {
        Self {
            branch: "master".to_string(),
            email: "<dev@example.com>".to_string(),
            uncommitted: Vec::new(),
        }
    }
}

impl FakeVcs {
    pub fn boxed(&self) -> Box<dyn VersionControl> {
        Box::new(self.clone())
    }
}

#[async_trait]
impl VersionControl for FakeVcs {
    async fn blame_line(&self, file: &Path, line: usize) -> Result<Provenance, ProvenanceError> {
        let file = display_path(file);
        if self.uncommitted.contains(&(file.clone(), line)) {
            return Err(ProvenanceError::Unavailable {
                file,
                line,
                reason: "not committed yet".to_string(),
            });
        }
        Ok(Provenance {
            commit_hash: format!("{:0>40}", file.len()),
            author: AuthorIdentity {
                name: "Dev".to_string(),
                email: self.email.clone(),
            },
            author_time: 1_600_000_000,
            committer_time: 1_600_000_100,
            summary: format!("Add {file}"),
        })
    }

    async fn head_commit(&self) -> Result<String, ProvenanceError> {
        Ok(HEAD.to_string())
    }

    async fn current_branch(&self) -> Result<String, ProvenanceError> {
        Ok(self.branch.clone())
    }
}
