//! In-process collaborators for batch tests
//!
//! Each fake records what it was asked to do so tests can assert on call
//! counts, argument values, and ordering.

use async_trait::async_trait;
use bytes::Bytes;
use certforge::BatchResult;
use certforge::core::models::{ExportFormat, TemplateFile};
use certforge::core::notify::{NotificationError, NotificationSink};
use certforge::core::renderer::{FieldValues, RenderError, TemplateRenderer};
use certforge::core::roster::{Roster, RosterError, RosterSource};
use certforge::storage::{ArtifactStore, StoreError};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::{Notify, Semaphore};

/// Roster source returning a fixed list or a fixed error
pub struct FakeRoster {
    outcome: Result<Vec<String>, RosterError>,
    requested: Mutex<Vec<String>>,
}

impl FakeRoster {
    pub fn names(names: &[&str]) -> Self {
        Self {
            outcome: Ok(names.iter().map(|n| n.to_string()).collect()),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: RosterError) -> Self {
        Self {
            outcome: Err(error),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// References passed to `fetch_roster`
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().clone()
    }
}

#[async_trait]
impl RosterSource for FakeRoster {
    async fn fetch_roster(&self, reference: &str) -> Result<Roster, RosterError> {
        self.requested.lock().push(reference.to_string());
        self.outcome.clone().map(Roster::from_names)
    }
}

/// Per-student renderer behavior
#[derive(Debug, Clone)]
pub enum Script {
    /// Fail the first `n` render calls for this student, then succeed
    FailTimes(usize, RenderError),
    /// Fail every call
    Always(RenderError),
    /// Panic inside the renderer
    Panic,
}

/// Renderer that follows per-student scripts and records every call
#[derive(Default)]
pub struct ScriptedRenderer {
    scripts: HashMap<String, Script>,
    calls: Mutex<HashMap<String, usize>>,
    seen: Mutex<Vec<(FieldValues, ExportFormat)>>,
    gate: Option<Arc<Semaphore>>,
    started: Arc<Notify>,
}

impl ScriptedRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, student: &str, script: Script) -> Self {
        self.scripts.insert(student.to_string(), script);
        self
    }

    /// Block every render until the returned semaphore receives permits
    pub fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.gate = Some(gate.clone());
        (self, gate)
    }

    /// Signalled each time a render call starts
    pub fn started(&self) -> Arc<Notify> {
        self.started.clone()
    }

    /// Render calls made for one student
    pub fn calls_for(&self, student: &str) -> usize {
        self.calls.lock().get(student).copied().unwrap_or(0)
    }

    /// Render calls made in total
    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }

    /// Field values and formats of every call, in call order
    pub fn seen(&self) -> Vec<(FieldValues, ExportFormat)> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl TemplateRenderer for ScriptedRenderer {
    async fn render(
        &self,
        _template: &TemplateFile,
        fields: &FieldValues,
        format: ExportFormat,
    ) -> Result<Bytes, RenderError> {
        fields.ensure_complete()?;

        let call = {
            let mut calls = self.calls.lock();
            let count = calls.entry(fields.student_name.clone()).or_insert(0);
            *count += 1;
            *count
        };
        self.seen.lock().push((fields.clone(), format));
        self.started.notify_one();

        if let Some(gate) = &self.gate {
            let _permit = gate.acquire().await;
        }

        match self.scripts.get(&fields.student_name) {
            Some(Script::FailTimes(n, error)) if call <= *n => Err(error.clone()),
            Some(Script::Always(error)) => Err(error.clone()),
            Some(Script::Panic) => panic!("renderer crashed on '{}'", fields.student_name),
            _ => Ok(Bytes::from(format!("{}:{}", format, fields.student_name))),
        }
    }
}

/// Store behavior for names containing a fragment
#[derive(Debug, Clone)]
pub enum StoreScript {
    /// Fail the first `n` matching store calls, then succeed
    FailTimes(usize, StoreError),
    /// Fail every matching call
    Always(StoreError),
}

/// Artifact store backed by a map
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, Bytes>>,
    scripts: Vec<(String, StoreScript)>,
    attempts: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every store whose name contains `fragment`
    pub fn rejecting(mut self, fragment: &str, error: StoreError) -> Self {
        self.scripts
            .push((fragment.to_string(), StoreScript::Always(error)));
        self
    }

    /// Fail the first `times` stores whose name contains `fragment`
    pub fn flaky(mut self, fragment: &str, times: usize, error: StoreError) -> Self {
        self.scripts
            .push((fragment.to_string(), StoreScript::FailTimes(times, error)));
        self
    }

    /// Store calls made for names containing `fragment`
    pub fn attempts_for(&self, fragment: &str) -> usize {
        self.attempts
            .lock()
            .iter()
            .filter(|name| name.contains(fragment))
            .count()
    }

    pub fn names(&self) -> Vec<String> {
        self.objects.lock().keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<Bytes> {
        self.objects.lock().get(name).cloned()
    }
}

#[async_trait]
impl ArtifactStore for MemoryStore {
    async fn store(&self, content: Bytes, suggested_name: &str) -> Result<String, StoreError> {
        self.attempts.lock().push(suggested_name.to_string());

        for (fragment, script) in &self.scripts {
            if !suggested_name.contains(fragment.as_str()) {
                continue;
            }
            match script {
                StoreScript::Always(error) => return Err(error.clone()),
                StoreScript::FailTimes(n, error) if self.attempts_for(fragment) <= *n => {
                    return Err(error.clone());
                }
                StoreScript::FailTimes(..) => {}
            }
        }

        self.objects
            .lock()
            .insert(suggested_name.to_string(), content);
        Ok(format!("memory://{}", suggested_name))
    }
}

/// Notification sink that keeps every delivered result
#[derive(Default)]
pub struct RecordingNotifier {
    delivered: Mutex<Vec<BatchResult>>,
    fail: bool,
    notified: Notify,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record deliveries but report every one as failed
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn delivered(&self) -> Vec<BatchResult> {
        self.delivered.lock().clone()
    }

    /// Wait until at least one result was delivered
    pub async fn wait_for_delivery(&self) {
        let notified = self.notified.notified();
        if !self.delivered.lock().is_empty() {
            return;
        }
        tokio::time::timeout(std::time::Duration::from_secs(5), notified)
            .await
            .expect("notification was not delivered");
    }
}

#[async_trait]
impl NotificationSink for RecordingNotifier {
    async fn notify(&self, result: &BatchResult) -> Result<(), NotificationError> {
        self.delivered.lock().push(result.clone());
        self.notified.notify_waiters();
        if self.fail {
            return Err(NotificationError::Delivery {
                url: "memory://hook".to_string(),
                message: "hook is down".to_string(),
            });
        }
        Ok(())
    }
}
