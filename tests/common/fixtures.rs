//! Test fixtures and data factories

use super::fakes::{FakeRoster, MemoryStore, RecordingNotifier, ScriptedRenderer};
use certforge::core::batch::{BatchCoordinator, BatchSettings};
use certforge::core::catalog::{InMemoryTrainingCatalog, TrainingCatalog};
use certforge::core::models::{BatchHandle, GenerationRequest, NewTraining, TemplateFile};
use certforge::utils::error::Result;
use certforge::utils::error::recovery::RetryConfig;
use std::sync::Arc;
use std::time::Duration;

/// A minimal `.pptx` lookalike: ZIP magic plus filler
pub fn pptx_template() -> TemplateFile {
    TemplateFile::new("certificado.pptx", b"PK\x03\x04 certificate slides".to_vec())
}

pub fn generation_request(training_id: &str) -> GenerationRequest {
    GenerationRequest {
        template: pptx_template(),
        training_id: training_id.to_string(),
        completion_date: "2024-03-15".to_string(),
        location: "Auditório Central".to_string(),
        city: "São Paulo".to_string(),
        roster_reference: "https://docs.google.com/spreadsheets/d/1AbCdEfGhIjKlMnOpQrStUvWxYz/edit"
            .to_string(),
    }
}

/// Default settings with millisecond backoff and no jitter
pub fn fast_settings() -> BatchSettings {
    BatchSettings {
        retry: RetryConfig {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            backoff_multiplier: 2.0,
            jitter: false,
        },
        render_timeout: Duration::from_secs(5),
        store_timeout: Duration::from_secs(5),
        ..BatchSettings::default()
    }
}

/// A coordinator wired to in-process collaborators
pub struct Harness {
    pub catalog: Arc<InMemoryTrainingCatalog>,
    pub roster: Arc<FakeRoster>,
    pub renderer: Arc<ScriptedRenderer>,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub coordinator: BatchCoordinator,
    /// "Treinamento de Segurança do Trabalho", 8 hours
    pub training_id: String,
}

impl Harness {
    pub async fn new(roster: FakeRoster, renderer: ScriptedRenderer) -> Self {
        Self::builder(roster, renderer).build().await
    }

    pub fn builder(roster: FakeRoster, renderer: ScriptedRenderer) -> HarnessBuilder {
        HarnessBuilder {
            roster,
            renderer,
            store: MemoryStore::new(),
            notifier: RecordingNotifier::new(),
            settings: fast_settings(),
        }
    }

    /// Submit the standard request for the seeded training
    pub async fn submit(&self) -> Result<BatchHandle> {
        self.coordinator
            .submit_batch(generation_request(&self.training_id))
            .await
    }
}

pub struct HarnessBuilder {
    roster: FakeRoster,
    renderer: ScriptedRenderer,
    store: MemoryStore,
    notifier: RecordingNotifier,
    settings: BatchSettings,
}

impl HarnessBuilder {
    pub fn store(mut self, store: MemoryStore) -> Self {
        self.store = store;
        self
    }

    pub fn notifier(mut self, notifier: RecordingNotifier) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn settings(mut self, settings: BatchSettings) -> Self {
        self.settings = settings;
        self
    }

    pub async fn build(self) -> Harness {
        let catalog = Arc::new(InMemoryTrainingCatalog::new());
        let training = catalog
            .create(NewTraining {
                name: "Treinamento de Segurança do Trabalho".to_string(),
                workload: 8,
            })
            .await
            .expect("seed training");

        let roster = Arc::new(self.roster);
        let renderer = Arc::new(self.renderer);
        let store = Arc::new(self.store);
        let notifier = Arc::new(self.notifier);

        let coordinator = BatchCoordinator::new(
            catalog.clone(),
            roster.clone(),
            renderer.clone(),
            store.clone(),
            notifier.clone(),
            self.settings,
        );

        Harness {
            catalog,
            roster,
            renderer,
            store,
            notifier,
            coordinator,
            training_id: training.id,
        }
    }
}
