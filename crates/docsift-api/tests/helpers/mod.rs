//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p docsift-api`.

pub mod engine;
pub mod fixtures;
pub mod storage;

use axum_test::TestServer;
use docsift_api::setup::{routes, services};
use docsift_api::AppState;
use docsift_core::Config;
use docsift_services::{ConversionGateway, ConverterSlot};
use docsift_storage::{LocalUploadStore, UploadStorage};
use engine::MockEngine;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use storage::UndeletableStore;
use tempfile::TempDir;

pub const TEST_API_KEY: &str = "test-api-key-0123456789";

/// Test application: server plus the resources it owns.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    /// `None` when the converter slot was left empty
    pub engine: Option<Arc<MockEngine>>,
    /// Set when built with `undeletable_uploads`
    pub undeletable: Option<Arc<UndeletableStore>>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn engine(&self) -> &MockEngine {
        self.engine.as_deref().expect("test app has no engine")
    }

    /// Regular files currently in the upload directory.
    pub fn uploaded_files(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.state.config.upload_dir())
            .expect("upload directory exists")
            .map(|entry| entry.unwrap().path())
            .filter(|path| path.is_file())
            .collect()
    }
}

pub struct TestAppBuilder {
    vars: HashMap<String, String>,
    engine: Option<MockEngine>,
    undeletable: bool,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
            engine: Some(MockEngine::returning_markdown(1, "hello")),
            undeletable: false,
        }
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn api_key(self, key: &str) -> Self {
        self.env("API_KEY", key)
    }

    pub fn engine(mut self, engine: MockEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Leave the converter slot empty, as before engine startup completes.
    pub fn not_ready(mut self) -> Self {
        self.engine = None;
        self
    }

    /// Back the app with a store whose deletes always fail.
    pub fn undeletable_uploads(mut self) -> Self {
        self.undeletable = true;
        self
    }

    pub async fn build(self) -> TestApp {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let mut vars = self.vars;
        vars.entry("UPLOAD_DIR".to_string())
            .or_insert_with(|| temp_dir.path().join("uploads").display().to_string());
        vars.entry("TEMP_DIR".to_string())
            .or_insert_with(|| temp_dir.path().join("temp").display().to_string());
        vars.entry("CLEANUP_INTERVAL_SECS".to_string())
            .or_insert_with(|| "0".to_string());

        let config = Config::from_source(|key| vars.get(key).cloned()).expect("valid test config");
        config.validate().expect("valid test config");

        let engine = self.engine.map(Arc::new);
        let slot = match &engine {
            Some(engine) => ConverterSlot::with_gateway(ConversionGateway::new(
                engine.clone(),
                config.engine.max_concurrent_conversions,
            )),
            None => ConverterSlot::new(),
        };

        let undeletable = if self.undeletable {
            let local = LocalUploadStore::new(config.upload_dir())
                .await
                .expect("Failed to create upload store");
            Some(Arc::new(UndeletableStore::new(local)))
        } else {
            None
        };

        let state = match &undeletable {
            Some(store) => {
                let storage: Arc<dyn UploadStorage> = store.clone();
                services::initialize_services_with_storage(&config, slot, storage).await
            }
            None => services::initialize_services(&config, slot).await,
        }
        .expect("Failed to initialize services");
        let router = routes::setup_routes(&config, state.clone());
        let server = TestServer::new(router).expect("Failed to create test server");

        TestApp {
            server,
            state,
            engine,
            undeletable,
            _temp_dir: temp_dir,
        }
    }
}

pub async fn setup_test_app() -> TestApp {
    TestAppBuilder::new().build().await
}
