//! Test helpers: build AppState and router for integration tests.
//!
//! The completion backend is replaced by [`StubCompletion`], so no network access
//! or API key is needed. Run with `cargo test -p quizsmith-api`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use quizsmith_api::setup::routes;
use quizsmith_api::state::AppState;
use quizsmith_core::{BaseConfig, CompletionConfig, Config, LogFormat, QuizServiceConfig};
use quizsmith_services::CompletionProvider;
use tempfile::TempDir;

pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;
pub const STUB_QUIZ: &str = "1. What do plants convert light into?\n\
A) Sugar\nB) Salt\n\
2. Which pigment makes leaves green?\n\
A) Chlorophyll\nB) Melanin";

/// Completion backend that records prompts and returns a canned reply
pub struct StubCompletion {
    reply: Result<String, String>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl StubCompletion {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for StubCompletion {
    fn model_name(&self) -> &str {
        "stub"
    }

    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(anyhow::anyhow!("{}", message)),
        }
    }
}

/// Test application: server, completion stub, and the upload temp dir.
pub struct TestApp {
    pub server: TestServer,
    pub completion: Arc<StubCompletion>,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Number of files left behind in the upload temp dir
    pub fn leftover_uploads(&self) -> usize {
        std::fs::read_dir(self.temp_dir.path())
            .expect("Failed to read temp dir")
            .count()
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(StubCompletion::replying(STUB_QUIZ))
}

pub fn setup_test_app_with(completion: StubCompletion) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = create_test_config(&temp_dir);

    let completion = Arc::new(completion);
    let provider: Arc<dyn CompletionProvider> = completion.clone();
    let state = Arc::new(AppState::new(config.clone(), provider));

    let router = routes::setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        completion,
        temp_dir,
    }
}

fn create_test_config(temp_dir: &TempDir) -> Config {
    Config(Box::new(QuizServiceConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            log_format: LogFormat::Compact,
        },
        max_file_size_bytes: MAX_FILE_SIZE,
        allowed_extensions: vec!["pdf".to_string(), "docx".to_string()],
        prompt_context_chars: 6000,
        upload_temp_dir: Some(temp_dir.path().to_path_buf()),
        completion: CompletionConfig {
            api_key: "sk-test".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            model: "stub".to_string(),
            max_tokens: 1500,
            temperature: 0.7,
            timeout_secs: Some(1),
        },
    }))
}
