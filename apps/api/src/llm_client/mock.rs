//! Scripted transport for analyzer and handler tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionTransport, LlmError};

enum Script {
    Reply(Option<String>),
    Fail { status: u16, message: String },
}

pub struct ScriptedTransport {
    script: Script,
    calls: AtomicUsize,
    prompts: Mutex<Vec<(String, String)>>,
}

impl ScriptedTransport {
    pub fn replying(text: &str) -> Self {
        Self::new(Script::Reply(Some(text.to_string())))
    }

    pub fn silent() -> Self {
        Self::new(Script::Reply(None))
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self::new(Script::Fail {
            status,
            message: message.to_string(),
        })
    }

    fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(system, user)` pairs in call order.
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }

    fn outcome(&self) -> Result<Option<String>, LlmError> {
        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Fail { status, message } => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

#[async_trait]
impl CompletionTransport for ScriptedTransport {
    async fn complete(&self, system: &str, user: &str) -> Result<Option<String>, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));
        self.outcome()
    }

    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        self.outcome().map(|_| vec!["scripted-model".to_string()])
    }
}
