//! In-memory oracle for tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Oracle, OracleError};

type Script = Box<dyn Fn(&str) -> Result<String, OracleError> + Send + Sync>;

/// Oracle answering from a closure over the prompt; records every call
pub struct ScriptedOracle {
    script: Script,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedOracle {
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(&str) -> Result<String, OracleError> + Send + Sync + 'static,
    {
        Self {
            script: Box::new(script),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with the same text
    pub fn constant(reply: &str) -> Self {
        let reply = reply.to_string();
        Self::new(move |_| Ok(reply.clone()))
    }

    /// Always fails with the same error
    pub fn failing(error: OracleError) -> Self {
        Self::new(move |_| Err(error.clone()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn generate(&self, prompt: &str, _model: &str) -> Result<String, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.script)(prompt)
    }
}
