// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use sitegen::providers::LlmProvider;
use sitegen::{ProviderError, ProviderErrorKind};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const VALID_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Riverside Bakery</title></head>
<body>
<header><h1>Riverside Bakery</h1></header>
<main><p>Sourdough, pastries and cakes baked fresh every morning.</p></main>
</body>
</html>"#;

/// Answers every call with the same scripted outcome and counts calls.
pub struct ScriptedProvider {
    name: String,
    reply: Result<String, ProviderErrorKind>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    pub fn ok(name: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            reply: Ok(text.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(name: &str, kind: ProviderErrorKind) -> Self {
        Self {
            name: name.to_string(),
            reply: Err(kind),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn generate(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(kind) => Err(ProviderError::new(self.name.clone(), *kind, "scripted failure")),
        }
    }
}

pub fn count(calls: &Arc<AtomicUsize>) -> usize {
    calls.load(Ordering::SeqCst)
}
