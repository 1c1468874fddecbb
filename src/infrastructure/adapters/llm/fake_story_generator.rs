//! Fake Story Generator - 用于测试的文本生成客户端
//!
//! 返回固定文本或固定错误，并记录调用情况，不访问网络

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{GenerationError, GenerationRequest, StoryGeneratorPort};

/// Fake Story Generator
pub struct FakeStoryGenerator {
    outcome: Result<String, GenerationError>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl FakeStoryGenerator {
    /// 始终返回给定文本
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_outcome(Ok(text.into()))
    }

    /// 始终返回给定错误；NotConfigured 同时体现在 ensure_configured 上
    pub fn failing(error: GenerationError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<String, GenerationError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// 被调用次数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 最近一次收到的提示词
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|p| p.clone())
    }
}

#[async_trait]
impl StoryGeneratorPort for FakeStoryGenerator {
    fn ensure_configured(&self) -> Result<(), GenerationError> {
        match &self.outcome {
            Err(e @ GenerationError::NotConfigured(_)) => Err(e.clone()),
            _ => Ok(()),
        }
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(request.prompt);
        }

        tracing::debug!("FakeStoryGenerator: returning canned outcome");

        self.outcome.clone()
    }
}
