//! Fake Speech Synthesizer - 用于测试的语音合成客户端
//!
//! 按给定顺序返回固定分块，不访问网络

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{stream, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{
    AudioChunkStream, SpeechSynthesizerPort, SynthesisError, SynthesisRequest,
};

/// Fake Speech Synthesizer
pub struct FakeSpeechSynthesizer {
    outcome: Result<Vec<Bytes>, SynthesisError>,
    calls: AtomicUsize,
}

impl FakeSpeechSynthesizer {
    /// 每次调用都按顺序返回这些分块
    pub fn new(chunks: Vec<Vec<u8>>) -> Self {
        Self {
            outcome: Ok(chunks.into_iter().map(Bytes::from).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    /// 始终返回给定错误
    pub fn failing(error: SynthesisError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// 被调用次数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizerPort for FakeSpeechSynthesizer {
    async fn synthesize(
        &self,
        request: SynthesisRequest,
    ) -> Result<AudioChunkStream, SynthesisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        tracing::debug!(
            text_len = request.text.len(),
            "FakeSpeechSynthesizer: returning canned chunks"
        );

        let chunks = self.outcome.clone()?;
        Ok(stream::iter(chunks.into_iter().map(Ok::<Bytes, SynthesisError>)).boxed())
    }
}
