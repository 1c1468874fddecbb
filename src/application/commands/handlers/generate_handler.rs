//! Generate Audiobook Handler
//!
//! 线性流水线：校验输入 → 构建提示词 → 生成故事 → 校验长度 → 合成音频 → 编码响应
//! 任一阶段失败直接返回错误，不返回部分结果

use std::sync::Arc;

use uuid::Uuid;

use crate::application::commands::{GenerateAudiobook, GenerateAudiobookResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    collect_audio, GenerationRequest, PromptTemplatePort, SpeechSynthesizerPort,
    StoryGeneratorPort, SynthesisRequest,
};
use crate::domain::{ChildName, GeneratedStory, LengthBounds};

/// GenerateAudiobook Handler
pub struct GenerateAudiobookHandler {
    template_store: Arc<dyn PromptTemplatePort>,
    story_generator: Arc<dyn StoryGeneratorPort>,
    speech_synthesizer: Arc<dyn SpeechSynthesizerPort>,
    length_bounds: LengthBounds,
}

impl GenerateAudiobookHandler {
    pub fn new(
        template_store: Arc<dyn PromptTemplatePort>,
        story_generator: Arc<dyn StoryGeneratorPort>,
        speech_synthesizer: Arc<dyn SpeechSynthesizerPort>,
        length_bounds: LengthBounds,
    ) -> Self {
        Self {
            template_store,
            story_generator,
            speech_synthesizer,
            length_bounds,
        }
    }

    pub async fn handle(
        &self,
        command: GenerateAudiobook,
    ) -> Result<GenerateAudiobookResponse, ApplicationError> {
        let request_id = Uuid::new_v4();

        // 输入校验必须先于任何外部调用
        let child_name = ChildName::new(&command.child_name)?;

        // 凭据缺失时不读取模板，也不发起任何请求
        self.story_generator.ensure_configured()?;

        let template = self.template_store.load().await?;
        if !template.has_placeholder() {
            tracing::warn!(request_id = %request_id, "Prompt template has no name placeholder");
        }
        let prompt = template.render(&child_name);

        tracing::debug!(request_id = %request_id, child_name = %child_name, "Prompt built");
        tracing::info!(
            request_id = %request_id,
            prompt_len = prompt.len(),
            "Generating story"
        );

        let raw = self
            .story_generator
            .generate(GenerationRequest { prompt })
            .await?;

        let story = GeneratedStory::validated(&raw, &self.length_bounds).map_err(|e| {
            tracing::warn!(request_id = %request_id, error = %e, "Story rejected");
            e
        })?;

        tracing::info!(
            request_id = %request_id,
            length = story.length(),
            unit = self.length_bounds.metric().unit(),
            "Story accepted, synthesizing audio"
        );

        let stream = self
            .speech_synthesizer
            .synthesize(SynthesisRequest {
                text: story.text().to_string(),
            })
            .await?;
        let audio = collect_audio(stream).await?;

        tracing::info!(
            request_id = %request_id,
            audio_size = audio.len(),
            "Audiobook generated"
        );

        Ok(GenerateAudiobookResponse::encode(story, &audio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    use crate::application::ports::{GenerationError, SynthesisError, TemplateError};
    use crate::domain::{LengthMetric, PromptTemplate};
    use crate::infrastructure::adapters::{
        FakeSpeechSynthesizer, FakeStoryGenerator, FileTemplateStore, GeminiClientConfig,
        GeminiStoryGenerator, StaticTemplateStore,
    };

    const TEMPLATE: &str = "Once upon a time, {{CHILD_NAME}} ...";

    fn words(n: usize) -> String {
        vec!["moon"; n].join(" ")
    }

    struct Fixture {
        generator: Arc<FakeStoryGenerator>,
        synthesizer: Arc<FakeSpeechSynthesizer>,
        handler: GenerateAudiobookHandler,
    }

    fn fixture(generator: FakeStoryGenerator, synthesizer: FakeSpeechSynthesizer) -> Fixture {
        let generator = Arc::new(generator);
        let synthesizer = Arc::new(synthesizer);
        let handler = GenerateAudiobookHandler::new(
            Arc::new(StaticTemplateStore::new(PromptTemplate::new(TEMPLATE))),
            generator.clone(),
            synthesizer.clone(),
            LengthBounds::default(),
        );
        Fixture {
            generator,
            synthesizer,
            handler,
        }
    }

    fn command(name: &str) -> GenerateAudiobook {
        GenerateAudiobook {
            child_name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_pipeline_success() {
        let f = fixture(
            FakeStoryGenerator::new(format!("  {}\n", words(500))),
            FakeSpeechSynthesizer::new(vec![b"ID3".to_vec(), b"-frame-".to_vec(), b"end".to_vec()]),
        );

        let response = f.handler.handle(command("  Maya ")).await.unwrap();

        assert_eq!(response.story_text, words(500));
        assert_eq!(
            STANDARD.decode(&response.audio_base64).unwrap(),
            b"ID3-frame-end".to_vec()
        );
        assert_eq!(
            f.generator.last_prompt().as_deref(),
            Some("Once upon a time, Maya ...")
        );
        assert_eq!(f.generator.call_count(), 1);
        assert_eq!(f.synthesizer.call_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_name_makes_no_external_calls() {
        let f = fixture(
            FakeStoryGenerator::new(words(500)),
            FakeSpeechSynthesizer::new(vec![b"x".to_vec()]),
        );

        for name in ["", "   ", "\t\n"] {
            let err = f.handler.handle(command(name)).await.unwrap_err();
            assert!(matches!(err, ApplicationError::ValidationError(_)));
        }
        assert_eq!(f.generator.call_count(), 0);
        assert_eq!(f.synthesizer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_short_story_skips_synthesis() {
        let f = fixture(
            FakeStoryGenerator::new(words(50)),
            FakeSpeechSynthesizer::new(vec![b"x".to_vec()]),
        );

        let err = f.handler.handle(command("Maya")).await.unwrap_err();

        assert!(matches!(err, ApplicationError::GenerationOutOfRange(_)));
        assert_eq!(
            err.to_string(),
            "Generated story is too short (50 words, minimum 450)"
        );
        assert_eq!(f.synthesizer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_long_story_skips_synthesis() {
        let f = fixture(
            FakeStoryGenerator::new(words(900)),
            FakeSpeechSynthesizer::new(vec![b"x".to_vec()]),
        );

        let err = f.handler.handle(command("Maya")).await.unwrap_err();

        assert!(err.to_string().contains("too long (900 words, maximum 700)"));
        assert_eq!(f.synthesizer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_generation_key_is_configuration_error() {
        let f = fixture(
            FakeStoryGenerator::failing(GenerationError::NotConfigured(
                "Gemini API key not configured".to_string(),
            )),
            FakeSpeechSynthesizer::new(vec![b"x".to_vec()]),
        );

        let err = f.handler.handle(command("Maya")).await.unwrap_err();

        assert!(matches!(err, ApplicationError::ConfigurationError(_)));
        assert_eq!(err.to_string(), "Gemini API key not configured");
        assert_eq!(f.generator.call_count(), 0);
        assert_eq!(f.synthesizer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_generation_key_reported_before_template() {
        let dir = tempfile::tempdir().unwrap();
        let handler = GenerateAudiobookHandler::new(
            Arc::new(FileTemplateStore::new(dir.path().join("story_prompt.md"))),
            Arc::new(GeminiStoryGenerator::new(GeminiClientConfig::new(None)).unwrap()),
            Arc::new(FakeSpeechSynthesizer::new(vec![])),
            LengthBounds::default(),
        );

        let err = handler.handle(command("Maya")).await.unwrap_err();

        assert!(matches!(err, ApplicationError::ConfigurationError(_)));
        assert_eq!(err.to_string(), "Gemini API key not configured");
    }

    #[tokio::test]
    async fn test_blank_name_wins_over_missing_key() {
        let f = fixture(
            FakeStoryGenerator::failing(GenerationError::NotConfigured(
                "Gemini API key not configured".to_string(),
            )),
            FakeSpeechSynthesizer::new(vec![]),
        );

        let err = f.handler.handle(command("  ")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_generation_failure_is_wrapped() {
        let f = fixture(
            FakeStoryGenerator::failing(GenerationError::ServiceError("HTTP 429: quota".to_string())),
            FakeSpeechSynthesizer::new(vec![b"x".to_vec()]),
        );

        let err = f.handler.handle(command("Maya")).await.unwrap_err();

        assert!(matches!(err, ApplicationError::GenerationFailed(_)));
        assert_eq!(
            err.to_string(),
            "Story generation failed: Service error: HTTP 429: quota"
        );
    }

    #[tokio::test]
    async fn test_missing_synthesis_key_is_configuration_error() {
        let f = fixture(
            FakeStoryGenerator::new(words(500)),
            FakeSpeechSynthesizer::failing(SynthesisError::NotConfigured(
                "ElevenLabs API key not configured".to_string(),
            )),
        );

        let err = f.handler.handle(command("Maya")).await.unwrap_err();

        assert!(matches!(err, ApplicationError::ConfigurationError(_)));
        assert_eq!(f.synthesizer.call_count(), 1);
    }

    #[tokio::test]
    async fn test_synthesis_failure_is_wrapped() {
        let f = fixture(
            FakeStoryGenerator::new(words(500)),
            FakeSpeechSynthesizer::failing(SynthesisError::Timeout),
        );

        let err = f.handler.handle(command("Maya")).await.unwrap_err();

        assert!(matches!(err, ApplicationError::SynthesisFailed(_)));
        assert_eq!(err.to_string(), "Audio generation failed: Request timeout");
    }

    #[tokio::test]
    async fn test_template_failure_stops_pipeline() {
        let generator = Arc::new(FakeStoryGenerator::new(words(500)));
        let handler = GenerateAudiobookHandler::new(
            Arc::new(StaticTemplateStore::failing(TemplateError::NotFound(
                "story_prompt.md".to_string(),
            ))),
            generator.clone(),
            Arc::new(FakeSpeechSynthesizer::new(vec![])),
            LengthBounds::default(),
        );

        let err = handler.handle(command("Maya")).await.unwrap_err();

        assert!(matches!(err, ApplicationError::TemplateError(_)));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_char_metric_bounds() {
        let generator = Arc::new(FakeStoryGenerator::new("abcdefghij"));
        let handler = GenerateAudiobookHandler::new(
            Arc::new(StaticTemplateStore::new(PromptTemplate::new(TEMPLATE))),
            generator,
            Arc::new(FakeSpeechSynthesizer::new(vec![b"a".to_vec()])),
            LengthBounds::new(LengthMetric::Chars, 5, 20).unwrap(),
        );

        let response = handler.handle(command("Maya")).await.unwrap();
        assert_eq!(response.story_text, "abcdefghij");
        assert_eq!(response.audio_base64, "YQ==");
    }
}
