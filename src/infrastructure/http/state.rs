//! Application State
//!
//! 启动时构建一次，请求间只读共享

use std::sync::Arc;

use crate::application::{
    GenerateAudiobookHandler, PromptTemplatePort, SpeechSynthesizerPort, StoryGeneratorPort,
};
use crate::domain::LengthBounds;

/// 应用状态
pub struct AppState {
    pub generate_handler: GenerateAudiobookHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        template_store: Arc<dyn PromptTemplatePort>,
        story_generator: Arc<dyn StoryGeneratorPort>,
        speech_synthesizer: Arc<dyn SpeechSynthesizerPort>,
        length_bounds: LengthBounds,
    ) -> Self {
        Self {
            generate_handler: GenerateAudiobookHandler::new(
                template_store,
                story_generator,
                speech_synthesizer,
                length_bounds,
            ),
        }
    }
}
