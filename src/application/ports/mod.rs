//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod speech_synthesizer;
mod story_generator;
mod template_store;

pub use speech_synthesizer::{
    collect_audio, AudioChunkStream, SpeechSynthesizerPort, SynthesisError, SynthesisRequest,
};
pub use story_generator::{GenerationError, GenerationRequest, StoryGeneratorPort};
pub use template_store::{PromptTemplatePort, TemplateError};
