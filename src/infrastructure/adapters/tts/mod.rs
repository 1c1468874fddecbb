//! TTS Adapter - 语音合成客户端实现

mod elevenlabs_client;
mod fake_speech_synthesizer;

pub use elevenlabs_client::{ElevenLabsClientConfig, ElevenLabsSynthesizer};
pub use fake_speech_synthesizer::FakeSpeechSynthesizer;
