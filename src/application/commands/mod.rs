//! 应用层 - 命令
//!
//! 单一用例：名字 → 故事 → 音频

mod generate_commands;

pub mod handlers;

pub use generate_commands::*;
