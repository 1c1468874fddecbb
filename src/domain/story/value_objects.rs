//! Story Context - Value Objects

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

use super::StoryError;

/// 孩子的名字
///
/// 不变量: 去除首尾空白后非空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildName(String);

impl ChildName {
    pub fn new(raw: &str) -> Result<Self, StoryError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(StoryError::EmptyChildName);
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChildName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 长度度量方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthMetric {
    /// 按空白分隔的单词数
    #[default]
    Words,
    /// 按 Unicode 字符数
    #[serde(alias = "characters")]
    Chars,
}

impl LengthMetric {
    pub fn measure(&self, text: &str) -> usize {
        match self {
            Self::Words => text.split_whitespace().count(),
            Self::Chars => text.chars().count(),
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::Words => "words",
            Self::Chars => "characters",
        }
    }
}

/// 故事长度区间 [min, max]（闭区间）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    metric: LengthMetric,
    min: usize,
    max: usize,
}

impl LengthBounds {
    pub fn new(metric: LengthMetric, min: usize, max: usize) -> Result<Self, StoryError> {
        if min > max {
            return Err(StoryError::InvalidBounds(format!(
                "minimum {} exceeds maximum {}",
                min, max
            )));
        }
        Ok(Self { metric, min, max })
    }

    pub fn metric(&self) -> LengthMetric {
        self.metric
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// 检查文本长度，返回度量值
    pub fn check(&self, text: &str) -> Result<usize, StoryError> {
        let observed = self.metric.measure(text);
        let unit = self.metric.unit();

        if observed < self.min {
            return Err(StoryError::TooShort {
                observed,
                min: self.min,
                unit,
            });
        }
        if observed > self.max {
            return Err(StoryError::TooLong {
                observed,
                max: self.max,
                unit,
            });
        }
        Ok(observed)
    }
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self {
            metric: LengthMetric::Words,
            min: 450,
            max: 700,
        }
    }
}

/// 经过长度校验的故事文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedStory {
    text: String,
    length: usize,
}

impl GeneratedStory {
    /// 去除首尾空白后按区间校验
    pub fn validated(raw: &str, bounds: &LengthBounds) -> Result<Self, StoryError> {
        let text = raw.trim();
        let length = bounds.check(text)?;
        Ok(Self {
            text: text.to_string(),
            length,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 校验时得到的度量值
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// 合成音频，内部结构不做解析
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioPayload {
    bytes: Vec<u8>,
}

impl AudioPayload {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// 按交付顺序拼接所有分块
    pub fn from_chunks<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        let mut payload = Self::default();
        for chunk in chunks {
            payload.append(chunk.as_ref());
        }
        payload
    }

    pub fn append(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 标准 base64（带填充）
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["sleepy"; n].join(" ")
    }

    #[test]
    fn test_child_name_is_trimmed() {
        let name = ChildName::new("  Maya \n").unwrap();
        assert_eq!(name.as_str(), "Maya");
    }

    #[test]
    fn test_child_name_rejects_blank() {
        assert_eq!(ChildName::new(""), Err(StoryError::EmptyChildName));
        assert_eq!(ChildName::new(" \t\n "), Err(StoryError::EmptyChildName));
    }

    #[test]
    fn test_word_metric_ignores_extra_whitespace() {
        assert_eq!(LengthMetric::Words.measure("  one two\n\nthree\tfour "), 4);
        assert_eq!(LengthMetric::Words.measure(""), 0);
    }

    #[test]
    fn test_char_metric_counts_unicode_scalars() {
        assert_eq!(LengthMetric::Chars.measure("día"), 3);
    }

    #[test]
    fn test_bounds_reject_inverted_range() {
        assert!(LengthBounds::new(LengthMetric::Words, 10, 5).is_err());
        assert!(LengthBounds::new(LengthMetric::Words, 5, 5).is_ok());
    }

    #[test]
    fn test_story_within_bounds_is_accepted() {
        let bounds = LengthBounds::default();
        let story = GeneratedStory::validated(&format!("\n  {}  \n", words(500)), &bounds).unwrap();
        assert_eq!(story.length(), 500);
        assert!(!story.text().starts_with(char::is_whitespace));
        assert!(!story.text().ends_with(char::is_whitespace));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let bounds = LengthBounds::default();
        assert!(GeneratedStory::validated(&words(450), &bounds).is_ok());
        assert!(GeneratedStory::validated(&words(700), &bounds).is_ok());
    }

    #[test]
    fn test_short_story_is_rejected() {
        let bounds = LengthBounds::default();
        let err = GeneratedStory::validated(&words(50), &bounds).unwrap_err();
        assert_eq!(
            err,
            StoryError::TooShort {
                observed: 50,
                min: 450,
                unit: "words"
            }
        );
        assert_eq!(
            err.to_string(),
            "Generated story is too short (50 words, minimum 450)"
        );
    }

    #[test]
    fn test_long_story_is_rejected() {
        let bounds = LengthBounds::default();
        let err = GeneratedStory::validated(&words(701), &bounds).unwrap_err();
        assert!(matches!(
            err,
            StoryError::TooLong {
                observed: 701,
                max: 700,
                ..
            }
        ));
    }

    #[test]
    fn test_char_bounds() {
        let bounds = LengthBounds::new(LengthMetric::Chars, 3, 5).unwrap();
        assert!(GeneratedStory::validated("abcd", &bounds).is_ok());
        let err = GeneratedStory::validated("abcdef", &bounds).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Generated story is too long (6 characters, maximum 5)"
        );
    }

    #[test]
    fn test_audio_chunks_keep_delivery_order() {
        let payload = AudioPayload::from_chunks([b"AA".as_slice(), b"B", b"CCC"]);
        assert_eq!(payload.as_bytes(), b"AABCCC");
        assert_eq!(payload.len(), 6);
    }

    #[test]
    fn test_audio_base64_decodes_to_original_bytes() {
        let bytes: Vec<u8> = (0..=255).collect();
        let payload = AudioPayload::new(bytes.clone());
        let decoded = STANDARD.decode(payload.to_base64()).unwrap();
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn test_empty_audio_encodes_to_empty_string() {
        assert_eq!(AudioPayload::default().to_base64(), "");
    }
}
