use serde::{Deserialize, Serialize};

/// The six named slots a feedback reply is split into. Any slot may be
/// empty; the empty string is the defined "absent" value.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionSet {
    pub summary: String,
    pub good: String,
    pub bad: String,
    pub recommend: String,
    pub learn: String,
    pub example: String,
}

impl SectionSet {
    /// Fallback shape when the six-way split fails: the whole reply
    /// becomes the summary and every other slot stays empty.
    pub fn degenerate(full_text: &str) -> Self {
        SectionSet {
            summary: full_text.to_string(),
            ..Default::default()
        }
    }

    pub fn is_all_empty(&self) -> bool {
        self.summary.is_empty()
            && self.good.is_empty()
            && self.bad.is_empty()
            && self.recommend.is_empty()
            && self.learn.is_empty()
            && self.example.is_empty()
    }

    /// Sections 1-5 in slot order. Section six has its own rendering path
    /// and is excluded from quote extraction.
    pub fn quoted_sections(&self) -> [&str; 5] {
        [
            &self.summary,
            &self.good,
            &self.bad,
            &self.recommend,
            &self.learn,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleItemKind {
    Expression,
    Original,
    Translation,
}

/// One classified bullet line inside an example group. `line_idx` is the
/// source line index, kept for stable render keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleItem {
    pub kind: ExampleItemKind,
    pub content: String,
    pub line_idx: usize,
}

/// One "example unit": the key-expression line plus the original/translation
/// example pairs that followed it. Numbered from 1 in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleGroup {
    pub number: usize,
    pub items: Vec<ExampleItem>,
}

/// Render plan for the sixth section, one entry per classified source line
/// (groups swallow the lines of their items).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExampleBlock {
    Group(ExampleGroup),
    General { content: String, line_idx: usize },
    Spacer { line_idx: usize },
    Paragraph { content: String, line_idx: usize },
}

/// Translation direction of an exercise.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    KoreanToChinese,
    ChineseToKorean,
}

impl Direction {
    pub fn pair_label(&self) -> &'static str {
        match self {
            Direction::KoreanToChinese => "한-중",
            Direction::ChineseToKorean => "중-한",
        }
    }

    pub fn source_lang(&self) -> &'static str {
        match self {
            Direction::KoreanToChinese => "한국어",
            Direction::ChineseToKorean => "중국어",
        }
    }

    pub fn target_lang(&self) -> &'static str {
        match self {
            Direction::KoreanToChinese => "중국어",
            Direction::ChineseToKorean => "한국어",
        }
    }
}

/// One vocabulary hint attached to a problem.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabHint {
    #[serde(default)]
    pub korean: String,
    #[serde(default)]
    pub chinese: String,
    #[serde(default)]
    pub pinyin: String,
    #[serde(default)]
    pub importance: String,
}

impl VocabHint {
    /// The side of the hint shown as a chip and used as the highlight key.
    pub fn display_word(&self, direction: Direction) -> &str {
        match direction {
            Direction::KoreanToChinese => &self.korean,
            Direction::ChineseToKorean => &self.chinese,
        }
    }
}

/// A translation exercise. The JSON keys follow the original problem data
/// set, which stores them in Korean.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TranslationProblem {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "한국어", default)]
    pub korean: String,
    #[serde(rename = "중국어", default, skip_serializing_if = "Option::is_none")]
    pub chinese: Option<String>,
    #[serde(rename = "난이도", default)]
    pub difficulty: String,
    #[serde(rename = "분야", default)]
    pub domain: String,
    #[serde(rename = "주요어휘", default)]
    pub vocab: Vec<VocabHint>,
}

impl TranslationProblem {
    /// Source text for the given direction. Problems without a Chinese
    /// variant fall back to the Korean text.
    pub fn source_text(&self, direction: Direction) -> &str {
        match direction {
            Direction::KoreanToChinese => &self.korean,
            Direction::ChineseToKorean => self.chinese.as_deref().unwrap_or(&self.korean),
        }
    }
}
