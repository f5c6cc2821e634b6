/// Notice shown when playback is requested and no synthesizer is installed.
pub const SPEECH_UNAVAILABLE_NOTICE: &str = "이 환경은 음성 합성을 지원하지 않습니다.";

/// A single playback request handed to the platform hook.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub lang: &'static str,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl SpeechRequest {
    /// Builds a request for a translated-example line, at the slowed-down
    /// rate used for study playback.
    pub fn for_example(text: &str) -> Self {
        SpeechRequest {
            text: text.to_string(),
            lang: speech_lang_for(text),
            rate: 0.8,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Platform speech hook. The GUI holds an optional implementation; when
/// none is present, playback requests surface [`SPEECH_UNAVAILABLE_NOTICE`]
/// instead of failing silently.
pub trait Synthesizer {
    fn speak(&mut self, request: &SpeechRequest) -> Result<(), String>;
}

/// True when the text contains at least one CJK unified ideograph
/// (U+4E00..=U+9FAF).
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(|c| ('\u{4E00}'..='\u{9FAF}').contains(&c))
}

/// Language tag for a translated-example line: text with no CJK ideographs
/// is assumed to be the Chinese target side, anything else is read as
/// Korean. Pinyin-only or punctuation-only fragments are misclassified by
/// this rule; the behavior is kept as the original app shipped it.
pub fn speech_lang_for(text: &str) -> &'static str {
    if !contains_cjk(text) {
        "zh-CN"
    } else {
        "ko-KR"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cjk_detection() {
        assert!(contains_cjk("政府将经济复苏作为首要任务。"));
        assert!(!contains_cjk("정부는 경제 회복을 최우선 과제로 삼고 있다."));
        assert!(!contains_cjk("jīng jì fù sū"));
    }

    #[test]
    fn lang_tag_heuristic_matches_shipped_behavior() {
        assert_eq!(speech_lang_for("경제 회복"), "zh-CN");
        assert_eq!(speech_lang_for("经济复苏"), "ko-KR");
    }

    #[test]
    fn example_request_uses_study_rate() {
        let req = SpeechRequest::for_example("经济复苏的速度比预期的要快。");
        assert_eq!(req.rate, 0.8);
        assert_eq!(req.lang, "ko-KR");
    }
}
