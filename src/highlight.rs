use regex::Regex;

/// The single active highlight phrase shared by the feedback panel and the
/// translation display panels. Two states: idle (no phrase) and active.
/// Hover-enter on another phrase switches directly without passing through
/// idle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightState {
    active: Option<String>,
}

impl HighlightState {
    pub fn hover_enter(&mut self, phrase: &str) {
        self.active = Some(phrase.to_string());
    }

    pub fn hover_leave(&mut self) {
        self.active = None;
    }

    /// Chip-click behavior in the vocabulary panel: clicking the active
    /// phrase clears it, clicking another activates it.
    pub fn toggle(&mut self, phrase: &str) {
        if self.is_active(phrase) {
            self.active = None;
        } else {
            self.active = Some(phrase.to_string());
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_active(&self, phrase: &str) -> bool {
        self.active.as_deref() == Some(phrase)
    }
}

/// Per-view display state, owned by the enclosing view and passed by
/// reference into the rendering functions so the parsing core stays pure.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub highlight: HighlightState,
    pub show_hints: bool,
    pub selected_vocab: Option<usize>,
}

impl ViewState {
    pub fn reset(&mut self) {
        self.highlight.hover_leave();
        self.show_hints = false;
        self.selected_vocab = None;
    }
}

/// One span of panel text, flagged when it is an occurrence of the active
/// phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    pub text: String,
    pub highlighted: bool,
}

/// Splits `text` on non-overlapping occurrences of `phrase` so the caller
/// can mark each occurrence. Matching is exact-substring and
/// case-sensitive. The phrase is always regex-escaped before the pattern is
/// built; phrases come from model output and may contain anything.
pub fn split_highlight_segments(text: &str, phrase: &str) -> Vec<TextSegment> {
    if phrase.is_empty() {
        return vec![TextSegment {
            text: text.to_string(),
            highlighted: false,
        }];
    }
    let re = match Regex::new(&regex::escape(phrase)) {
        Ok(re) => re,
        Err(_) => {
            return vec![TextSegment {
                text: text.to_string(),
                highlighted: false,
            }]
        }
    };

    let mut segments = Vec::new();
    let mut cursor = 0usize;
    for m in re.find_iter(text) {
        if m.start() > cursor {
            segments.push(TextSegment {
                text: text[cursor..m.start()].to_string(),
                highlighted: false,
            });
        }
        segments.push(TextSegment {
            text: m.as_str().to_string(),
            highlighted: true,
        });
        cursor = m.end();
    }
    if cursor < text.len() || segments.is_empty() {
        segments.push(TextSegment {
            text: text[cursor..].to_string(),
            highlighted: false,
        });
    }
    segments
}

/// True when the panel text contains the phrase at least once, i.e. the
/// panel would mark something for it.
pub fn panel_reports_highlight(text: &str, phrase: &str) -> bool {
    split_highlight_segments(text, phrase)
        .iter()
        .any(|s| s.highlighted)
}

/// One span of feedback text, flagged when it was a double-quoted phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedSegment {
    pub text: String,
    pub quoted: bool,
}

/// Splits feedback text into alternating plain and quoted spans. Quoted
/// spans carry their content without the surrounding quotes; the renderer
/// re-adds them and wires hover handlers for phrases in the quote universe.
pub fn split_quoted_segments(text: &str) -> Vec<QuotedSegment> {
    let re = Regex::new("\"([^\"]+)\"").unwrap();
    let mut segments = Vec::new();
    let mut cursor = 0usize;
    for caps in re.captures_iter(text) {
        let whole = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };
        if whole.start() > cursor {
            segments.push(QuotedSegment {
                text: text[cursor..whole.start()].to_string(),
                quoted: false,
            });
        }
        segments.push(QuotedSegment {
            text: caps[1].to_string(),
            quoted: true,
        });
        cursor = whole.end();
    }
    if cursor < text.len() || segments.is_empty() {
        segments.push(QuotedSegment {
            text: text[cursor..].to_string(),
            quoted: false,
        });
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_transitions() {
        let mut state = HighlightState::default();
        assert_eq!(state.active(), None);
        state.hover_enter("경제 회복");
        assert!(state.is_active("경제 회복"));
        state.hover_enter("首要任务");
        assert!(state.is_active("首要任务"));
        state.hover_leave();
        assert_eq!(state.active(), None);
    }

    #[test]
    fn toggle_clears_only_the_active_phrase() {
        let mut state = HighlightState::default();
        state.toggle("경제");
        assert!(state.is_active("경제"));
        state.toggle("회복");
        assert!(state.is_active("회복"));
        state.toggle("회복");
        assert_eq!(state.active(), None);
    }

    #[test]
    fn highlight_marks_every_occurrence() {
        let segments = split_highlight_segments("경제 회복과 경제 성장", "경제");
        let marked: Vec<&str> = segments
            .iter()
            .filter(|s| s.highlighted)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(marked, vec!["경제", "경제"]);
        let rebuilt: String = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(rebuilt, "경제 회복과 경제 성장");
    }

    #[test]
    fn highlight_symmetry_across_panels() {
        let mut state = HighlightState::default();
        state.hover_enter("经济复苏");
        let feedback = "추천: \"经济复苏\"가 더 자연스러움";
        let original = "政府将经济复苏作为首要任务。";
        let phrase = state.active().unwrap();
        assert!(panel_reports_highlight(feedback, phrase));
        assert!(panel_reports_highlight(original, phrase));
        state.hover_leave();
        assert_eq!(state.active(), None);
    }

    #[test]
    fn regex_special_characters_are_matched_literally() {
        let segments = split_highlight_segments("비율 (50%) 표기", "(50%)");
        assert!(segments.iter().any(|s| s.highlighted && s.text == "(50%)"));
    }

    #[test]
    fn quoted_segments_alternate_and_drop_quotes() {
        let segments = split_quoted_segments("앞 \"경제 회복\" 뒤 \"首要\" 끝");
        assert_eq!(
            segments,
            vec![
                QuotedSegment { text: "앞 ".into(), quoted: false },
                QuotedSegment { text: "경제 회복".into(), quoted: true },
                QuotedSegment { text: " 뒤 ".into(), quoted: false },
                QuotedSegment { text: "首要".into(), quoted: true },
                QuotedSegment { text: " 끝".into(), quoted: false },
            ]
        );
    }

    #[test]
    fn unquoted_text_is_one_plain_segment() {
        let segments = split_quoted_segments("따옴표 없는 문장");
        assert_eq!(segments.len(), 1);
        assert!(!segments[0].quoted);
    }
}
