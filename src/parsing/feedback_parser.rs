use crate::types::feedback::SectionSet;
use regex::Regex;

/// Rewrites every line-leading bullet glyph (●, •, *, -, with any leading
/// indentation) into the canonical `‧` marker. Everything else, including
/// line breaks, is preserved. Running it twice is a no-op.
pub fn normalize_bullets(text: &str) -> String {
    let re = Regex::new(r"(?m)^[ \t]*[●•*\-]").unwrap();
    re.replace_all(text, "‧").into_owned()
}

/// Splits normalized feedback text into the six named sections.
///
/// A section starts at a line beginning with `1`-`6` followed by `)`, `.`
/// or `-` and runs until the next such line or the end of the text. Matches
/// are assigned to the slots positionally; the numeric marker itself is
/// stripped. Fewer than six matches leave the remaining slots empty.
///
/// Models sometimes ignore the requested format entirely. If every slot
/// comes out empty, or the summary alone absorbs more than 80% of the
/// input's characters, the split is discarded and the whole reply becomes
/// the summary so the caller still has something coherent to show.
pub fn split_sections(text: &str) -> SectionSet {
    let marker_re = Regex::new(r"(?m)^[1-6][\)\.\-] ?").unwrap();
    let marks: Vec<regex::Match> = marker_re.find_iter(text).collect();

    let mut slots: [String; 6] = Default::default();
    for (i, m) in marks.iter().take(6).enumerate() {
        let body_end = marks.get(i + 1).map_or(text.len(), |next| next.start());
        slots[i] = text[m.end()..body_end].trim().to_string();
    }
    let [summary, good, bad, recommend, learn, example] = slots;
    let sections = SectionSet {
        summary,
        good,
        bad,
        recommend,
        learn,
        example,
    };

    let total_chars = text.chars().count();
    let summary_chars = sections.summary.chars().count();
    let summary_too_long = summary_chars as f64 > total_chars as f64 * 0.8;
    if sections.is_all_empty() || summary_too_long {
        return SectionSet::degenerate(text);
    }
    sections
}

/// Substrings found strictly between pairs of double quotes, in order of
/// appearance. Non-greedy, non-nested.
pub fn extract_quoted_phrases(text: &str) -> Vec<String> {
    let re = Regex::new("\"([^\"]+)\"").unwrap();
    re.captures_iter(text).map(|c| c[1].to_string()).collect()
}

/// The deduplicated union of quoted phrases across sections 1-5, first
/// appearance order preserved. This set is the universe of clickable
/// highlight candidates.
pub fn collect_quote_phrases(sections: &SectionSet) -> Vec<String> {
    let mut phrases: Vec<String> = Vec::new();
    for section in sections.quoted_sections() {
        for phrase in extract_quoted_phrases(section) {
            if !phrases.contains(&phrase) {
                phrases.push(phrase);
            }
        }
    }
    phrases
}

/// Recovers a 0-100 score from the summary section.
///
/// Tries `N/M` (optionally suffixed `점`) first, then a bare `N점`. No
/// explicit clamping: an unusual ratio like "150/100점" yields 150 and
/// callers are expected to tolerate it.
pub fn extract_score(summary: &str) -> i32 {
    let ratio_re = Regex::new(r"([0-9]{1,3}(?:\.[0-9])?)\s*/\s*([0-9]{1,3})(?:점)?").unwrap();
    if let Some(caps) = ratio_re.captures(summary) {
        let n: f64 = caps[1].parse().unwrap_or(0.0);
        let m: f64 = caps[2].parse().unwrap_or(0.0);
        return ((n / m) * 100.0).round() as i32;
    }
    let point_re = Regex::new(r"([0-9]{1,3}(?:\.[0-9])?)점").unwrap();
    if let Some(caps) = point_re.captures(summary) {
        let n: f64 = caps[1].parse().unwrap_or(0.0);
        return (n * 10.0).round() as i32;
    }
    0
}

/// Removes a duplicated section title from the start of a section body.
/// The model often repeats the title ("좋은 점:", "**학습 제안** 항목" and
/// similar) even though the panel already renders a heading for it.
pub fn strip_section_label(text: &str, title: &str) -> String {
    let pattern = format!(r"^(?:\*\*)?{}(?:\*\*)?(?: 항목)?:?", regex::escape(title));
    match Regex::new(&pattern) {
        Ok(re) => re.replace(text, "").trim().to_string(),
        Err(_) => text.trim().to_string(),
    }
}

/// Normalizes bullet spacing inside a section body: every `‧ ` bullet
/// starts its own paragraph, runs of three or more newlines collapse to a
/// blank line, leading newlines are dropped.
pub fn format_section_text(text: &str) -> String {
    let bullet_re = Regex::new(r"\s*‧ ").unwrap();
    let spaced = bullet_re.replace_all(text, "\n\n‧ ");
    let collapse_re = Regex::new(r"\n{3,}").unwrap();
    let collapsed = collapse_re.replace_all(&spaced, "\n\n");
    collapsed.trim_start_matches('\n').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "1. 종합 평가\n‧ 전달력이 좋고 자연스러움 유지 (8.5/10)\n2) 좋은 점\n‧ \"경제 회복\"을 잘 번역했어요\n3- 아쉬운 점\n‧ 일부 어색한 표현\n4. 추천 표현/개선\n‧ \"경제 회복\" → \"经济复苏\"\n5. 학습 제안\n‧ 접속사 연습 권장\n6. 주요 표현/예문\n‧ 중요 표현: 경제 회복 → 经济复苏";

    #[test]
    fn normalization_rewrites_every_bullet_glyph() {
        let input = "● one\n  • two\n* three\n- four\nmid-line - stays";
        let out = normalize_bullets(input);
        assert_eq!(out, "‧ one\n‧ two\n‧ three\n‧ four\nmid-line - stays");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_bullets("● a\n• b\n plain");
        assert_eq!(normalize_bullets(&once), once);
    }

    #[test]
    fn split_assigns_all_six_slots_and_strips_markers() {
        let sections = split_sections(WELL_FORMED);
        assert!(sections.summary.starts_with("종합 평가"));
        assert!(sections.good.starts_with("좋은 점"));
        assert!(sections.bad.starts_with("아쉬운 점"));
        assert!(sections.recommend.starts_with("추천 표현/개선"));
        assert!(sections.learn.starts_with("학습 제안"));
        assert!(sections.example.starts_with("주요 표현/예문"));
    }

    #[test]
    fn split_without_markers_degrades_to_summary_only() {
        let input = "자유 형식으로 쓰인 피드백입니다. 항목 구분이 전혀 없습니다.";
        let sections = split_sections(input);
        assert_eq!(sections, SectionSet::degenerate(input));
        assert_eq!(sections.summary, input);
        assert!(sections.good.is_empty());
        assert!(sections.example.is_empty());
    }

    #[test]
    fn split_with_dominant_summary_degrades() {
        let long_body = "가".repeat(600);
        let input = format!(
            "1. {}\n2. a\n3. b\n4. c\n5. d\n6. e",
            long_body
        );
        let sections = split_sections(&input);
        assert_eq!(sections, SectionSet::degenerate(&input));
    }

    #[test]
    fn split_with_missing_sections_leaves_them_empty() {
        let input = "1. 요약 내용입니다 충분히 짧음\n2. 좋은 점 내용\n3. 아쉬운 점 내용";
        let sections = split_sections(input);
        assert!(!sections.summary.is_empty());
        assert!(!sections.good.is_empty());
        assert!(!sections.bad.is_empty());
        assert!(sections.recommend.is_empty());
        assert!(sections.learn.is_empty());
        assert!(sections.example.is_empty());
    }

    #[test]
    fn score_from_ratio_form() {
        assert_eq!(extract_score("전달력이 좋음 (8.5/10점)"), 85);
        assert_eq!(extract_score("총점은 92/100 입니다"), 92);
    }

    #[test]
    fn score_from_point_form() {
        assert_eq!(extract_score("이번 번역은 9점"), 90);
        assert_eq!(extract_score("점수 표기가 없는 요약"), 0);
    }

    #[test]
    fn score_keeps_literal_arithmetic_for_odd_ratios() {
        assert_eq!(extract_score("150/100점"), 150);
        assert_eq!(extract_score("7/12"), 58);
    }

    #[test]
    fn quoted_phrases_in_order() {
        let phrases = extract_quoted_phrases("‧ \"경제 회복\"과 \"혁신 기술\" 사용");
        assert_eq!(phrases, vec!["경제 회복", "혁신 기술"]);
    }

    #[test]
    fn quote_phrases_dedup_across_sections() {
        let sections = SectionSet {
            good: "\"경제 회복\"을 잘 살렸어요".to_string(),
            recommend: "\"경제 회복\" → \"经济复苏\"".to_string(),
            ..Default::default()
        };
        let phrases = collect_quote_phrases(&sections);
        assert_eq!(
            phrases.iter().filter(|p| *p == "경제 회복").count(),
            1
        );
        assert_eq!(phrases, vec!["경제 회복", "经济复苏"]);
    }

    #[test]
    fn section_label_strip_handles_stars_and_suffix() {
        assert_eq!(strip_section_label("좋은 점: 어휘 선택이 좋음", "좋은 점"), "어휘 선택이 좋음");
        assert_eq!(strip_section_label("**학습 제안** 항목: 연습 권장", "학습 제안"), "연습 권장");
        assert_eq!(strip_section_label("내용만 있는 경우", "좋은 점"), "내용만 있는 경우");
    }

    #[test]
    fn format_section_text_respaces_bullets() {
        let out = format_section_text("머리말 ‧ 하나 ‧ 둘");
        assert_eq!(out, "머리말\n\n‧ 하나\n\n‧ 둘");
        assert!(!format_section_text("\n\n‧ 하나").starts_with('\n'));
    }
}
