use crate::types::feedback::{ExampleBlock, ExampleGroup, ExampleItem, ExampleItemKind};
use regex::Regex;

// Marker vocabulary for section six. Any change in the model's phrasing is
// a contract break and must show up as a test failure, not silent
// degradation.
const KEY_EXPRESSION_MARKER: &str = "중요 표현";
const ORIGINAL_EXAMPLE_MARKER: &str = "원문 예문";
const EXAMPLE_TRANSLATION_MARKER: &str = "예문 번역";

/// Lays out the sixth section as a sequence of render blocks.
///
/// Bullet lines carry the structure: a `중요 표현` line with a colon or
/// arrow opens a new group (closing any open one), `원문 예문` and
/// `예문 번역` lines join the open group or render standalone, anything
/// else bulleted is a standalone general item. Blank lines become spacers
/// and unbulleted text renders as a plain paragraph fragment. A still-open
/// group is flushed at end of input.
///
/// Groups are numbered from 1 in emission order; the renderer draws a
/// separator before every group after the first.
pub fn layout_example_section(text: &str) -> Vec<ExampleBlock> {
    let bullet_re = Regex::new(r"^‧\s*").unwrap();

    let mut blocks: Vec<ExampleBlock> = Vec::new();
    let mut open_group: Vec<ExampleItem> = Vec::new();
    let mut group_count = 0usize;

    for (line_idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if let Some(m) = bullet_re.find(line) {
            let content = line[m.end()..].trim().to_string();
            if is_key_expression(&content) {
                if !open_group.is_empty() {
                    blocks.push(ExampleBlock::Group(ExampleGroup {
                        number: group_count,
                        items: std::mem::take(&mut open_group),
                    }));
                }
                group_count += 1;
                open_group.push(ExampleItem {
                    kind: ExampleItemKind::Expression,
                    content,
                    line_idx,
                });
            } else if content.contains(ORIGINAL_EXAMPLE_MARKER)
                || content.contains(EXAMPLE_TRANSLATION_MARKER)
            {
                let kind = if content.contains(ORIGINAL_EXAMPLE_MARKER) {
                    ExampleItemKind::Original
                } else {
                    ExampleItemKind::Translation
                };
                if !open_group.is_empty() {
                    open_group.push(ExampleItem {
                        kind,
                        content,
                        line_idx,
                    });
                } else {
                    // Example lines arriving before any expression line are
                    // rendered standalone, never retro-grouped.
                    blocks.push(ExampleBlock::General { content, line_idx });
                }
            } else {
                blocks.push(ExampleBlock::General { content, line_idx });
            }
        } else if line.is_empty() {
            blocks.push(ExampleBlock::Spacer { line_idx });
        } else {
            blocks.push(ExampleBlock::Paragraph {
                content: line.to_string(),
                line_idx,
            });
        }
    }

    if !open_group.is_empty() {
        blocks.push(ExampleBlock::Group(ExampleGroup {
            number: group_count,
            items: open_group,
        }));
    }
    blocks
}

fn is_key_expression(content: &str) -> bool {
    content.contains(KEY_EXPRESSION_MARKER)
        && (content.contains(':') || content.contains('：') || content.contains('→'))
}

/// Splits a `예문 번역` line at its first colon (half- or full-width) into
/// the label (colon included) and the literal translation text offered for
/// playback. Lines without a colon keep their full content as the text.
pub fn split_translation_line(content: &str) -> (String, String) {
    for (byte_idx, ch) in content.char_indices() {
        if ch == ':' || ch == '：' {
            let label_end = byte_idx + ch.len_utf8();
            let label = content[..label_end].to_string();
            let spoken = content[label_end..].trim().to_string();
            return (label, spoken);
        }
    }
    (String::new(), content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_sizes(blocks: &[ExampleBlock]) -> Vec<(usize, usize)> {
        blocks
            .iter()
            .filter_map(|b| match b {
                ExampleBlock::Group(g) => Some((g.number, g.items.len())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn two_expressions_make_two_numbered_groups() {
        let text = "‧ 중요 표현: 경제 회복 → 经济复苏(jīng jì fù sū)\n\
                    ‧ 원문 예문 1: 정부는 경제 회복을 최우선 과제로 삼고 있다.\n\
                    ‧ 예문 번역 1: 政府将经济复苏作为首要任务。\n\
                    ‧ 원문 예문 2: 경제 회복 속도가 예상보다 빠르다.\n\
                    ‧ 예문 번역 2: 经济复苏的速度比预期的要快。\n\
                    ‧ 중요 표현: 최우선 과제 → 首要任务\n\
                    ‧ 원문 예문 1: 안전을 최우선 과제로 둔다.\n\
                    ‧ 예문 번역 1: 把安全作为首要任务。";
        let blocks = layout_example_section(text);
        assert_eq!(group_sizes(&blocks), vec![(1, 5), (2, 3)]);
    }

    #[test]
    fn expression_needs_colon_or_arrow() {
        let blocks = layout_example_section("‧ 중요 표현만 언급하고 구분자가 없음");
        assert!(matches!(blocks[0], ExampleBlock::General { .. }));

        let blocks = layout_example_section("‧ 중요 표현 → 화살표만 있는 경우");
        assert!(matches!(blocks[0], ExampleBlock::Group(_)));
    }

    #[test]
    fn example_lines_before_any_expression_stay_standalone() {
        let text = "‧ 원문 예문 1: 떠돌이 예문\n‧ 중요 표현: 표현 → 表达";
        let blocks = layout_example_section(text);
        assert!(matches!(blocks[0], ExampleBlock::General { .. }));
        assert_eq!(group_sizes(&blocks), vec![(1, 1)]);
    }

    #[test]
    fn blanks_and_plain_lines_classify_separately() {
        let text = "안내 문단입니다\n\n‧ 일반 항목";
        let blocks = layout_example_section(text);
        assert!(matches!(blocks[0], ExampleBlock::Paragraph { .. }));
        assert!(matches!(blocks[1], ExampleBlock::Spacer { .. }));
        assert!(matches!(blocks[2], ExampleBlock::General { .. }));
    }

    #[test]
    fn translation_line_splits_after_first_colon() {
        let (label, spoken) = split_translation_line("예문 번역 1: 政府将经济复苏作为首要任务。");
        assert_eq!(label, "예문 번역 1:");
        assert_eq!(spoken, "政府将经济复苏作为首要任务。");
    }

    #[test]
    fn translation_line_handles_fullwidth_colon_and_none() {
        let (label, spoken) = split_translation_line("예문 번역 2： 经济复苏的速度比预期的要快。");
        assert_eq!(label, "예문 번역 2：");
        assert_eq!(spoken, "经济复苏的速度比预期的要快。");

        let (label, spoken) = split_translation_line("콜론이 없는 줄");
        assert!(label.is_empty());
        assert_eq!(spoken, "콜론이 없는 줄");
    }
}
