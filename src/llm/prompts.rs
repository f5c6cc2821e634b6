use crate::types::feedback::Direction;

/// Prompt for generating a fresh practice problem as strict JSON.
pub fn problem_prompt(topic: &str, difficulty: &str, direction: Direction) -> String {
    let source_lang = direction.source_lang();
    let target_lang = direction.target_lang();
    let difficulty = if difficulty.trim().is_empty() { "중급" } else { difficulty };
    let pinyin_note = match direction {
        Direction::KoreanToChinese => ", 병음",
        Direction::ChineseToKorean => "",
    };

    format!(
        r#"
당신은 {source_lang}-{target_lang} 번역 교육 전문가입니다. 주어진 주제와 난이도에 맞는 번역 연습 문제를 생성해주세요.

[요구사항]
- 주제: {topic}
- 난이도: {difficulty}
- 분야: {topic}과 관련된 분야
- {source_lang} 원문: 주제와 관련된 자연스러운 문장 (50-100자)
- 주요어휘: 3-5개의 핵심 단어와 {target_lang} 번역{pinyin_note}, 중요도 포함

[난이도별 요구사항]
- 상급: 복잡한 문장 구조, 전문 용어, 추상적 개념 포함
- 중급: 일반적인 문장 구조, 일상적이지만 약간 복잡한 내용
- 하급: 간단한 문장 구조, 기본적인 일상 표현

[출력 형식 - JSON]
{{
  "{source_lang}": "{source_lang} 원문",
  "난이도": "{difficulty}",
  "분야": "분야명",
  "주요어휘": [
    {{
      "korean": "한국어 단어",
      "chinese": "중국어 번역",
      "pinyin": "병음",
      "importance": "중요도 (상/중/하)"
    }}
  ]
}}

위 형식으로 정확한 JSON만 출력해주세요."#
    )
}

/// Prompt for a reference machine translation. Translation only, no
/// commentary.
pub fn translation_prompt(source_text: &str, direction: Direction) -> String {
    let source_lang = direction.source_lang();
    let target_lang = direction.target_lang();
    format!(
        r#"
다음 {source_lang} 문장을 {target_lang}로 번역해주세요. 번역만 정확하게 제공하고 설명이나 추가 내용은 포함하지 마세요.

{source_lang}: {source_text}

{target_lang} 번역:"#
    )
}

/// Prompt for structured feedback. The format rules here are the contract
/// the feedback parser depends on: six numbered sections, `‧` bullets, and
/// the 중요 표현 / 원문 예문 / 예문 번역 structure in section six.
pub fn feedback_prompt(
    source_text: &str,
    user_translation: &str,
    ai_translation: &str,
    direction: Direction,
) -> String {
    let source_lang = direction.source_lang();
    let target_lang = direction.target_lang();
    let is_ko_to_zh = direction == Direction::KoreanToChinese;

    let pinyin_note = if is_ko_to_zh { " (병음)" } else { "" };
    let good_example = if is_ko_to_zh {
        "‧ \"경제 통계\" → \"经济统计\"를 올바르게 번역했어요"
    } else {
        "‧ \"经济统计\" → \"경제 통계\"를 올바르게 번역했어요"
    };
    let bad_example = if is_ko_to_zh {
        "‧ \"혁신 기술\"이 \"기술 변화\"로 번역되어 의미가 약화됨"
    } else {
        "‧ \"创新技术\"이 \"기술 변화\"로 번역되어 의미가 약화됨"
    };
    let recommend_example = if is_ko_to_zh {
        "‧ \"경제 회복\" → \"经济复苏\"가 더 자연스러움"
    } else {
        "‧ \"经济复苏\" → \"경제 회복\"이 더 자연스러움"
    };
    let example_section = if is_ko_to_zh {
        "‧ 중요 표현: 경제 회복 → 经济复苏(jīng jì fù sū)\n‧ 원문 예문 1: 정부는 경제 회복을 최우선 과제로 삼고 있다.\n‧ 예문 번역 1: 政府将经济复苏作为首要任务。\n‧ 원문 예문 2: 경제 회복 속도가 예상보다 빠르다.\n‧ 예문 번역 2: 经济复苏的速度比预期的要快。"
    } else {
        "‧ 중요 표현: 经济复苏(jīng jì fù sū) → 경제 회복\n‧ 원문 예문 1: 政府将经济复苏作为首要任务。\n‧ 예문 번역 1: 정부는 경제 회복을 최우선 과제로 삼고 있다.\n‧ 원문 예문 2: 经济复苏的速度比预期的要快。\n‧ 예문 번역 2: 경제 회복 속도가 예상보다 빠르다."
    };

    format!(
        r#"
당신은 숙련된 번역가입니다. 학생의 번역에 대해 구체적인 피드백을 아래 6개 항목으로 나눠서 작성해 주세요.

[CRITICAL 형식 규칙 - 절대 변경 금지]
- 각 항목은 정확히 "1. 종합 평가", "2. 좋은 점", "3. 아쉬운 점", "4. 추천 표현/개선", "5. 학습 제안", "6. 주요 표현/예문" 형식으로 시작
- 번호와 제목 사이에 점(.) 하나만 사용, 다른 기호나 별표(**) 절대 사용 금지
- 각 항목의 내용은 반드시 ‧ 기호로 시작하는 줄로 구성
- 각 ‧ 줄은 독립된 줄바꿈으로 구분
- "1. 종합 평가"는 피드백에 대한 전반적인 내용과 학생 격려 포함
- "2. 좋은 점"은 어휘 선택, 문맥 표현, 문법 등 전반적인 자연스러움에 대해 평가
- "3. 아쉬운 점"은 오역, 번역 부정확, 문맥 불일치 등 번역 오류에 대해 평가
- "4. 추천 표현/개선"은 {target_lang} 표현 개선 제안 포함
- "5. 학습 제안"은 "3. 아쉬운 점"에 기반하여 학습에 도움이 될 방법 제안
- "6. 주요 표현/예문"에서는 반드시 아래 형식 준수:
  * ‧ 중요 표현: {source_lang}표현 → {target_lang}표현{pinyin_note}
  * ‧ 원문 예문 1: {source_lang} 예문
  * ‧ 예문 번역 1: {target_lang} 번역
  * ‧ 원문 예문 2: {source_lang} 예문
  * ‧ 예문 번역 2: {target_lang} 번역
  * (예문은 최소 2개, 최대 3개)

[출력 형식 예시]
1. 종합 평가
‧ 학생 번역은 원문의 의미를 잘 전달함
‧ 전달력이 좋고 자연스러움 유지 (8.5/10)

2. 좋은 점
‧ 어휘를 문맥에 맞게 잘 선택했어요
{good_example}

3. 아쉬운 점
{bad_example}

4. 추천 표현/개선
{recommend_example}

5. 학습 제안
‧ 접속사 사용과 문장 분리 연습 권장

6. 주요 표현/예문
{example_section}

[입력 데이터]
- 원문 언어: {source_lang}
- 번역 언어: {target_lang}

원문:
{source_text}

학생 번역문:
{user_translation}

AI 번역문:
{ai_translation}

위 데이터를 참고하여 위 예시와 완전히 동일한 형식으로 피드백을 작성해 주세요."#
    )
}

/// First `{{` through last `}}` of a model reply; models habitually wrap
/// the requested JSON in prose or code fences.
pub fn extract_json_block(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&reply[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_prompt_pins_the_marker_vocabulary() {
        let prompt = feedback_prompt("원문", "학생 번역", "AI 번역", Direction::KoreanToChinese);
        for marker in ["1. 종합 평가", "2. 좋은 점", "6. 주요 표현/예문", "중요 표현", "원문 예문", "예문 번역"] {
            assert!(prompt.contains(marker), "missing marker: {marker}");
        }
    }

    #[test]
    fn problem_prompt_defaults_difficulty() {
        let prompt = problem_prompt("경제", "  ", Direction::KoreanToChinese);
        assert!(prompt.contains("난이도: 중급"));
        assert!(prompt.contains("병음"));
    }

    #[test]
    fn json_block_spans_first_to_last_brace() {
        let reply = "설명입니다 {\"한국어\": \"문장\", \"주요어휘\": [{\"korean\": \"단어\"}]} 끝";
        assert_eq!(
            extract_json_block(reply),
            Some("{\"한국어\": \"문장\", \"주요어휘\": [{\"korean\": \"단어\"}]}")
        );
        assert_eq!(extract_json_block("중괄호 없음"), None);
    }
}
