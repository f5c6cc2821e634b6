use crate::types::feedback::TranslationProblem;
use std::fs;
use std::path::Path;

/// Filter wildcard: both filters treat this value as "no filter".
pub const FILTER_ALL: &str = "전체";

/// Loads the practice problem bank from `<data_dir>/problems.json`.
pub fn load_problem_bank(data_dir: &Path) -> Result<Vec<TranslationProblem>, String> {
    let path = data_dir.join("problems.json");
    if !path.is_file() {
        return Err(format!("Problem bank not found at {:?}", path));
    }
    let contents = fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read problem bank {:?}: {}", path, e))?;
    let problems: Vec<TranslationProblem> = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse problem bank {:?}: {}", path, e))?;
    if problems.is_empty() {
        return Err("Problem bank is empty.".to_string());
    }
    Ok(problems)
}

/// Difficulty/domain filter; `전체` on either axis matches everything.
pub fn filter_problems<'a>(
    problems: &'a [TranslationProblem],
    difficulty: &str,
    domain: &str,
) -> Vec<&'a TranslationProblem> {
    problems
        .iter()
        .filter(|p| difficulty == FILTER_ALL || p.difficulty == difficulty)
        .filter(|p| domain == FILTER_ALL || p.domain == domain)
        .collect()
}

/// Domain choices for the filter dropdown: `전체` plus every distinct
/// domain in load order.
pub fn available_domains(problems: &[TranslationProblem]) -> Vec<String> {
    let mut domains = vec![FILTER_ALL.to_string()];
    for p in problems {
        if !p.domain.is_empty() && !domains.contains(&p.domain) {
            domains.push(p.domain.clone());
        }
    }
    domains
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> Vec<TranslationProblem> {
        let raw = r#"[
            {"id": "p1", "한국어": "경제 문장", "난이도": "상급", "분야": "경제"},
            {"id": "p2", "한국어": "여행 문장", "난이도": "중급", "분야": "여행"},
            {"id": "p3", "한국어": "경제 문장 2", "난이도": "중급", "분야": "경제"}
        ]"#;
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn korean_json_keys_deserialize() {
        let problems = bank();
        assert_eq!(problems[0].korean, "경제 문장");
        assert_eq!(problems[0].difficulty, "상급");
        assert_eq!(problems[0].domain, "경제");
        assert!(problems[0].chinese.is_none());
        assert!(problems[0].vocab.is_empty());
    }

    #[test]
    fn wildcard_filter_matches_everything() {
        let problems = bank();
        assert_eq!(filter_problems(&problems, FILTER_ALL, FILTER_ALL).len(), 3);
    }

    #[test]
    fn filters_compose() {
        let problems = bank();
        let hits = filter_problems(&problems, "중급", "경제");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p3");
    }

    #[test]
    fn domain_list_starts_with_wildcard_and_dedups() {
        let problems = bank();
        assert_eq!(available_domains(&problems), vec!["전체", "경제", "여행"]);
    }
}
