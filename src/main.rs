#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod config;
mod types {
    pub mod feedback;
}
mod parsing {
    pub mod example_blocks;
    pub mod feedback_parser;
}
mod highlight;
mod llm {
    pub mod client;
    pub mod error;
    pub mod prompts;
}
mod problems;
mod records;
mod speech;

use clap::Parser;
use eframe::{egui, App, NativeOptions};
use std::collections::HashSet;
use std::path::Path;

use crate::config::Config;
use crate::highlight::ViewState;
use crate::llm::client::LlmClient;
use crate::llm::prompts;
use crate::parsing::example_blocks::{layout_example_section, split_translation_line};
use crate::parsing::feedback_parser::{
    collect_quote_phrases, extract_score, format_section_text, normalize_bullets, split_sections,
    strip_section_label,
};
use crate::problems::{available_domains, filter_problems, load_problem_bank, FILTER_ALL};
use crate::records::{new_record_id, ProblemType, RecordStore, TranslationRecord};
use crate::speech::{SpeechRequest, Synthesizer, SPEECH_UNAVAILABLE_NOTICE};
use crate::types::feedback::{
    Direction, ExampleBlock, ExampleItemKind, SectionSet, TranslationProblem,
};

const HIGHLIGHT_BG: egui::Color32 = egui::Color32::from_rgb(253, 230, 138);
const ACCENT: egui::Color32 = egui::Color32::from_rgb(37, 99, 235);
const EXPRESSION_COLOR: egui::Color32 = egui::Color32::from_rgb(15, 76, 117);

const DIFFICULTY_CHOICES: [&str; 4] = ["전체", "상급", "중급", "하급"];

#[derive(Parser, Debug)]
#[command(name = "transtutor", about = "한국어/중국어 번역 연습 도구")]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, default_value = "config.toml")]
    config: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Existing,
    AiGenerated,
    History,
}

/// Everything derived from one raw feedback reply. Parsed once when the
/// reply arrives; the derivations are pure functions of the raw text, so
/// memoizing on it is safe.
#[derive(Debug, Clone)]
struct FeedbackView {
    raw: String,
    sections: SectionSet,
    phrases: Vec<String>,
    example_blocks: Vec<ExampleBlock>,
    score: i32,
}

impl FeedbackView {
    fn parse(raw_feedback: &str) -> Self {
        let normalized = normalize_bullets(raw_feedback);
        let sections = split_sections(&normalized);
        let phrases = collect_quote_phrases(&sections);
        let example_blocks = layout_example_section(&sections.example);
        let score = extract_score(&sections.summary);
        FeedbackView {
            raw: raw_feedback.to_string(),
            sections,
            phrases,
            example_blocks,
            score,
        }
    }
}

struct TransTutorApp {
    config: Option<Config>,
    config_error: Option<String>,
    config_status: String,
    mode: Mode,
    direction: Direction,

    problems: Vec<TranslationProblem>,
    bank_error: Option<String>,
    difficulty_filter: String,
    domain_filter: String,
    current_index: usize,

    topic: String,
    difficulty_text: String,
    generated_problem: Option<TranslationProblem>,

    user_translation: String,
    ai_translation: String,
    feedback_view: Option<FeedbackView>,
    view_state: ViewState,
    quote_hover_live: bool,

    llm: Option<LlmClient>,
    record_store: Option<RecordStore>,
    history: Vec<TranslationRecord>,
    history_error: Option<String>,
    selected_records: HashSet<String>,

    synthesizer: Option<Box<dyn Synthesizer>>,
    speech_notice: Option<String>,

    status_error: Option<String>,
    status_info: Option<String>,
}

impl TransTutorApp {
    fn new(_cc: &eframe::CreationContext<'_>, cli: &Cli) -> Self {
        let mut config_val = None;
        let mut config_error_val = None;
        let config_status: String;

        match config::load_config_from_file(&cli.config) {
            Ok(loaded_config) => {
                config_status = format!("Data Dir: {}", loaded_config.data_dir);
                config_val = Some(loaded_config);
            }
            Err(err_msg) => {
                eprintln!("Error loading {}: {}", cli.config, err_msg);
                config_error_val = Some(err_msg.clone());
                config_status = err_msg;
            }
        }

        let llm = config_val.as_ref().map(LlmClient::new);
        let record_store = config_val
            .as_ref()
            .map(|c| RecordStore::new(Path::new(&c.data_dir)));

        let mut problems = Vec::new();
        let mut bank_error = None;
        if let Some(conf) = &config_val {
            match load_problem_bank(Path::new(&conf.data_dir)) {
                Ok(loaded) => problems = loaded,
                Err(e) => bank_error = Some(e),
            }
        }

        let mut app = Self {
            config: config_val,
            config_error: config_error_val,
            config_status,
            mode: Mode::Existing,
            direction: Direction::KoreanToChinese,
            problems,
            bank_error,
            difficulty_filter: FILTER_ALL.to_string(),
            domain_filter: FILTER_ALL.to_string(),
            current_index: 0,
            topic: String::new(),
            difficulty_text: String::new(),
            generated_problem: None,
            user_translation: String::new(),
            ai_translation: String::new(),
            feedback_view: None,
            view_state: ViewState::default(),
            quote_hover_live: false,
            llm,
            record_store,
            history: Vec::new(),
            history_error: None,
            selected_records: HashSet::new(),
            synthesizer: None,
            speech_notice: None,
            status_error: None,
            status_info: None,
        };
        app.reload_history();
        app
    }

    fn reset_problem_state(&mut self) {
        self.user_translation.clear();
        self.ai_translation.clear();
        self.feedback_view = None;
        self.view_state.reset();
        self.quote_hover_live = false;
        self.status_error = None;
        self.status_info = None;
        self.speech_notice = None;
    }

    fn switch_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.reset_problem_state();
            if mode == Mode::History {
                self.reload_history();
            }
        }
    }

    fn current_problem(&self) -> Option<TranslationProblem> {
        match self.mode {
            Mode::AiGenerated => self.generated_problem.clone(),
            Mode::Existing => {
                let filtered =
                    filter_problems(&self.problems, &self.difficulty_filter, &self.domain_filter);
                filtered.get(self.current_index).map(|p| (*p).clone())
            }
            Mode::History => None,
        }
    }

    fn filtered_count(&self) -> usize {
        filter_problems(&self.problems, &self.difficulty_filter, &self.domain_filter).len()
    }

    fn reload_bank(&mut self) {
        let Some(conf) = &self.config else {
            self.bank_error = Some("Config not loaded.".to_string());
            return;
        };
        match load_problem_bank(Path::new(&conf.data_dir)) {
            Ok(loaded) => {
                self.problems = loaded;
                self.bank_error = None;
                self.current_index = 0;
                self.reset_problem_state();
            }
            Err(e) => self.bank_error = Some(e),
        }
    }

    fn generate_problem(&mut self) {
        if self.topic.trim().is_empty() {
            self.status_error = Some("주제를 입력해주세요.".to_string());
            return;
        }
        let Some(client) = &self.llm else {
            self.status_error = Some("설정이 없어 AI를 호출할 수 없습니다.".to_string());
            return;
        };

        let prompt = prompts::problem_prompt(&self.topic, &self.difficulty_text, self.direction);
        match client.generate(&prompt) {
            Ok(reply) => match prompts::extract_json_block(&reply) {
                Some(json) => match serde_json::from_str::<TranslationProblem>(json) {
                    Ok(mut problem) => {
                        problem.id = format!("generated-{}", chrono::Utc::now().timestamp_millis());
                        self.generated_problem = Some(problem);
                        self.reset_problem_state();
                    }
                    Err(e) => {
                        self.status_error = Some(format!(
                            "AI가 올바른 형식으로 문제를 생성하지 못했습니다: {}",
                            e
                        ));
                    }
                },
                None => {
                    self.status_error =
                        Some("AI가 올바른 형식으로 문제를 생성하지 못했습니다.".to_string());
                }
            },
            Err(e) => {
                self.status_error = Some(format!("문제 생성에 실패했습니다: {}", e));
            }
        }
    }

    fn request_ai_translation(&mut self) {
        let Some(problem) = self.current_problem() else {
            self.status_error = Some("문제가 없습니다.".to_string());
            return;
        };
        if self.user_translation.trim().is_empty() {
            self.status_error = Some("번역을 입력해주세요.".to_string());
            return;
        }
        let Some(client) = &self.llm else {
            self.status_error = Some("설정이 없어 AI를 호출할 수 없습니다.".to_string());
            return;
        };

        let source = problem.source_text(self.direction).to_string();
        let prompt = prompts::translation_prompt(&source, self.direction);
        match client.generate(&prompt) {
            Ok(text) => {
                self.ai_translation = text.trim().to_string();
                self.feedback_view = None;
                self.status_error = None;
            }
            Err(e) => {
                self.status_error = Some(format!("AI 번역 생성에 실패했습니다: {}", e));
            }
        }
    }

    fn request_feedback(&mut self) {
        let Some(problem) = self.current_problem() else {
            self.status_error = Some("문제가 없습니다.".to_string());
            return;
        };
        if self.ai_translation.is_empty() {
            self.status_error = Some("먼저 번역을 제출해주세요.".to_string());
            return;
        }
        let Some(client) = &self.llm else {
            self.status_error = Some("설정이 없어 AI를 호출할 수 없습니다.".to_string());
            return;
        };

        let source = problem.source_text(self.direction).to_string();
        let prompt = prompts::feedback_prompt(
            &source,
            &self.user_translation,
            &self.ai_translation,
            self.direction,
        );
        match client.generate(&prompt) {
            Ok(text) => {
                self.feedback_view = Some(FeedbackView::parse(&text));
                self.view_state.highlight.hover_leave();
                self.quote_hover_live = false;
                self.status_error = None;
            }
            Err(e) => {
                self.status_error = Some(format!("피드백 요청에 실패했습니다: {}", e));
            }
        }
    }

    fn save_record(&mut self) {
        let Some(problem) = self.current_problem() else {
            self.status_error = Some("문제가 없습니다.".to_string());
            return;
        };
        let Some(view) = &self.feedback_view else {
            self.status_error = Some("저장할 피드백이 없습니다.".to_string());
            return;
        };
        let Some(store) = &self.record_store else {
            self.status_error = Some("설정이 없어 기록을 저장할 수 없습니다.".to_string());
            return;
        };

        let now = chrono::Utc::now();
        let (problem_type, topic) = match self.mode {
            Mode::AiGenerated => (ProblemType::AiGenerated, self.topic.clone()),
            _ => (ProblemType::Existing, problem.domain.clone()),
        };
        let record = TranslationRecord {
            id: new_record_id(now),
            problem_type,
            original_text: problem.source_text(self.direction).to_string(),
            user_translation: self.user_translation.clone(),
            ai_translation: self.ai_translation.clone(),
            feedback: view.raw.clone(),
            score: view.score,
            topic,
            difficulty: problem.difficulty.clone(),
            created_at: now,
        };
        match store.append(record) {
            Ok(()) => {
                self.status_info = Some("번역 기록이 저장되었습니다!".to_string());
                self.status_error = None;
                self.reload_history();
            }
            Err(e) => {
                self.status_error = Some(format!("저장 중 오류가 발생했습니다: {}", e));
            }
        }
    }

    fn reload_history(&mut self) {
        let Some(store) = &self.record_store else {
            self.history.clear();
            return;
        };
        match store.load() {
            Ok(records) => {
                self.history = records;
                self.history_error = None;
            }
            Err(e) => {
                self.history_error = Some(format!("기록을 불러오지 못했습니다: {}", e));
            }
        }
        self.selected_records.clear();
    }

    fn delete_record(&mut self, record_id: &str) {
        let Some(store) = &self.record_store else { return };
        match store.delete(record_id) {
            Ok(()) => self.reload_history(),
            Err(e) => self.history_error = Some(format!("삭제 중 오류가 발생했습니다: {}", e)),
        }
    }

    fn delete_selected_records(&mut self) {
        let Some(store) = &self.record_store else { return };
        let ids: Vec<String> = self.selected_records.iter().cloned().collect();
        if ids.is_empty() {
            return;
        }
        match store.delete_many(&ids) {
            Ok(()) => self.reload_history(),
            Err(e) => self.history_error = Some(format!("삭제 중 오류가 발생했습니다: {}", e)),
        }
    }

    fn speak_example(&mut self, text: &str) {
        let request = SpeechRequest::for_example(text);
        match &mut self.synthesizer {
            Some(synth) => match synth.speak(&request) {
                Ok(()) => self.speech_notice = None,
                Err(e) => self.speech_notice = Some(e),
            },
            None => self.speech_notice = Some(SPEECH_UNAVAILABLE_NOTICE.to_string()),
        }
    }

    fn render_history_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("번역 학습 기록");
        if self.history.is_empty() {
            ui.label("저장된 기록이 없습니다.");
            return;
        }

        let records = self.history.clone();
        let mut delete_one: Option<String> = None;
        for record in &records {
            ui.horizontal(|ui| {
                let mut checked = self.selected_records.contains(&record.id);
                if ui.checkbox(&mut checked, "").changed() {
                    if checked {
                        self.selected_records.insert(record.id.clone());
                    } else {
                        self.selected_records.remove(&record.id);
                    }
                }
                ui.label(format!(
                    "{}  [{}점]  {}",
                    record.formatted_date(),
                    record.score,
                    truncate_chars(&record.original_text, 24)
                ));
                if ui.button("삭제").clicked() {
                    delete_one = Some(record.id.clone());
                }
            });
            egui::CollapsingHeader::new("상세 보기")
                .id_source(&record.id)
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("원문").strong());
                    ui.label(&record.original_text);
                    ui.label(egui::RichText::new("내 번역").strong());
                    ui.label(&record.user_translation);
                    ui.label(egui::RichText::new("AI 번역").strong());
                    ui.label(&record.ai_translation);
                    ui.label(egui::RichText::new("피드백").strong());
                    ui.label(truncate_chars(&record.feedback, 400));
                });
            ui.separator();
        }
        if let Some(id) = delete_one {
            self.delete_record(&id);
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}…", cut)
    }
}

/// Renders panel text, marking every occurrence of the active phrase.
fn render_highlighted_text(ui: &mut egui::Ui, text: &str, active: Option<&str>) {
    let Some(phrase) = active else {
        ui.label(text);
        return;
    };
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for segment in highlight::split_highlight_segments(text, phrase) {
            if segment.highlighted {
                ui.label(
                    egui::RichText::new(&segment.text)
                        .strong()
                        .background_color(HIGHLIGHT_BG),
                );
            } else {
                ui.label(&segment.text);
            }
        }
    });
}

/// Renders one feedback line; quoted phrases from the quote universe
/// become hoverable spans. A span hovered this frame is reported back
/// through `hovered`.
fn render_quoted_text(
    ui: &mut egui::Ui,
    text: &str,
    phrases: &[String],
    active: Option<&str>,
    hovered: &mut Option<String>,
) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for segment in highlight::split_quoted_segments(text) {
            if segment.quoted && phrases.iter().any(|p| p == &segment.text) {
                let is_active = active == Some(segment.text.as_str());
                let mut rich = egui::RichText::new(format!("\"{}\"", segment.text)).strong();
                rich = if is_active {
                    rich.background_color(HIGHLIGHT_BG)
                } else {
                    rich.color(ACCENT)
                };
                let response = ui
                    .add(egui::Label::new(rich).sense(egui::Sense::hover()))
                    .on_hover_text("상단에서 위치 확인");
                if response.hovered() {
                    *hovered = Some(segment.text.clone());
                }
            } else if segment.quoted {
                ui.label(format!("\"{}\"", segment.text));
            } else {
                ui.label(&segment.text);
            }
        }
    });
}

fn render_section_body(
    ui: &mut egui::Ui,
    body: &str,
    phrases: &[String],
    active: Option<&str>,
    hovered: &mut Option<String>,
) {
    for line in body.split('\n') {
        let trimmed = line.trim();
        if let Some(content) = trimmed.strip_prefix('‧') {
            let bullet_line = format!("‧ {}", content.trim_start());
            render_quoted_text(ui, &bullet_line, phrases, active, hovered);
        } else if trimmed.is_empty() {
            ui.add_space(4.0);
        } else {
            render_quoted_text(ui, trimmed, phrases, active, hovered);
        }
    }
}

fn render_example_blocks(
    ui: &mut egui::Ui,
    blocks: &[ExampleBlock],
    speak_clicks: &mut Vec<String>,
) {
    for block in blocks {
        match block {
            ExampleBlock::Group(group) => {
                if group.number > 1 {
                    ui.add_space(8.0);
                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!("예문 {}", group.number))
                            .strong()
                            .color(ACCENT),
                    );
                }
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    for item in &group.items {
                        match item.kind {
                            ExampleItemKind::Expression => {
                                ui.label(
                                    egui::RichText::new(format!("‧ {}", item.content))
                                        .strong()
                                        .color(EXPRESSION_COLOR),
                                );
                            }
                            ExampleItemKind::Original => {
                                ui.label(
                                    egui::RichText::new(format!("‧ {}", item.content)).strong(),
                                );
                            }
                            ExampleItemKind::Translation => {
                                let (label, spoken) = split_translation_line(&item.content);
                                ui.horizontal(|ui| {
                                    ui.label(egui::RichText::new(format!("‧ {}", label)).strong());
                                    if ui.button("🔊").on_hover_text("음성으로 듣기").clicked() {
                                        speak_clicks.push(spoken.clone());
                                    }
                                });
                                ui.label(format!("    {}", spoken));
                            }
                        }
                    }
                });
            }
            ExampleBlock::General { content, .. } => {
                ui.label(format!("‧ {}", content));
            }
            ExampleBlock::Spacer { .. } => {
                ui.add_space(8.0);
            }
            ExampleBlock::Paragraph { content, .. } => {
                ui.label(content);
            }
        }
    }
}

fn render_text_panel(ui: &mut egui::Ui, heading: &str, text: &str, active: Option<&str>) {
    ui.label(egui::RichText::new(heading).strong().color(ACCENT));
    render_highlighted_text(ui, text, active);
}

#[allow(clippy::too_many_arguments)]
fn render_feedback(
    ui: &mut egui::Ui,
    view: &FeedbackView,
    original: &str,
    ai_translation: &str,
    user_translation: &str,
    active: Option<&str>,
    hovered: &mut Option<String>,
    speak_clicks: &mut Vec<String>,
) {
    ui.columns(3, |columns| {
        render_text_panel(&mut columns[0], "원문", original, active);
        render_text_panel(&mut columns[1], "AI 번역", ai_translation, active);
        render_text_panel(&mut columns[2], "내 번역", user_translation, active);
    });
    ui.separator();

    ui.heading(format!("🟦 1. 종합 평가 (총점 {})", view.score));
    let summary = format_section_text(&strip_section_label(&view.sections.summary, "종합 평가"));
    render_section_body(ui, &summary, &view.phrases, active, hovered);
    ui.separator();

    let middle_sections = [
        ("✅", 2, "좋은 점/분석", "좋은 점", &view.sections.good),
        ("⚠️", 3, "아쉬운 점", "아쉬운 점", &view.sections.bad),
        ("💡", 4, "추천 표현/개선", "추천 표현", &view.sections.recommend),
        ("📚", 5, "학습 제안", "학습 제안", &view.sections.learn),
    ];
    for (icon, number, title, strip_title, section) in middle_sections {
        ui.heading(format!("{} {}. {}", icon, number, title));
        let body = format_section_text(&strip_section_label(section, strip_title));
        render_section_body(ui, &body, &view.phrases, active, hovered);
        ui.separator();
    }

    ui.heading("📝 6. 주요 표현/예문");
    render_example_blocks(ui, &view.example_blocks, speak_clicks);
}

impl App for TransTutorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut hovered_quote: Option<String> = None;
        let mut speak_clicks: Vec<String> = Vec::new();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("모드", |ui| {
                    if ui.button("기존 문제").clicked() {
                        self.switch_mode(Mode::Existing);
                        ui.close_menu();
                    }
                    if ui.button("AI 생성 문제").clicked() {
                        self.switch_mode(Mode::AiGenerated);
                        ui.close_menu();
                    }
                    if ui.button("학습 기록").clicked() {
                        self.switch_mode(Mode::History);
                        ui.close_menu();
                    }
                });
            });
        });

        egui::SidePanel::left("side_panel_left")
            .min_width(250.0)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.heading("Controls & Info");
                ui.separator();
                ui.collapsing("Configuration", |ui| {
                    if let Some(err) = &self.config_error {
                        ui.colored_label(egui::Color32::RED, format!("Config: {}", err));
                    } else if self.config.is_some() {
                        ui.colored_label(egui::Color32::GREEN, &self.config_status);
                    } else {
                        ui.label(&self.config_status);
                    }
                });
                ui.separator();

                egui::ComboBox::from_label("언어쌍")
                    .selected_text(self.direction.pair_label())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(
                            &mut self.direction,
                            Direction::KoreanToChinese,
                            "한-중",
                        );
                        ui.selectable_value(
                            &mut self.direction,
                            Direction::ChineseToKorean,
                            "중-한",
                        );
                    });
                ui.separator();

                match self.mode {
                    Mode::Existing => {
                        ui.label("기존 문제");
                        if ui.button("문제 다시 불러오기").clicked() {
                            self.reload_bank();
                        }
                        if let Some(err) = &self.bank_error {
                            ui.colored_label(egui::Color32::RED, err);
                        }

                        let prev_difficulty = self.difficulty_filter.clone();
                        let prev_domain = self.domain_filter.clone();
                        egui::ComboBox::from_label("난이도")
                            .selected_text(&self.difficulty_filter)
                            .show_ui(ui, |ui| {
                                for choice in DIFFICULTY_CHOICES {
                                    ui.selectable_value(
                                        &mut self.difficulty_filter,
                                        choice.to_string(),
                                        choice,
                                    );
                                }
                            });
                        let domains = available_domains(&self.problems);
                        egui::ComboBox::from_label("분야")
                            .selected_text(&self.domain_filter)
                            .show_ui(ui, |ui| {
                                for choice in &domains {
                                    ui.selectable_value(
                                        &mut self.domain_filter,
                                        choice.clone(),
                                        choice,
                                    );
                                }
                            });
                        if prev_difficulty != self.difficulty_filter
                            || prev_domain != self.domain_filter
                        {
                            self.current_index = 0;
                            self.reset_problem_state();
                        }

                        let count = self.filtered_count();
                        ui.horizontal(|ui| {
                            if ui
                                .add_enabled(self.current_index > 0, egui::Button::new("← 이전"))
                                .clicked()
                            {
                                self.current_index -= 1;
                                self.reset_problem_state();
                            }
                            ui.label(if count == 0 {
                                "0 / 0".to_string()
                            } else {
                                format!("{} / {}", self.current_index + 1, count)
                            });
                            if ui
                                .add_enabled(
                                    count > 0 && self.current_index + 1 < count,
                                    egui::Button::new("다음 →"),
                                )
                                .clicked()
                            {
                                self.current_index += 1;
                                self.reset_problem_state();
                            }
                        });
                    }
                    Mode::AiGenerated => {
                        ui.label("AI 생성 문제");
                        ui.label("주제");
                        ui.text_edit_singleline(&mut self.topic);
                        ui.label("난이도 (자유 서술)");
                        ui.text_edit_singleline(&mut self.difficulty_text);
                        if ui.button("문제 생성").clicked() {
                            self.generate_problem();
                        }
                        if ui.button("새 문제 생성 (초기화)").clicked() {
                            self.generated_problem = None;
                            self.topic.clear();
                            self.difficulty_text.clear();
                            self.reset_problem_state();
                        }
                    }
                    Mode::History => {
                        ui.label("학습 기록");
                        if ui.button("기록 새로고침").clicked() {
                            self.reload_history();
                        }
                        ui.label(format!(
                            "총 {}건 / 선택 {}건",
                            self.history.len(),
                            self.selected_records.len()
                        ));
                        if ui
                            .add_enabled(
                                !self.selected_records.is_empty(),
                                egui::Button::new("선택 삭제"),
                            )
                            .clicked()
                        {
                            self.delete_selected_records();
                        }
                        if let Some(err) = &self.history_error {
                            ui.colored_label(egui::Color32::RED, err);
                        }
                    }
                }
                ui.separator();

                if let Some(err) = &self.status_error {
                    ui.colored_label(egui::Color32::RED, err);
                }
                if let Some(info) = &self.status_info {
                    ui.colored_label(egui::Color32::GREEN, info);
                }
                if let Some(notice) = &self.speech_notice {
                    ui.colored_label(egui::Color32::RED, notice);
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_source("central_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if self.mode == Mode::History {
                        self.render_history_panel(ui);
                        return;
                    }

                    let Some(problem) = self.current_problem() else {
                        match self.mode {
                            Mode::AiGenerated => {
                                ui.label("주제를 입력하고 문제를 생성해주세요.");
                            }
                            _ => {
                                ui.label("문제를 불러오거나 필터를 조정해주세요.");
                            }
                        }
                        return;
                    };

                    let active_phrase: Option<String> =
                        self.view_state.highlight.active().map(|s| s.to_string());
                    let active = active_phrase.as_deref();

                    ui.heading("아래 문장을 번역해 보세요.");
                    ui.horizontal(|ui| {
                        ui.label(format!(
                            "난이도: {}  /  분야: {}",
                            problem.difficulty, problem.domain
                        ));
                        if self.mode == Mode::AiGenerated {
                            ui.label(egui::RichText::new("🤖 AI 생성").color(ACCENT));
                        }
                    });
                    render_highlighted_text(ui, problem.source_text(self.direction), active);
                    ui.add_space(4.0);

                    if ui
                        .button(if self.view_state.show_hints {
                            "🔍 힌트 숨기기"
                        } else {
                            "🔍 힌트 보기"
                        })
                        .clicked()
                    {
                        self.view_state.show_hints = !self.view_state.show_hints;
                    }
                    if self.view_state.show_hints && !problem.vocab.is_empty() {
                        ui.horizontal_wrapped(|ui| {
                            for (idx, vocab) in problem.vocab.iter().enumerate() {
                                let word = vocab.display_word(self.direction);
                                if word.is_empty() {
                                    continue;
                                }
                                let selected = self.view_state.selected_vocab == Some(idx);
                                if ui.selectable_label(selected, word).clicked() {
                                    self.view_state.highlight.toggle(word);
                                    self.view_state.selected_vocab =
                                        if selected { None } else { Some(idx) };
                                }
                            }
                        });
                        if let Some(idx) = self.view_state.selected_vocab {
                            if let Some(vocab) = problem.vocab.get(idx) {
                                egui::Frame::group(ui.style()).show(ui, |ui| {
                                    ui.label(
                                        egui::RichText::new(vocab.display_word(self.direction))
                                            .strong(),
                                    );
                                    match self.direction {
                                        Direction::KoreanToChinese => {
                                            ui.label(format!("중국어: {}", vocab.chinese));
                                        }
                                        Direction::ChineseToKorean => {
                                            ui.label(format!("한국어: {}", vocab.korean));
                                        }
                                    }
                                    ui.label(format!("Pinyin: {}", vocab.pinyin));
                                    ui.label(format!("중요도: {}", vocab.importance));
                                });
                            }
                        }
                    }
                    ui.add_space(8.0);

                    ui.label("내 번역:");
                    ui.add(
                        egui::TextEdit::multiline(&mut self.user_translation)
                            .desired_rows(3)
                            .desired_width(f32::INFINITY)
                            .hint_text(format!(
                                "여기에 {} 번역 입력...",
                                self.direction.target_lang()
                            )),
                    );
                    if let Some(phrase) = active {
                        if self.user_translation.contains(phrase) {
                            ui.label(format!("하이라이트된 단어: {}", phrase));
                        }
                    }

                    ui.horizontal(|ui| {
                        if ui.button("내 번역 제출하기").clicked() {
                            self.request_ai_translation();
                        }
                        if !self.ai_translation.is_empty()
                            && ui.button("📊 비교 분석 피드백 받기").clicked()
                        {
                            self.request_feedback();
                        }
                        if self.feedback_view.is_some()
                            && ui.button("번역 기록 저장하기").clicked()
                        {
                            self.save_record();
                        }
                    });

                    if !self.ai_translation.is_empty() && self.feedback_view.is_none() {
                        ui.separator();
                        ui.heading("AI 번역 결과");
                        let ai_translation = self.ai_translation.clone();
                        let user_translation = self.user_translation.clone();
                        ui.columns(2, |columns| {
                            render_text_panel(&mut columns[0], "AI 번역", &ai_translation, active);
                            render_text_panel(
                                &mut columns[1],
                                "나의 번역",
                                &user_translation,
                                active,
                            );
                        });
                    }

                    if let Some(view) = self.feedback_view.clone() {
                        ui.separator();
                        let ai_translation = self.ai_translation.clone();
                        let user_translation = self.user_translation.clone();
                        render_feedback(
                            ui,
                            &view,
                            problem.source_text(self.direction),
                            &ai_translation,
                            &user_translation,
                            active,
                            &mut hovered_quote,
                            &mut speak_clicks,
                        );
                    }
                });
        });

        // Hover wiring: a quoted span hovered this frame activates its
        // phrase; leaving every span clears a hover-set highlight without
        // touching chip-click selections.
        match hovered_quote {
            Some(phrase) => {
                self.view_state.highlight.hover_enter(&phrase);
                self.quote_hover_live = true;
            }
            None => {
                if self.quote_hover_live {
                    self.view_state.highlight.hover_leave();
                    self.quote_hover_live = false;
                }
            }
        }
        for text in speak_clicks {
            self.speak_example(&text);
        }
    }
}

fn main() -> Result<(), eframe::Error> {
    let cli = Cli::parse();
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1600.0, 900.0])
            .with_min_inner_size([1000.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "TransTutor - 한중 번역 연습 도구",
        options,
        Box::new(move |cc| Box::new(TransTutorApp::new(cc, &cli))),
    )
}
