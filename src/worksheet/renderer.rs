//! 表单渲染
//!
//! 把工作表结构和当前答案组合成一棵与界面无关的控件树，
//! 并把学生的输入事件落到作答存储上。渲染本身是纯函数。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::answers::{AnswerStore, QuestionRef};
use super::schema::{BLANK_MARKER, Question, QuestionBody, WorksheetSchema};

/// 判断题的固定选项顺序
pub const TRUE_FALSE_OPTIONS: [&str; 2] = ["True", "False"];

/// 渲染后的整张表单
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/worksheet.ts")]
pub struct RenderedForm {
    pub title: String,
    pub instructions: String,
    pub read_only: bool,
    pub questions: Vec<RenderedQuestion>,
}

/// 单道题的渲染结果，`number` 从 1 开始
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/worksheet.ts")]
pub struct RenderedQuestion {
    pub number: usize,
    #[ts(type = "string")]
    pub question_ref: QuestionRef,
    pub heading: String,
    pub prompt: String,
    pub control: Control,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/worksheet.ts")]
pub struct ChoiceOption {
    pub value: String,
    pub checked: bool,
}

/// 输入控件
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/worksheet.ts")]
pub enum Control {
    /// 填空：空位前后的文本加一个行内输入框
    InlineText {
        leading: String,
        trailing: String,
        value: String,
        disabled: bool,
    },
    /// 单选组，选择题和判断题共用
    Choice {
        options: Vec<ChoiceOption>,
        disabled: bool,
    },
    TextArea {
        rows: u32,
        value: String,
        disabled: bool,
    },
    /// 不支持的题型，只显示占位提示
    Unsupported { kind: String, placeholder: String },
}

/// 学生对某道题的一次输入
#[derive(Debug, Clone, PartialEq, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/worksheet.ts")]
pub struct InputEvent {
    #[ts(type = "string")]
    pub question_ref: QuestionRef,
    pub value: String,
}

/// 输入事件的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/worksheet.ts")]
pub enum InputOutcome {
    Applied,
    /// 表单只读，输入被忽略
    ReadOnly,
    UnknownQuestion,
    /// 题型不接受输入
    NoInputCapture,
    /// 值不在选项列表中
    InvalidOption,
}

/// 在第一个空位标记处切分填空题题干，并去掉两侧空白
///
/// 题干没有标记时整段作为前半部分，后半部分为空。
pub fn split_blank(prompt: &str) -> (&str, &str) {
    match prompt.split_once(BLANK_MARKER) {
        Some((leading, trailing)) => (leading.trim(), trailing.trim()),
        None => (prompt.trim(), ""),
    }
}

/// 渲染整张表单
pub fn render(schema: &WorksheetSchema, answers: &AnswerStore, is_submitted: bool) -> RenderedForm {
    let questions = schema
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let question_ref = QuestionRef::new(question.id);
            RenderedQuestion {
                number: index + 1,
                question_ref,
                heading: format!("Question {}", index + 1),
                prompt: question.prompt.clone(),
                control: render_control(question, answers.get(&question_ref), is_submitted),
            }
        })
        .collect();

    RenderedForm {
        title: schema.title().to_string(),
        instructions: schema.instructions().to_string(),
        read_only: is_submitted,
        questions,
    }
}

fn render_control(question: &Question, value: Option<&str>, disabled: bool) -> Control {
    let value = value.unwrap_or_default();
    match &question.body {
        QuestionBody::FillBlank => {
            let (leading, trailing) = split_blank(&question.prompt);
            Control::InlineText {
                leading: leading.to_string(),
                trailing: trailing.to_string(),
                value: value.to_string(),
                disabled,
            }
        }
        QuestionBody::MultipleChoice { options } => Control::Choice {
            options: choice_options(options.iter().map(String::as_str), value),
            disabled,
        },
        QuestionBody::TrueFalse => Control::Choice {
            options: choice_options(TRUE_FALSE_OPTIONS.into_iter(), value),
            disabled,
        },
        QuestionBody::ShortAnswer { lines } | QuestionBody::LongAnswer { lines } => {
            Control::TextArea {
                rows: *lines,
                value: value.to_string(),
                disabled,
            }
        }
        QuestionBody::Unsupported { kind } => Control::Unsupported {
            kind: kind.clone(),
            placeholder: format!("Unsupported question type: {kind}"),
        },
    }
}

fn choice_options<'a>(options: impl Iterator<Item = &'a str>, selected: &str) -> Vec<ChoiceOption> {
    options
        .map(|option| ChoiceOption {
            value: option.to_string(),
            checked: option == selected,
        })
        .collect()
}

/// 处理一次输入事件
///
/// 只读表单、未知题目、不支持的题型和不在选项中的值都不会修改作答存储。
pub fn apply_input(
    schema: &WorksheetSchema,
    answers: &mut AnswerStore,
    is_submitted: bool,
    event: &InputEvent,
) -> InputOutcome {
    if is_submitted {
        return InputOutcome::ReadOnly;
    }
    let Some(question) = schema.question(event.question_ref.question_id()) else {
        return InputOutcome::UnknownQuestion;
    };

    let accepted = match &question.body {
        QuestionBody::Unsupported { .. } => return InputOutcome::NoInputCapture,
        QuestionBody::MultipleChoice { options } => options.iter().any(|o| *o == event.value),
        QuestionBody::TrueFalse => TRUE_FALSE_OPTIONS.contains(&event.value.as_str()),
        _ => true,
    };
    if !accepted {
        return InputOutcome::InvalidOption;
    }

    answers.set(event.question_ref, event.value.clone());
    InputOutcome::Applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheet::schema::{RawQuestion, RawWorksheetSchema};

    fn solar_system() -> WorksheetSchema {
        let question = |id: i64, kind: &str, prompt: &str| RawQuestion {
            id,
            kind: kind.to_string(),
            prompt: prompt.to_string(),
            options: None,
            lines: None,
        };
        let mut mc = question(2, "multiple-choice", "Which planet is known as the Red Planet?");
        mc.options = Some(vec!["Venus".into(), "Mars".into(), "Jupiter".into()]);
        let mut short = question(3, "short-answer", "Why do we have seasons?");
        short.lines = Some(4);

        WorksheetSchema::try_from(RawWorksheetSchema {
            title: "Science Worksheet: The Solar System".to_string(),
            instructions: "Answer the following questions.".to_string(),
            questions: vec![
                question(1, "fill-blank", "The planet closest to the sun is ____."),
                mc,
                short,
                question(4, "true-false", "Earth is the largest planet in our solar system."),
                question(5, "long-answer", "Describe the water cycle."),
                question(6, "matching", "Match the moons to their planets."),
            ],
        })
        .unwrap()
    }

    fn event(id: i64, value: &str) -> InputEvent {
        InputEvent {
            question_ref: QuestionRef::new(id),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_split_blank() {
        assert_eq!(
            split_blank("The planet closest to the sun is ____."),
            ("The planet closest to the sun is", ".")
        );
        assert_eq!(
            split_blank("The cat is sleeping ____ the table."),
            ("The cat is sleeping", "the table.")
        );
        assert_eq!(split_blank("  No marker here  "), ("No marker here", ""));
        assert_eq!(split_blank("____ first"), ("", "first"));
        assert_eq!(split_blank("a ____ b ____ c"), ("a", "b ____ c"));
    }

    #[test]
    fn test_render_preserves_order_and_numbering() {
        let form = render(&solar_system(), &AnswerStore::new(), false);
        assert_eq!(form.questions.len(), 6);
        for (i, q) in form.questions.iter().enumerate() {
            assert_eq!(q.number, i + 1);
            assert_eq!(q.heading, format!("Question {}", i + 1));
            assert_eq!(q.question_ref, QuestionRef::new(i as i64 + 1));
        }
        assert!(!form.read_only);
    }

    #[test]
    fn test_fill_blank_control() {
        let mut answers = AnswerStore::new();
        answers.set(QuestionRef::new(1), "Mercury");
        let form = render(&solar_system(), &answers, false);
        assert_eq!(
            form.questions[0].control,
            Control::InlineText {
                leading: "The planet closest to the sun is".to_string(),
                trailing: ".".to_string(),
                value: "Mercury".to_string(),
                disabled: false,
            }
        );
    }

    #[test]
    fn test_choice_controls_check_at_most_one() {
        let mut answers = AnswerStore::new();
        answers.set(QuestionRef::new(2), "Mars");
        answers.set(QuestionRef::new(4), "False");
        let form = render(&solar_system(), &answers, false);

        let Control::Choice { options, .. } = &form.questions[1].control else {
            panic!("expected choice control");
        };
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["Venus", "Mars", "Jupiter"]);
        assert_eq!(options.iter().filter(|o| o.checked).count(), 1);
        assert!(options[1].checked);

        let Control::Choice { options, .. } = &form.questions[3].control else {
            panic!("expected choice control");
        };
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, TRUE_FALSE_OPTIONS.to_vec());
        assert!(!options[0].checked);
        assert!(options[1].checked);
    }

    #[test]
    fn test_unanswered_choice_has_nothing_checked() {
        let form = render(&solar_system(), &AnswerStore::new(), false);
        let Control::Choice { options, .. } = &form.questions[1].control else {
            panic!("expected choice control");
        };
        assert!(options.iter().all(|o| !o.checked));
    }

    #[test]
    fn test_text_area_rows() {
        let form = render(&solar_system(), &AnswerStore::new(), false);
        assert!(matches!(
            form.questions[2].control,
            Control::TextArea { rows: 4, .. }
        ));
        assert!(matches!(
            form.questions[4].control,
            Control::TextArea { rows: 6, .. }
        ));
    }

    #[test]
    fn test_unsupported_placeholder() {
        let form = render(&solar_system(), &AnswerStore::new(), false);
        assert_eq!(
            form.questions[5].control,
            Control::Unsupported {
                kind: "matching".to_string(),
                placeholder: "Unsupported question type: matching".to_string(),
            }
        );
    }

    #[test]
    fn test_submitted_form_disables_every_control() {
        let form = render(&solar_system(), &AnswerStore::new(), true);
        assert!(form.read_only);
        for q in &form.questions {
            match &q.control {
                Control::InlineText { disabled, .. }
                | Control::Choice { disabled, .. }
                | Control::TextArea { disabled, .. } => assert!(*disabled),
                Control::Unsupported { .. } => {}
            }
        }
    }

    #[test]
    fn test_submitted_form_ignores_input() {
        let schema = solar_system();
        let mut answers = AnswerStore::new();
        answers.set(QuestionRef::new(1), "Mercury");
        let before = answers.clone();
        let outcome = apply_input(&schema, &mut answers, true, &event(1, "Venus"));
        assert_eq!(outcome, InputOutcome::ReadOnly);
        assert_eq!(answers, before);
    }

    #[test]
    fn test_apply_input_outcomes() {
        let schema = solar_system();
        let mut answers = AnswerStore::new();
        assert_eq!(
            apply_input(&schema, &mut answers, false, &event(2, "Mars")),
            InputOutcome::Applied
        );
        assert_eq!(
            apply_input(&schema, &mut answers, false, &event(2, "Pluto")),
            InputOutcome::InvalidOption
        );
        assert_eq!(
            apply_input(&schema, &mut answers, false, &event(4, "Maybe")),
            InputOutcome::InvalidOption
        );
        assert_eq!(
            apply_input(&schema, &mut answers, false, &event(6, "a-b")),
            InputOutcome::NoInputCapture
        );
        assert_eq!(
            apply_input(&schema, &mut answers, false, &event(99, "x")),
            InputOutcome::UnknownQuestion
        );
        assert_eq!(answers.len(), 1);
        assert_eq!(answers.get(&QuestionRef::new(2)), Some("Mars"));
    }

    #[test]
    fn test_choice_replaces_previous_selection() {
        let schema = solar_system();
        let mut answers = AnswerStore::new();
        apply_input(&schema, &mut answers, false, &event(2, "Venus"));
        apply_input(&schema, &mut answers, false, &event(2, "Jupiter"));
        let form = render(&schema, &answers, false);
        let Control::Choice { options, .. } = &form.questions[1].control else {
            panic!("expected choice control");
        };
        let checked: Vec<&str> = options
            .iter()
            .filter(|o| o.checked)
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(checked, vec!["Jupiter"]);
    }

    #[test]
    fn test_edits_to_distinct_questions_commute() {
        let schema = solar_system();
        let events = [
            event(1, "Mercury"),
            event(2, "Mars"),
            event(3, "Because of the tilt of the axis."),
        ];
        let orders = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];

        let mut results = orders.iter().map(|order| {
            let mut answers = AnswerStore::new();
            for &i in order {
                apply_input(&schema, &mut answers, false, &events[i]);
            }
            answers
        });
        let first = results.next().unwrap();
        assert!(results.all(|answers| answers == first));
    }

    #[test]
    fn test_render_serializes_with_control_type() {
        let form = render(&solar_system(), &AnswerStore::new(), false);
        let json = serde_json::to_value(&form).unwrap();
        let first = &json["questions"][0];
        assert_eq!(first["question_ref"], "q-1");
        assert_eq!(first["control"]["type"], "inline_text");
        assert_eq!(first["control"]["leading"], "The planet closest to the sun is");
        assert_eq!(json["questions"][2]["control"]["type"], "text_area");
        assert!(json["questions"][0]["control"].get("control").is_none());
    }
}
