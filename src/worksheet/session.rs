//! 表单会话
//!
//! 每个 (学生, 作业) 对应一个会话，保存未提交的答案和提交状态。
//! 会话只存在于内存中：提交成功后即被丢弃，长时间未访问的会话由定期清理移除。
//! 已提交的工作表不进入会话表。

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::Serialize;
use ts_rs::TS;

use super::answers::AnswerStore;
use super::renderer::{self, InputEvent, InputOutcome, RenderedForm};
use super::schema::WorksheetSchema;
use crate::errors::{PortalError, Result};
use crate::models::submissions::entities::{Submission, SubmissionStatus};

/// 学生视角下的作答状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/worksheet.ts")]
pub enum SubmissionState {
    NotStarted,
    Submitted,
    Graded,
}

impl From<&SubmissionStatus> for SubmissionState {
    fn from(status: &SubmissionStatus) -> Self {
        match status {
            SubmissionStatus::Pending => SubmissionState::NotStarted,
            SubmissionStatus::Submitted => SubmissionState::Submitted,
            SubmissionStatus::Graded => SubmissionState::Graded,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormSession {
    schema: Arc<WorksheetSchema>,
    answers: AnswerStore,
    state: SubmissionState,
    in_flight: bool,
}

impl FormSession {
    pub fn new(schema: Arc<WorksheetSchema>) -> Self {
        Self {
            schema,
            answers: AnswerStore::new(),
            state: SubmissionState::NotStarted,
            in_flight: false,
        }
    }

    /// 根据已有的提交记录恢复会话
    pub fn resume(schema: Arc<WorksheetSchema>, prior: Option<&Submission>) -> Self {
        let mut session = Self::new(schema);
        if let Some(submission) = prior {
            session.state = SubmissionState::from(&submission.status);
            if let Some(answers) = &submission.text_answers {
                session.answers = answers.clone();
            }
        }
        session
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    /// 是否还可以作答（未提交过）
    pub fn is_open(&self) -> bool {
        self.state == SubmissionState::NotStarted
    }

    pub fn is_processing(&self) -> bool {
        self.in_flight
    }

    /// 已提交或正在提交时表单只读
    pub fn is_read_only(&self) -> bool {
        self.in_flight || self.state != SubmissionState::NotStarted
    }

    pub fn render(&self) -> RenderedForm {
        renderer::render(&self.schema, &self.answers, self.is_read_only())
    }

    pub fn apply(&mut self, events: &[InputEvent]) -> Vec<InputOutcome> {
        let read_only = self.is_read_only();
        events
            .iter()
            .map(|event| renderer::apply_input(&self.schema, &mut self.answers, read_only, event))
            .collect()
    }

    /// 开始提交，返回答案快照
    ///
    /// 同一会话同时只允许一次提交在进行。
    pub fn begin_submit(&mut self) -> Result<AnswerStore> {
        if self.in_flight {
            return Err(PortalError::submission_in_progress(
                "工作表正在提交中",
            ));
        }
        if self.state != SubmissionState::NotStarted {
            return Err(PortalError::already_submitted(
                "工作表已经提交过",
            ));
        }
        self.in_flight = true;
        Ok(self.answers.snapshot())
    }

    /// 结束提交；失败时保留答案以便重试
    pub fn finish_submit(&mut self, succeeded: bool) {
        self.in_flight = false;
        if succeeded {
            self.state = SubmissionState::Graded;
        }
    }
}

/// 会话键：(学生 ID, 作业 ID)
pub type SessionKey = (i64, i64);

struct SessionEntry {
    session: FormSession,
    last_access: Instant,
}

/// 所有活动会话
pub struct FormSessions {
    sessions: DashMap<SessionKey, SessionEntry>,
    idle_timeout: Duration,
}

impl Default for FormSessions {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT)
    }
}

/// 默认的会话空闲超时
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

impl FormSessions {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_timeout,
        }
    }

    pub fn contains(&self, key: &SessionKey) -> bool {
        self.sessions.contains_key(key)
    }

    /// 仅在会话不存在时插入，已有会话保持不变
    pub fn insert_if_absent(&self, key: SessionKey, session: FormSession) {
        self.sessions.entry(key).or_insert_with(|| SessionEntry {
            session,
            last_access: Instant::now(),
        });
    }

    /// 在会话上执行同步操作，不能跨越 await 持有
    pub fn with<R>(&self, key: &SessionKey, f: impl FnOnce(&mut FormSession) -> R) -> Option<R> {
        self.sessions.get_mut(key).map(|mut entry| {
            entry.last_access = Instant::now();
            f(&mut entry.session)
        })
    }

    /// 同 [`FormSessions::with`]，会话不存在时在 `fallback` 生成的临时会话上执行
    pub fn with_or_else<R>(
        &self,
        key: &SessionKey,
        fallback: impl FnOnce() -> FormSession,
        f: impl FnOnce(&mut FormSession) -> R,
    ) -> R {
        match self.sessions.get_mut(key) {
            Some(mut entry) => {
                entry.last_access = Instant::now();
                f(&mut entry.session)
            }
            None => f(&mut fallback()),
        }
    }

    /// 提交结束：成功则丢弃会话，失败则解除只读
    pub fn finish(&self, key: &SessionKey, succeeded: bool) {
        if succeeded {
            self.sessions.remove(key);
        } else if let Some(mut entry) = self.sessions.get_mut(key) {
            entry.session.finish_submit(false);
        }
    }

    /// 移除超过空闲时间的会话，正在提交的会话保留；返回移除数量
    pub fn evict_idle(&self) -> usize {
        let before = self.sessions.len();
        let idle_timeout = self.idle_timeout;
        self.sessions.retain(|_, entry| {
            entry.session.is_processing() || entry.last_access.elapsed() < idle_timeout
        });
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheet::answers::QuestionRef;
    use crate::worksheet::schema::{RawQuestion, RawWorksheetSchema};

    fn schema() -> Arc<WorksheetSchema> {
        let schema = WorksheetSchema::try_from(RawWorksheetSchema {
            title: "Grammar Worksheet 1".to_string(),
            instructions: "Complete the worksheet.".to_string(),
            questions: vec![
                RawQuestion {
                    id: 1,
                    kind: "fill-blank".to_string(),
                    prompt: "The cat is sleeping ____ the table.".to_string(),
                    options: None,
                    lines: None,
                },
                RawQuestion {
                    id: 2,
                    kind: "true-false".to_string(),
                    prompt: "'Its' and 'It's' mean the same thing.".to_string(),
                    options: None,
                    lines: None,
                },
            ],
        })
        .unwrap();
        Arc::new(schema)
    }

    fn event(id: i64, value: &str) -> InputEvent {
        InputEvent {
            question_ref: QuestionRef::new(id),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_second_submit_rejected_while_in_flight() {
        let mut session = FormSession::new(schema());
        session.apply(&[event(1, "on")]);
        let snapshot = session.begin_submit().unwrap();
        assert_eq!(snapshot.get(&QuestionRef::new(1)), Some("on"));

        let err = session.begin_submit().unwrap_err();
        assert!(matches!(err, PortalError::SubmissionInProgress(_)));
    }

    #[test]
    fn test_input_ignored_while_in_flight() {
        let mut session = FormSession::new(schema());
        session.apply(&[event(1, "on")]);
        let snapshot = session.begin_submit().unwrap();

        let outcomes = session.apply(&[event(1, "under")]);
        assert_eq!(outcomes, vec![InputOutcome::ReadOnly]);
        assert_eq!(session.answers(), &snapshot);
        assert!(session.render().read_only);
    }

    #[test]
    fn test_failed_submit_keeps_answers_and_allows_retry() {
        let mut session = FormSession::new(schema());
        session.apply(&[event(1, "on"), event(2, "False")]);
        let before = session.answers().clone();

        session.begin_submit().unwrap();
        session.finish_submit(false);

        assert_eq!(session.state(), SubmissionState::NotStarted);
        assert_eq!(session.answers(), &before);
        assert!(!session.render().read_only);
        assert!(session.begin_submit().is_ok());
    }

    #[test]
    fn test_successful_submit_makes_form_read_only() {
        let mut session = FormSession::new(schema());
        session.begin_submit().unwrap();
        session.finish_submit(true);
        assert_eq!(session.state(), SubmissionState::Graded);
        assert!(session.render().read_only);
        assert!(matches!(
            session.begin_submit(),
            Err(PortalError::AlreadySubmitted(_))
        ));
    }

    #[test]
    fn test_registry_discards_session_on_success() {
        let sessions = FormSessions::default();
        let key = (7, 1);
        sessions.insert_if_absent(key, FormSession::new(schema()));
        sessions.with(&key, |s| s.apply(&[event(2, "True")]));

        // 已存在的会话不会被覆盖
        sessions.insert_if_absent(key, FormSession::new(schema()));
        let value = sessions.with(&key, |s| s.answers().get(&QuestionRef::new(2)).map(str::to_string));
        assert_eq!(value, Some(Some("True".to_string())));

        sessions.with(&key, |s| s.begin_submit()).unwrap().unwrap();
        sessions.finish(&key, false);
        assert!(sessions.with(&key, |s| !s.is_processing()).unwrap());

        sessions.with(&key, |s| s.begin_submit()).unwrap().unwrap();
        sessions.finish(&key, true);
        assert!(!sessions.contains(&key));
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_idle_sessions_are_evicted() {
        let sessions = FormSessions::new(Duration::ZERO);
        sessions.insert_if_absent((1, 1), FormSession::new(schema()));
        sessions.insert_if_absent((2, 1), FormSession::new(schema()));
        sessions.with(&(2, 1), |s| s.begin_submit()).unwrap().unwrap();

        // 正在提交的会话不会被清理
        assert_eq!(sessions.evict_idle(), 1);
        assert!(!sessions.contains(&(1, 1)));
        assert!(sessions.contains(&(2, 1)));

        sessions.finish(&(2, 1), false);
        assert_eq!(sessions.evict_idle(), 1);
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_recently_used_sessions_survive_eviction() {
        let sessions = FormSessions::new(Duration::from_secs(600));
        sessions.insert_if_absent((1, 1), FormSession::new(schema()));
        assert_eq!(sessions.evict_idle(), 0);
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn test_fallback_session_is_not_registered() {
        let sessions = FormSessions::default();
        let outcomes = sessions.with_or_else(
            &(3, 1),
            || {
                let mut closed = FormSession::new(schema());
                closed.begin_submit().unwrap();
                closed.finish_submit(true);
                closed
            },
            |s| s.apply(&[event(1, "on")]),
        );
        assert_eq!(outcomes, vec![InputOutcome::ReadOnly]);
        assert!(sessions.is_empty());

        sessions.insert_if_absent((3, 1), FormSession::new(schema()));
        let outcomes = sessions.with_or_else(&(3, 1), || FormSession::new(schema()), |s| {
            s.apply(&[event(1, "on")])
        });
        assert_eq!(outcomes, vec![InputOutcome::Applied]);
    }

    #[test]
    fn test_resumed_graded_session_is_closed() {
        let prior = Submission {
            id: 1,
            assignment_id: 1,
            student_id: 1,
            status: SubmissionStatus::Graded,
            content_ref: None,
            text_answers: None,
            feedback: None,
            submitted_at: chrono::Utc::now(),
            graded_at: Some(chrono::Utc::now()),
        };
        assert!(!FormSession::resume(schema(), Some(&prior)).is_open());
        assert!(FormSession::resume(schema(), None).is_open());
    }
}
