//! 动态工作表：结构、作答、渲染、会话与提交组装

pub mod answers;
pub mod assembler;
pub mod renderer;
pub mod schema;
pub mod session;

pub use answers::{AnswerStore, QuestionRef};
pub use assembler::SubmissionAssembler;
pub use renderer::{
    ChoiceOption, Control, InputEvent, InputOutcome, RenderedForm, RenderedQuestion, apply_input,
    render, split_blank,
};
pub use schema::{Question, QuestionBody, RawQuestion, RawWorksheetSchema, WorksheetSchema};
pub use session::{FormSession, FormSessions, SessionKey, SubmissionState};
