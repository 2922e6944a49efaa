//! 学生作答存储
//!
//! 以 `q-{id}` 为键保存每道题的当前答案，后写覆盖先写。

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{PortalError, Result};

static QUESTION_REF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^q-(-?\d+)$").expect("Invalid question ref regex"));

/// 题目引用，序列化为 `q-{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionRef(i64);

impl QuestionRef {
    pub fn new(question_id: i64) -> Self {
        QuestionRef(question_id)
    }

    pub fn question_id(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for QuestionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q-{}", self.0)
    }
}

impl FromStr for QuestionRef {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self> {
        QUESTION_REF_RE
            .captures(s)
            .and_then(|caps| caps[1].parse::<i64>().ok())
            .map(QuestionRef)
            .ok_or_else(|| PortalError::validation(format!("无效的题目引用: {s}")))
    }
}

impl Serialize for QuestionRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QuestionRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// 作答记录：题目引用 -> 答案文本
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerStore {
    entries: BTreeMap<QuestionRef, String>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_ref: &QuestionRef) -> Option<&str> {
        self.entries.get(question_ref).map(String::as_str)
    }

    /// 写入答案，覆盖已有值
    pub fn set(&mut self, question_ref: QuestionRef, value: impl Into<String>) {
        self.entries.insert(question_ref, value.into());
    }

    /// 当前答案的独立副本，之后的修改不会影响它
    pub fn snapshot(&self) -> AnswerStore {
        self.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionRef, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl FromIterator<(QuestionRef, String)> for AnswerStore {
    fn from_iter<I: IntoIterator<Item = (QuestionRef, String)>>(iter: I) -> Self {
        AnswerStore {
            entries: iter.into_iter().collect(),
        }
    }
}
