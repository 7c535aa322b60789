//! Concrete portal resource types.
//!
//! # Design
//! These are the record shapes the portal's views work with, each paired
//! with its `Create`/`Update` payload types. They mirror the mock-server's
//! schema but are defined independently; integration tests catch schema
//! drift. The generic machinery in `client`/`store` never looks at these —
//! it only sees the `Resource` trait.
//!
//! Update payloads are all-optional with `skip_serializing_if`, so a PUT
//! body only names the fields the caller wants changed.

use serde::{Deserialize, Serialize};

use crate::resource::Resource;

/// Lifecycle phase of an exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamStatus {
    Upcoming,
    Live,
    Completed,
}

/// A scheduled competition exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub duration_minutes: u32,
    pub status: ExamStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExam {
    pub title: String,
    pub description: String,
    pub category: String,
    pub duration_minutes: u32,
    #[serde(default = "upcoming")]
    pub status: ExamStatus,
}

fn upcoming() -> ExamStatus {
    ExamStatus::Upcoming
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExamPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ExamStatus>,
}

impl Resource for Exam {
    type Create = NewExam;
    type Update = ExamPatch;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Role a platform account acts under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Moderator,
    Participant,
}

/// A platform account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl Resource for User {
    type Create = NewUser;
    type Update = UserPatch;

    fn id(&self) -> &str {
        &self.id
    }
}

/// A multiple-choice question belonging to an exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub exam_id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: u32,
    pub points: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuestion {
    pub exam_id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: u32,
    pub points: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_option: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

impl Resource for Question {
    type Create = NewQuestion;
    type Update = QuestionPatch;

    fn id(&self) -> &str {
        &self.id
    }
}

/// One participant's outcome for one exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamResult {
    pub id: String,
    pub user_id: String,
    pub exam_id: String,
    pub score: u32,
    pub correct_answers: u32,
    pub time_spent_seconds: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExamResult {
    pub user_id: String,
    pub exam_id: String,
    pub score: u32,
    pub correct_answers: u32,
    pub time_spent_seconds: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExamResultPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_spent_seconds: Option<u32>,
}

impl Resource for ExamResult {
    type Create = NewExamResult;
    type Update = ExamResultPatch;

    fn id(&self) -> &str {
        &self.id
    }
}
