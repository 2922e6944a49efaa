//! 演示数据
//!
//! 空库启动时写入一名管理员、一名教师、三名学生，
//! 一份视频作业、一份带表单结构的工作表和一份没有结构的工作表。

use chrono::{TimeDelta, Utc};
use tracing::{debug, info, warn};

use crate::models::assignments::{entities::AssignmentKind, requests::CreateAssignmentRequest};
use crate::models::submissions::{entities::Feedback, requests::CreateSubmissionRequest};
use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
use crate::storage::Storage;
use crate::worksheet::WorksheetSchema;

const GRAMMAR_WORKSHEET: &str = r#"{
    "title": "Grammar Worksheet 1",
    "instructions": "Complete the sentences and answer the questions.",
    "questions": [
        {"id": 1, "type": "fill-in-the-blank", "question": "The cat is sleeping ____ the table."},
        {"id": 2, "type": "multiple_choice", "question": "Which of these is a correct sentence?",
         "options": ["The dogs runs fast.", "The dogs run fast.", "The dogs is running fast."]},
        {"id": 3, "type": "true_false", "question": "'Its' and 'It's' mean the same thing."}
    ]
}"#;

async fn is_empty(storage: &dyn Storage) -> crate::errors::Result<bool> {
    for role in UserRole::all_roles() {
        if storage.count_users_by_role(**role).await? > 0 {
            return Ok(false);
        }
    }
    Ok(true)
}

/// 写入演示数据，数据库已有用户时跳过
pub async fn seed_demo_data(storage: &dyn Storage) {
    match is_empty(storage).await {
        Ok(true) => info!("Empty database, seeding demo data..."),
        Ok(false) => {
            debug!("Database already has users, skipping demo seed");
            return;
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping demo seed", e);
            return;
        }
    }

    if let Err(e) = seed(storage).await {
        warn!("Failed to seed demo data: {}", e);
    }
}

async fn seed(storage: &dyn Storage) -> crate::errors::Result<()> {
    storage
        .create_user(CreateUserRequest::staff(UserRole::Admin, "admin", "Admin User"))
        .await?;
    let teacher = storage
        .create_user(CreateUserRequest::staff(
            UserRole::Teacher,
            "T001",
            "Mr. Smith",
        ))
        .await?;
    storage
        .create_user(CreateUserRequest::student("S001", "Alice", "S001", "5", "A"))
        .await?;
    let bob = storage
        .create_user(CreateUserRequest::student("S002", "Bob", "S002", "5", "A"))
        .await?;
    storage
        .create_user(CreateUserRequest::student("S003", "Charlie", "S003", "5", "B"))
        .await?;

    let now = Utc::now();
    let homework = storage
        .create_assignment(
            teacher.id,
            CreateAssignmentRequest {
                title: "Prepositions Video Homework".into(),
                kind: AssignmentKind::Homework,
                class_name: "5".into(),
                section: "A".into(),
                instructions: "Record a 30-60 second video where you describe your room using at \
                               least 3 prepositions (e.g., in, on, under, next to)."
                    .into(),
                due_date: now + TimeDelta::days(7),
                form_schema: None,
                source_document: None,
            },
        )
        .await?;

    storage
        .create_assignment(
            teacher.id,
            CreateAssignmentRequest {
                title: "Grammar Worksheet 1".into(),
                kind: AssignmentKind::Worksheet,
                class_name: "5".into(),
                section: "A".into(),
                instructions: "Complete all parts of the worksheet. Focus on subject-verb \
                               agreement and proper noun capitalization."
                    .into(),
                due_date: now + TimeDelta::days(5),
                form_schema: Some(WorksheetSchema::from_json(GRAMMAR_WORKSHEET)?),
                source_document: None,
            },
        )
        .await?;

    storage
        .create_assignment(
            teacher.id,
            CreateAssignmentRequest {
                title: "Vocabulary Worksheet".into(),
                kind: AssignmentKind::Worksheet,
                class_name: "5".into(),
                section: "B".into(),
                instructions: "Fill in the blanks with the correct words from the word bank."
                    .into(),
                due_date: now + TimeDelta::days(3),
                form_schema: None,
                source_document: None,
            },
        )
        .await?;

    // Bob 已经完成并评分的视频作业
    let mut graded = CreateSubmissionRequest::homework(homework.id, bob.id, "bob_room_tour.mp4");
    graded.submitted_at = now - TimeDelta::days(2);
    graded.attach_feedback(Feedback {
        score: 85,
        summary: "Great job, Bob! Your video was clear and you used prepositions correctly."
            .into(),
        detailed_feedback: "You successfully used \"on\", \"under\", and \"in\". Your \
                            pronunciation was very clear. Next time, try to speak a bit more \
                            slowly."
            .into(),
    });
    storage.create_submission(graded).await?;

    info!("Demo data seeded: 5 users, 3 assignments, 1 submission");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    #[tokio::test]
    async fn test_seed_populates_empty_database_once() {
        let storage = SeaOrmStorage::connect_memory().await.unwrap();

        seed_demo_data(&storage).await;
        seed_demo_data(&storage).await;

        assert_eq!(storage.count_users_by_role(UserRole::Student).await.unwrap(), 3);
        assert_eq!(storage.count_users_by_role(UserRole::Teacher).await.unwrap(), 1);
        assert_eq!(storage.count_assignments().await.unwrap(), 3);
        assert_eq!(storage.count_submissions().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_seeded_worksheets() {
        let storage = SeaOrmStorage::connect_memory().await.unwrap();
        seed_demo_data(&storage).await;

        let worksheets = storage
            .list_assignments(crate::models::assignments::requests::AssignmentListQuery {
                kind: Some(AssignmentKind::Worksheet),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(worksheets.len(), 2);

        let grammar = worksheets
            .iter()
            .find(|a| a.title == "Grammar Worksheet 1")
            .unwrap();
        let schema = grammar.worksheet_schema().unwrap().unwrap();
        assert_eq!(schema.questions().len(), 3);

        let vocabulary = worksheets
            .iter()
            .find(|a| a.title == "Vocabulary Worksheet")
            .unwrap();
        assert!(vocabulary.worksheet_schema().unwrap().is_none());
    }
}
