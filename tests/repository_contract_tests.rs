mod common;

use std::thread::sleep;
use std::time::Duration;

use sathelp_server::{
    errors::AppError,
    models::domain::{
        essay::EssayType, ChatInteraction, Essay, Question, Quiz, QuizResult, Tier, User,
    },
    repositories::{
        ChatInteractionRepository, EssayRepository, QuizRepository, QuizResultRepository,
        UserRepository,
    },
    services::scoring::ScoreSummary,
};

use common::{
    InMemoryChatInteractionRepository, InMemoryEssayRepository, InMemoryQuizRepository,
    InMemoryQuizResultRepository, InMemoryUserRepository,
};

fn make_quiz(topic: &str) -> Quiz {
    let questions = vec![
        Question::placeholder(topic, None, Tier::Easy),
        Question::placeholder(topic, None, Tier::Medium),
    ];
    Quiz::new(topic, "easy", questions, Some("user-a"))
}

fn make_result(user_id: &str, topic: &str, correct: u32) -> QuizResult {
    let summary = ScoreSummary {
        score: 600,
        total: 2,
        correct,
        ..Default::default()
    };
    QuizResult::from_summary(user_id, "quiz-1", topic, &summary)
}

async fn user_repository_contract(repo: &dyn UserRepository) {
    let user = User::new("alice@example.com", "hash".to_string());
    repo.create(user.clone()).await.expect("create user");

    let duplicate = repo
        .create(User::new("alice@example.com", "other".to_string()))
        .await;
    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));

    let by_email = repo
        .find_by_email("alice@example.com")
        .await
        .expect("find by email should work");
    assert_eq!(by_email.map(|u| u.id), Some(user.id.clone()));

    let by_id = repo.find_by_id(&user.id).await.expect("find by id should work");
    assert!(by_id.is_some());

    let missing = repo
        .find_by_email("nobody@example.com")
        .await
        .expect("find by email should work");
    assert!(missing.is_none());
}

async fn quiz_repository_contract(repo: &dyn QuizRepository) {
    let older = make_quiz("algebra");
    sleep(Duration::from_millis(5));
    let newer = make_quiz("geometry");

    repo.create(older.clone()).await.expect("create older");
    repo.create(newer.clone()).await.expect("create newer");

    let duplicate = repo.create(older.clone()).await;
    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));

    let found = repo
        .find_by_id(&older.id)
        .await
        .expect("find should work")
        .expect("quiz should exist");
    assert_eq!(found.questions, older.questions);

    let (first_page, total) = repo.list(0, 1).await.expect("pagination should work");
    assert_eq!(total, 2);
    assert_eq!(first_page.len(), 1);
    assert_eq!(first_page[0].id, newer.id);

    let (past_end, total) = repo.list(5, 10).await.expect("pagination should work");
    assert_eq!(total, 2);
    assert!(past_end.is_empty());

    assert!(repo.find_by_id("missing").await.expect("find should work").is_none());
}

async fn quiz_result_repository_contract(repo: &dyn QuizResultRepository) {
    let first = make_result("user-a", "algebra", 1);
    let second = make_result("user-a", "geometry", 2);
    let other_user = make_result("user-b", "algebra", 2);

    repo.create(first.clone()).await.expect("create first");
    repo.create(second.clone()).await.expect("create second");
    repo.create(other_user).await.expect("create other");

    let all = repo
        .list_by_user("user-a", None)
        .await
        .expect("list should work");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, second.id, "newest first");

    let algebra = repo
        .list_by_user("user-a", Some("algebra"))
        .await
        .expect("filtered list should work");
    assert_eq!(algebra.len(), 1);
    assert_eq!(algebra[0].id, first.id);

    let none = repo
        .list_by_user("user-c", None)
        .await
        .expect("list should work");
    assert!(none.is_empty());
}

async fn essay_repository_contract(repo: &dyn EssayRepository) {
    let essay = Essay::new("user-a", "My essay", "Nice", EssayType::CollegeApp);
    let cv = Essay::new("user-a", "My CV", "Tidy", EssayType::CvResume);
    repo.create(essay.clone()).await.expect("create essay");
    repo.create(cv.clone()).await.expect("create cv");
    repo.create(Essay::new("user-b", "Theirs", "Ok", EssayType::Sat))
        .await
        .expect("create other");

    let found = repo.find_by_id(&essay.id).await.expect("find should work");
    assert_eq!(found.map(|e| e.content), Some("My essay".to_string()));

    let mine = repo.list_by_user("user-a").await.expect("list should work");
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].id, cv.id);
}

async fn chat_repository_contract(repo: &dyn ChatInteractionRepository) {
    for n in 0..5 {
        repo.create(ChatInteraction::new("user-a", &format!("q{}", n), "a"))
            .await
            .expect("create interaction");
    }
    repo.create(ChatInteraction::new("user-b", "other", "a"))
        .await
        .expect("create other");

    let recent = repo
        .recent_by_user("user-a", 0, 3)
        .await
        .expect("recent should work");
    let messages: Vec<&str> = recent.iter().map(|i| i.message.as_str()).collect();
    assert_eq!(messages, vec!["q4", "q3", "q2"]);

    let older = repo
        .recent_by_user("user-a", 3, 3)
        .await
        .expect("recent should work");
    assert_eq!(older.len(), 2);
}

#[tokio::test]
async fn in_memory_user_repository_honours_contract() {
    user_repository_contract(&InMemoryUserRepository::default()).await;
}

#[tokio::test]
async fn in_memory_quiz_repository_honours_contract() {
    quiz_repository_contract(&InMemoryQuizRepository::default()).await;
}

#[tokio::test]
async fn in_memory_quiz_result_repository_honours_contract() {
    quiz_result_repository_contract(&InMemoryQuizResultRepository::default()).await;
}

#[tokio::test]
async fn in_memory_essay_repository_honours_contract() {
    essay_repository_contract(&InMemoryEssayRepository::default()).await;
}

#[tokio::test]
async fn in_memory_chat_repository_honours_contract() {
    chat_repository_contract(&InMemoryChatInteractionRepository::default()).await;
}
