mod common;

use std::sync::atomic::Ordering;

use common::{create_test_db, pipeline, well_formed_reply, ScriptedBackend};
use passage_quiz::models::{ChoiceLetter, GeneratedAnswer, GeneratedQuestion};
use passage_quiz::{PersistenceWriter, ProcessResult, ResponseParser, GENERATION_FAILED_SENTINEL};

const PASSAGE: &str = "Honeybees live in colonies. Each colony has a single queen.";

#[tokio::test]
async fn test_upload_saves_seven_questions() {
    let db = create_test_db().await;
    let pipeline = pipeline(&db, vec![ScriptedBackend::ok("primary", &well_formed_reply(7))]);

    let outcome = pipeline.process_upload("Bees", Some(PASSAGE)).await.unwrap();
    assert_eq!(outcome.result, ProcessResult::Saved { questions: 7 });

    let questions = db.questions_for_document(outcome.document.id).await.unwrap();
    assert_eq!(questions.len(), 7);
    for (i, q) in questions.iter().enumerate() {
        assert_eq!(q.question.question_text, format!("What does paragraph {} say?", i + 1));
        assert_eq!(q.answers.len(), 4);
        assert_eq!(q.answers.iter().filter(|a| a.is_correct).count(), 1);
    }
}

#[tokio::test]
async fn test_fallback_model_used_when_primary_fails() {
    let db = create_test_db().await;
    let primary = ScriptedBackend::failing("primary", "429 quota exceeded");
    let fallback = ScriptedBackend::ok("fallback", &well_formed_reply(2));
    let (primary_calls, fallback_calls) = (primary.calls.clone(), fallback.calls.clone());

    let outcome = pipeline(&db, vec![primary, fallback])
        .process_upload("Bees", Some(PASSAGE))
        .await
        .unwrap();

    assert_eq!(outcome.result, ProcessResult::Saved { questions: 2 });
    assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
    assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_all_models_fail_upload_still_succeeds() {
    let db = create_test_db().await;
    let pipeline = pipeline(
        &db,
        vec![
            ScriptedBackend::failing("primary", "network unreachable"),
            ScriptedBackend::failing("fallback", "timeout"),
        ],
    );

    let outcome = pipeline.process_upload("Bees", Some(PASSAGE)).await.unwrap();

    assert_eq!(outcome.result, ProcessResult::GenerationFailed);
    assert_eq!(db.get_document(outcome.document.id).await.unwrap().title, "Bees");
    assert_eq!(db.questions_count(outcome.document.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_sentinel_parses_empty_and_persists_nothing() {
    let db = create_test_db().await;
    let document = db.create_document("doc", Some(PASSAGE)).await.unwrap();

    let parsed = ResponseParser::new().unwrap().parse(GENERATION_FAILED_SENTINEL);
    assert!(parsed.is_empty());

    assert!(PersistenceWriter::new(db.clone()).persist(&document, &parsed).await);
    assert_eq!(db.questions_count(document.id).await.unwrap(), 0);
    assert_eq!(db.answers_count(document.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_document_without_text_skips_generation() {
    let db = create_test_db().await;
    let backend = ScriptedBackend::ok("primary", &well_formed_reply(7));
    let calls = backend.calls.clone();

    let outcome = pipeline(&db, vec![backend])
        .process_upload("Empty", Some("   \n  "))
        .await
        .unwrap();

    assert_eq!(outcome.result, ProcessResult::NoText);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_regenerate_existing_document() {
    let db = create_test_db().await;
    let document = db.create_document("Bees", Some(PASSAGE)).await.unwrap();

    let outcome = pipeline(&db, vec![ScriptedBackend::ok("primary", &well_formed_reply(3))])
        .regenerate(document.id)
        .await
        .unwrap();

    assert_eq!(outcome.document.id, document.id);
    assert_eq!(outcome.result, ProcessResult::Saved { questions: 3 });

    let missing = pipeline(&db, vec![]).regenerate(document.id + 1).await;
    assert!(missing.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_persist_is_all_or_nothing() {
    let db = create_test_db().await;
    let document = db.create_document("doc", Some(PASSAGE)).await.unwrap();

    // 第一题及其选项写入后、第二题创建前注入故障
    sqlx::query(
        r#"
        CREATE TRIGGER fail_second_question BEFORE INSERT ON quiz_questions
        WHEN (SELECT COUNT(*) FROM quiz_questions WHERE document_id = NEW.document_id) >= 1
        BEGIN
            SELECT RAISE(ABORT, 'injected fault');
        END
        "#,
    )
    .execute(db.pool())
    .await
    .unwrap();

    let parsed = ResponseParser::new().unwrap().parse(&well_formed_reply(2));
    assert_eq!(parsed.len(), 2);

    let ok = PersistenceWriter::new(db.clone()).persist(&document, &parsed).await;

    assert!(!ok);
    assert_eq!(db.questions_count(document.id).await.unwrap(), 0);
    assert_eq!(db.answers_count(document.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_collapsed_choice_line_round_trip() {
    let db = create_test_db().await;
    let reply = "**1. Which insect makes honey?**\nA) Ant B) Honeybee C) Wasp D) Beetle\nAnswer: B";

    let outcome = pipeline(&db, vec![ScriptedBackend::ok("primary", reply)])
        .process_upload("Bees", Some(PASSAGE))
        .await
        .unwrap();

    let questions = db.questions_for_document(outcome.document.id).await.unwrap();
    let answers: Vec<(&str, &str, bool)> = questions[0]
        .answers
        .iter()
        .map(|a| (a.choice_letter.as_str(), a.choice_text.as_str(), a.is_correct))
        .collect();

    assert_eq!(
        answers,
        vec![
            ("A", "Ant", false),
            ("B", "Honeybee", true),
            ("C", "Wasp", false),
            ("D", "Beetle", false),
        ]
    );
}

#[test]
fn test_parse_runs_without_async_runtime() {
    let parsed = tokio_test::block_on(async {
        ResponseParser::new()
            .unwrap()
            .parse("**1. What is 2+2?**\nA) 3\nB) 4\nC) 5\nD) 6\nAnswer: B\n")
    });

    let mut expected = GeneratedQuestion::new("What is 2+2?");
    for (letter, text) in ChoiceLetter::ALL.into_iter().zip(["3", "4", "5", "6"]) {
        expected.answers.push(GeneratedAnswer::new(letter, text));
    }
    expected.mark_correct(ChoiceLetter::B);

    assert_eq!(parsed, vec![expected]);
}
