//! Tutoring Pipeline Integration Tests
//!
//! Drives `TutorOrchestrator` end to end against a recording model.

use std::time::Duration;

use tutor_cascade::services::tutor::{
    ChatTurn, QueryCategory, QueryClassifier, Stage, TutorError, TutorOrchestrator,
};
use tutor_cascade_core::UserProfile;

use crate::support::{png_bytes, server_error, RecordingModel};

fn profile(verbal: f64, non_verbal: f64, self_assessment: f64, age: i64) -> UserProfile {
    UserProfile {
        verbal_score: verbal,
        non_verbal_score: non_verbal,
        self_assessment,
        age,
    }
}

// ============================================================================
// Branching
// ============================================================================

#[tokio::test]
async fn test_coding_query_makes_exactly_one_call() {
    let model = RecordingModel::replying(&["What should the loop compare?"]);
    let orchestrator = TutorOrchestrator::new(model.clone(), model.clone()).unwrap();

    let outcome = orchestrator
        .get_chat_response(ChatTurn::new("How do I reverse a string in Python?"))
        .await
        .unwrap();

    assert_eq!(outcome.branch, QueryCategory::Coding);
    assert_eq!(outcome.response, "What should the loop compare?");

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("\"Coding Agent.\""));
    assert!(prompts[0].contains("USER QUERY: How do I reverse a string in Python?"));
}

#[tokio::test]
async fn test_coding_query_ignores_image_and_profile() {
    let model = RecordingModel::replying(&["Socratic reply"]);
    let orchestrator = TutorOrchestrator::new(model.clone(), model.clone()).unwrap();

    let turn = ChatTurn::new("my CPP code crashes")
        .with_image(png_bytes())
        .with_profile(Some(profile(1.0, 2.0, 3.0, 13)));
    let outcome = orchestrator.get_chat_response(turn).await.unwrap();

    assert_eq!(outcome.response, "Socratic reply");
    let calls = model.calls();
    assert_eq!(calls.len(), 1);
    assert!(!calls[0].had_image);
}

#[tokio::test]
async fn test_general_query_runs_three_stages_in_order() {
    let model = RecordingModel::replying(&["PLAN-OUT", "ANALYSIS-OUT", "FINAL"]);
    let orchestrator = TutorOrchestrator::new(model.clone(), model.clone()).unwrap();

    let outcome = orchestrator
        .get_chat_response(ChatTurn::new("Why do seasons change?"))
        .await
        .unwrap();

    assert_eq!(outcome.branch, QueryCategory::General);
    assert_eq!(outcome.response, "FINAL");
    assert_eq!(outcome.planning_output.as_deref(), Some("PLAN-OUT"));
    assert_eq!(outcome.final_analysis.as_deref(), Some("ANALYSIS-OUT"));
    assert_eq!(outcome.vision_analysis, None);

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 3);
    assert!(prompts[0].contains("\"Planing Agent.\""));
    assert!(prompts[0].contains("USER QUERY: Why do seasons change?"));
    assert!(prompts[1].contains("\"Analysis Agent\""));
    assert!(prompts[1].contains("PLANNING AGENT OUTPUT: PLAN-OUT\n"));
    assert!(prompts[2].contains("User Query: Why do seasons change?"));
    assert!(prompts[2].contains("Final Analysis: ANALYSIS-OUT"));
}

// ============================================================================
// Profile-driven synthesis
// ============================================================================

#[tokio::test]
async fn test_verbal_learner_with_low_confidence() {
    let model = RecordingModel::replying(&["P", "A", "S"]);
    let orchestrator = TutorOrchestrator::new(model.clone(), model.clone()).unwrap();

    let turn = ChatTurn::new("Explain the water cycle")
        .with_profile(Some(profile(8.0, 3.0, 3.0, 11)));
    orchestrator.get_chat_response(turn).await.unwrap();

    let synthesis = &model.prompts()[2];
    assert!(synthesis.contains("Age: 11"));
    assert!(synthesis.contains("Verbal Score: 8.0/2"));
    assert!(synthesis.contains("Non-verbal Score: 3.0/2"));
    assert!(synthesis.contains("Self-assessment Score: 3.0/10"));
    assert!(synthesis.contains("Focus on providing detailed text explanations and story-based examples."));
    assert!(synthesis.contains("indicating low confidence in non-verbal skills."));
    assert!(synthesis.contains("Provide additional encouragement and positive reinforcement."));
    assert!(!synthesis.contains("Maintain supportive but direct communication."));
}

#[tokio::test]
async fn test_equal_scores_get_balanced_style() {
    let model = RecordingModel::replying(&["P", "A", "S"]);
    let orchestrator = TutorOrchestrator::new(model.clone(), model.clone()).unwrap();

    let turn = ChatTurn::new("What is erosion?").with_profile(Some(profile(1.5, 1.5, 6.0, 14)));
    orchestrator.get_chat_response(turn).await.unwrap();

    let synthesis = &model.prompts()[2];
    assert!(synthesis.contains("Provide a balanced approach with both verbal and visual explanations."));
    assert!(synthesis.contains("indicating moderate confidence"));
    assert!(synthesis.contains("Maintain supportive but direct communication."));
}

#[tokio::test]
async fn test_non_verbal_learner_gets_scaffolding() {
    let model = RecordingModel::replying(&["P", "A", "S"]);
    let orchestrator = TutorOrchestrator::new(model.clone(), model.clone()).unwrap();

    let turn = ChatTurn::new("How do plants grow?").with_profile(Some(profile(0.5, 2.0, 9.0, 16)));
    orchestrator.get_chat_response(turn).await.unwrap();

    let synthesis = &model.prompts()[2];
    assert!(synthesis.contains("Focus on interactive scaffolding and visual descriptions."));
    assert!(synthesis.contains("indicating high confidence"));
}

#[tokio::test]
async fn test_missing_profile_reports_unknown_age() {
    let model = RecordingModel::replying(&["P", "A", "S"]);
    let orchestrator = TutorOrchestrator::new(model.clone(), model.clone()).unwrap();

    orchestrator
        .get_chat_response(ChatTurn::new("What is gravity?"))
        .await
        .unwrap();

    let synthesis = &model.prompts()[2];
    assert!(synthesis.contains("User Profile Information:\nAge: Unknown\n\n\n\n"));
    assert!(synthesis.contains("Response Style Guidelines:\n\n\n"));
    assert!(!synthesis.contains("Verbal Score"));
    assert!(!synthesis.contains("self-assessment score is"));
}

// ============================================================================
// Vision
// ============================================================================

#[tokio::test]
async fn test_image_analysis_is_appended_to_query() {
    let model = RecordingModel::replying(&["a right triangle", "P", "A", "S"]);
    let orchestrator = TutorOrchestrator::new(model.clone(), model.clone()).unwrap();

    let outcome = orchestrator
        .get_chat_response(ChatTurn::new("What shape is this?").with_image(png_bytes()))
        .await
        .unwrap();

    assert_eq!(outcome.vision_analysis.as_deref(), Some("a right triangle"));
    let calls = model.calls();
    assert_eq!(calls.len(), 4);
    assert!(calls[0].had_image);
    assert_eq!(calls[0].prompt, "What shape is this?");
    assert!(calls[1]
        .prompt
        .contains("USER QUERY: What shape is this?\n\nImage Analysis: a right triangle"));
}

#[tokio::test]
async fn test_undecodable_image_still_completes() {
    let model = RecordingModel::replying(&["P", "A", "S"]);
    let orchestrator = TutorOrchestrator::new(model.clone(), model.clone()).unwrap();

    let outcome = orchestrator
        .get_chat_response(ChatTurn::new("What is this?").with_image(b"not an image".to_vec()))
        .await
        .unwrap();

    assert_eq!(outcome.response, "S");
    assert!(outcome.vision_analysis.is_none());
    let calls = model.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|c| !c.had_image));
    assert!(!calls[0].prompt.contains("Image Analysis"));
}

#[tokio::test]
async fn test_vision_failure_is_not_fatal() {
    let text = RecordingModel::replying(&["P", "A", "S"]);
    let vision = RecordingModel::new(vec![Err(server_error("vision down"))]);
    let orchestrator = TutorOrchestrator::new(text.clone(), vision.clone()).unwrap();

    let outcome = orchestrator
        .get_chat_response(ChatTurn::new("Describe this map").with_image(png_bytes()))
        .await
        .unwrap();

    assert_eq!(outcome.response, "S");
    assert_eq!(vision.calls().len(), 1);
    assert!(!text.prompts()[0].contains("Image Analysis"));
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_planning_failure_aborts_turn() {
    let model = RecordingModel::new(vec![Err(server_error("quota exceeded"))]);
    let orchestrator = TutorOrchestrator::new(model.clone(), model.clone()).unwrap();

    let err = orchestrator
        .get_chat_response(ChatTurn::new("Why is the ocean salty?"))
        .await
        .unwrap_err();

    assert!(matches!(err, TutorError::ChatResponse(_)));
    assert!(err.to_string().starts_with("Failed to get chat response: "));
    assert!(err.to_string().contains("quota exceeded"));
    assert!(matches!(
        err.root(),
        TutorError::ModelRequest {
            stage: Stage::Planning,
            ..
        }
    ));
    assert_eq!(model.calls().len(), 1);
}

#[tokio::test]
async fn test_analysis_failure_skips_synthesis() {
    let model = RecordingModel::new(vec![Ok("P".to_string()), Err(server_error("boom"))]);
    let orchestrator = TutorOrchestrator::new(model.clone(), model.clone()).unwrap();

    let err = orchestrator
        .get_chat_response(ChatTurn::new("What is a volcano?"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.root(),
        TutorError::ModelRequest {
            stage: Stage::Analysis,
            ..
        }
    ));
    assert_eq!(model.calls().len(), 2);
}

#[tokio::test]
async fn test_stalled_stage_times_out() {
    let model = RecordingModel::slow(Duration::from_secs(5));
    let orchestrator = TutorOrchestrator::new(model.clone(), model.clone())
        .unwrap()
        .with_stage_timeout(Duration::from_millis(50));

    let err = orchestrator
        .get_chat_response(ChatTurn::new("What is a noun?"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.root(),
        TutorError::ModelTimeout {
            stage: Stage::Planning,
            ..
        }
    ));
    assert!(err.to_string().ends_with("planning stage timed out after 50ms"));
}

// ============================================================================
// Classifier
// ============================================================================

#[test]
fn test_classifier_is_idempotent_and_case_insensitive() {
    let classifier = QueryClassifier::new();
    for query in ["Explain ALGORITHM design", "what is a Variable", "tell me about rivers"] {
        assert_eq!(classifier.classify(query), classifier.classify(query));
    }
    assert!(classifier.is_coding_query("PYTHON lists"));
    assert!(classifier.is_coding_query("how do functions work"));
    assert!(!classifier.is_coding_query("How do bees communicate?"));
}
