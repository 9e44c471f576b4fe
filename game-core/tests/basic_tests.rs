mod common;

use common::*;
use game_core::{
    GameCatalog, LevelBoard, ScoreBoard, SyncMachine, UpdateDecision, WORD_BUILDER,
    handwriting_matches, speech_matches,
};
use game_types::{LevelPayload, ScoreSummary, ScoringType};

#[test]
fn test_every_catalog_game_can_be_entered_by_id_and_slug() {
    let catalog = GameCatalog::standard();
    for game in catalog.all() {
        let mut machine = SyncMachine::new();
        let (by_id, _) = enter_game(&mut machine, &game.id.to_string());
        let (by_slug, _) = enter_game(&mut machine, game.slug);

        assert_eq!(by_id, by_slug);
        assert_eq!(machine.current_game_name(), Some(game.name));
    }
}

#[test]
fn test_word_builder_session() {
    let mut machine = anchored_on("word-builder", 0);

    // First answer goes out immediately
    let first = expect_push(machine.begin_update(correct_answer(WORD_BUILDER, 10), 8_000));
    assert_eq!(first.time_spent, 8);

    // Rapid follow-up while the push is pending only refreshes the cache
    let second = machine.begin_update(correct_answer(WORD_BUILDER, 10), 8_050);
    assert!(matches!(second, UpdateDecision::Coalesced(_)));
}

#[test]
fn test_elapsed_time_never_negative_after_clock_step_back() {
    let mut machine = anchored_on("11", 50_000);
    let record = expect_push(machine.begin_update(correct_answer(WORD_BUILDER, 1), 40_000));
    assert_eq!(record.time_spent, 0);
}

#[test]
fn test_penalties_pass_through_unchanged() {
    let mut machine = anchored_on("11", 0);
    let record = expect_push(machine.begin_update(correct_answer(WORD_BUILDER, -3), 1_000));
    assert_eq!(record.score_delta, -3);
}

#[test]
fn test_score_and_level_cards_side_by_side() {
    let mut score = ScoreBoard::new(ScoringType::Persistent);
    let mut level = LevelBoard::new(1, 10);

    score.apply_remote(&ScoreSummary {
        total_score: Some(90),
        ..Default::default()
    });
    level.apply_remote(&LevelPayload { level: 4 });

    score.set_current(10);
    level.set_current(5);

    assert_eq!(score.display_value(), 100);
    assert_eq!(level.display_level(), 5);
    assert_eq!(level.progress_percent(), 50.0);
}

#[test]
fn test_recognizer_checks() {
    assert!(handwriting_matches("Sun", ["s", "UN"]));
    assert!(speech_matches("sun", "the SUN is hot"));
    assert!(!speech_matches("sun", "moon"));
}
