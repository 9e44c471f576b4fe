use game_core::{GameCatalog, GameMetadata, RouteTicket, SyncMachine, UpdateDecision};
use game_types::{ProgressRecord, ProgressUpdate};

/// Resolves a route the way a game screen would and enters it.
pub fn enter_game(machine: &mut SyncMachine, route_id: &str) -> (&'static GameMetadata, RouteTicket) {
    let game = GameCatalog::standard()
        .resolve(route_id)
        .unwrap_or_else(|| panic!("No game for route {}", route_id));
    let ticket = machine.enter_route(game.id.to_string(), game.name);
    (game, ticket)
}

/// Machine on `route_id`, anchored at `at`.
pub fn anchored_on(route_id: &str, at: i64) -> SyncMachine {
    let mut machine = SyncMachine::new();
    let (_, ticket) = enter_game(&mut machine, route_id);
    assert!(machine.attach_anchor(ticket, at));
    machine
}

/// A correct answer worth `points` for `game` at level 1.
pub fn correct_answer(game: &str, points: i32) -> ProgressUpdate {
    ProgressUpdate::new(game, 1, "Easy").with_result(true, points)
}

/// Unwraps a push decision, panicking with the actual decision otherwise.
pub fn expect_push(decision: UpdateDecision) -> ProgressRecord {
    match decision {
        UpdateDecision::Push { record, .. } => record,
        other => panic!("Expected a push, got {:?}", other),
    }
}
