mod common;

use common::*;

use place_core::{
    BattleFlow, BattleSession, ClassicOutcome, ClassicPhase, GameMode, GameRules, PlaceBook,
};
use place_types::{ClassicPayload, Payload};

fn classic_session(
    coord: &place_core::GameCoordinator<RecordingPresenter, CapturingOutbox>,
) -> &place_core::ClassicSession {
    match coord.mode() {
        Some(GameMode::Classic(session)) => session,
        _ => panic!("expected a classic session"),
    }
}

fn battle_session(
    coord: &place_core::GameCoordinator<RecordingPresenter, CapturingOutbox>,
) -> &BattleSession {
    match coord.mode() {
        Some(GameMode::Battle(BattleFlow::Session(session))) => session,
        _ => panic!("expected a running battle session"),
    }
}

// Scenario A: letter A, "Atlanta" scores once and only once.
#[test]
fn test_classic_accepts_known_city_once() {
    let mut coord = test_coordinator();
    coord.handle_inbound("mode=classic&score=0&letter=A");

    coord.submit("Atlanta");
    assert_eq!(classic_session(&coord).score(), 1);
    assert_eq!(coord.presenter().plus_ones, 1);

    coord.submit("atlanta");
    assert_eq!(classic_session(&coord).score(), 1);
    assert_eq!(
        coord.presenter().last_feedback(),
        "That word was already used."
    );
}

// Scenario B: letter B, "Canada" is rejected for its starting letter.
#[test]
fn test_classic_rejects_wrong_starting_letter() {
    let mut coord = test_coordinator();
    coord.handle_inbound("mode=classic&score=0&letter=B");

    coord.submit("Canada");
    assert_eq!(classic_session(&coord).score(), 0);
    assert_eq!(
        coord.presenter().last_feedback(),
        "Hmm... doesn't start with B"
    );
}

// Scenario C: accepted battle word scores, passes the turn and refills the
// clock.
#[test]
fn test_battle_accept_advances_and_resets_clock() {
    let mut ui = RecordingPresenter::new();
    let book = PlaceBook::builtin().unwrap();
    let names = vec!["Alice".to_string(), "Bob".to_string()];
    let mut session = BattleSession::start_with_letter(&names, 'C', 30, &mut ui);

    session.tick(&mut ui);
    assert_eq!(session.time_remaining(), 29);

    session.submit(0, "Chicago", &book, &mut ui).unwrap();

    assert_eq!(session.players()[0].score, 1);
    assert_eq!(session.active_player_index(), 1);
    assert!(session.players()[1].is_active);
    assert_eq!(session.time_remaining(), 30);
}

// Scenario D: no quorum with one player; two ready players start a game
// with exactly those two.
#[test]
fn test_battle_room_quorum() {
    let mut coord = test_coordinator();
    coord.start_battle_room();
    coord.toggle_ready(true);
    assert!(matches!(
        coord.mode(),
        Some(GameMode::Battle(BattleFlow::Room(_)))
    ));

    coord.handle_inbound("mode=battle&type=playerJoin&playerId=p2&name=Bob&isReady=false");
    assert!(matches!(
        coord.mode(),
        Some(GameMode::Battle(BattleFlow::Room(_)))
    ));

    coord.handle_inbound("mode=battle&type=playerReady&playerId=p2&isReady=true");
    let session = battle_session(&coord);
    assert_eq!(session.players().len(), 2);
    let names: Vec<&str> = session.players().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["You", "Bob"]);
}

// Scenario E: inbound completed result against a higher local score.
#[test]
fn test_classic_inbound_result_declares_winner() {
    let mut coord = test_coordinator_with_rules(GameRules {
        classic_time_limit: 60,
        ..GameRules::default()
    });
    coord.handle_inbound("mode=classic&score=0&letter=A");
    for word in [
        "atlanta",
        "austin",
        "anchorage",
        "albania",
        "argentina",
        "alaska",
        "arizona",
    ] {
        coord.submit(word);
    }
    assert_eq!(classic_session(&coord).score(), 7);

    coord.handle_inbound("mode=classic&score=5&letter=A&completed=true");

    let session = classic_session(&coord);
    assert_eq!(session.phase(), ClassicPhase::Resolved);
    assert_eq!(session.outcome(), Some(ClassicOutcome::Win));
    assert_eq!(coord.presenter().input_enabled, Some(false));
    assert!(coord.presenter().last_feedback().contains("You won!"));
}

// Round-robin property: P players, P accepted words, back to player 0.
#[test]
fn test_round_robin_full_cycle() {
    let mut ui = RecordingPresenter::new();
    let book = PlaceBook::builtin().unwrap();
    let names: Vec<String> = ["Alice", "Bob", "Carol", "Dave"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let mut session = BattleSession::start_with_letter(&names, 'B', 30, &mut ui);

    for word in ["boston", "brazil", "berlin", "belgium"] {
        let index = session.active_player_index();
        session.submit(index, word, &book, &mut ui).unwrap();
    }

    assert_eq!(session.active_player_index(), 0);
    for player in session.players() {
        assert_eq!(player.score, 1);
    }
}

// Two coordinators exchanging payloads end to end: the full classic
// turn-passing handshake.
#[test]
fn test_classic_two_device_exchange() {
    let rules = GameRules {
        classic_time_limit: 5,
        ..GameRules::default()
    };
    let mut device_a = test_coordinator_with_rules(rules.clone());
    let mut device_b = test_coordinator_with_rules(rules);

    // Device A plays first.
    device_a.start_classic();
    let letter = classic_session(&device_a).letter();
    // Pick a word for whatever letter was drawn.
    let word = word_for(letter);
    device_a.submit(word);
    assert_eq!(classic_session(&device_a).score(), 1);

    // Let A's turn run out; its score goes out as a payload.
    for _ in 0..5 {
        device_a.tick();
    }
    assert_eq!(
        classic_session(&device_a).phase(),
        ClassicPhase::AwaitingOpponent
    );
    let handoff = device_a.outbox().last().expect("handoff payload").encode();

    // Device B receives the handoff and plays a losing turn.
    device_b.handle_inbound(&handoff);
    assert_eq!(classic_session(&device_b).phase(), ClassicPhase::Playing);
    assert_eq!(classic_session(&device_b).letter(), letter);
    for _ in 0..5 {
        device_b.tick();
    }

    // B resolved against A's stored score and sent the completed result.
    assert_eq!(classic_session(&device_b).phase(), ClassicPhase::Resolved);
    assert_eq!(
        classic_session(&device_b).outcome(),
        Some(ClassicOutcome::Lose)
    );
    let result = device_b.outbox().last().expect("result payload");
    assert_eq!(result, &Payload::Classic(ClassicPayload::result(0, letter)));

    // A receives the result and wins.
    let raw = result.encode();
    device_a.handle_inbound(&raw);
    assert_eq!(classic_session(&device_a).phase(), ClassicPhase::Resolved);
    assert_eq!(
        classic_session(&device_a).outcome(),
        Some(ClassicOutcome::Win)
    );
}

// An invite-initiated game gives both players a turn: the invitee plays
// first, hands the turn back, and only the inviter's expiry closes the game.
#[test]
fn test_invite_initiated_exchange_gives_both_players_a_turn() {
    let rules = GameRules {
        classic_time_limit: 3,
        ..GameRules::default()
    };
    let mut inviter = test_coordinator_with_rules(rules.clone());
    let mut invitee = test_coordinator_with_rules(rules);

    inviter.invite_classic();
    let invite = inviter.outbox().last().expect("invite payload").encode();
    assert!(!invite.contains("score="));
    assert_eq!(classic_session(&inviter).phase(), ClassicPhase::Idle);

    // Invitee plays the first turn and scores once.
    invitee.handle_inbound(&invite);
    assert_eq!(classic_session(&invitee).phase(), ClassicPhase::Playing);
    let letter = classic_session(&invitee).letter();
    invitee.submit(word_for(letter));
    for _ in 0..3 {
        invitee.tick();
    }

    // No score came with the invite, so the invitee hands the turn back
    // rather than resolving at its own expiry.
    assert_eq!(
        classic_session(&invitee).phase(),
        ClassicPhase::AwaitingOpponent
    );
    let handoff = invitee.outbox().last().expect("handoff payload").encode();

    // The inviter gets a real turn and its expiry closes the game.
    inviter.handle_inbound(&handoff);
    assert_eq!(classic_session(&inviter).phase(), ClassicPhase::Playing);
    for _ in 0..3 {
        inviter.tick();
    }
    assert_eq!(classic_session(&inviter).phase(), ClassicPhase::Resolved);
    assert_eq!(
        classic_session(&inviter).outcome(),
        Some(ClassicOutcome::Lose)
    );

    // The completed result resolves the invitee as the winner.
    let result = inviter.outbox().last().expect("result payload").encode();
    invitee.handle_inbound(&result);
    assert_eq!(
        classic_session(&invitee).outcome(),
        Some(ClassicOutcome::Win)
    );
}

// Duplicate words stay rejected for the rest of the session, and score
// tracks accepted submissions exactly.
#[test]
fn test_score_equals_accepted_submissions() {
    let mut coord = test_coordinator_with_rules(GameRules {
        classic_time_limit: 60,
        ..GameRules::default()
    });
    coord.handle_inbound("mode=classic&score=0&letter=T");

    coord.submit("tokyo");
    coord.submit("texas");
    coord.submit("tokyo"); // duplicate
    coord.submit("toronto");
    coord.submit("tashkent"); // not in the book
    coord.submit(""); // empty

    assert_eq!(classic_session(&coord).score(), 3);
    assert_eq!(coord.presenter().plus_ones, 3);
}

/// One known city for every allowed starting letter.
fn word_for(letter: char) -> &'static str {
    match letter {
        'A' => "atlanta",
        'B' => "boston",
        'C' => "chicago",
        'D' => "denver",
        'E' => "edinburgh",
        'F' => "florence",
        'G' => "geneva",
        'H' => "houston",
        'I' => "istanbul",
        'J' => "jakarta",
        'K' => "kampala",
        'L' => "london",
        'M' => "madrid",
        'N' => "nairobi",
        'O' => "oslo",
        'P' => "paris",
        'R' => "rome",
        'S' => "seattle",
        'T' => "tokyo",
        'U' => "uganda",
        'V' => "vienna",
        'W' => "warsaw",
        'Z' => "zurich",
        other => panic!("letter {other} outside the allowed alphabet"),
    }
}
