//! Integration tests for tournament lifecycle through the service layer and record store.

use duo_bracket_web::service::{
    create_player, create_team, create_tournament, get_tournament, list_available_players,
    list_matches, list_teams, seed_demo_roster, soft_delete_player, soft_delete_team,
    submit_match_result,
};
use duo_bracket_web::logic::Advancement;
use duo_bracket_web::store::Submission;
use duo_bracket_web::{
    GameMatch, MatchUpdate, MemoryStore, Slot, SlotUpdate, TeamId, TournamentError, TournamentId,
    TournamentStatus,
};

const MAX: u32 = 1024;

/// Store with `n` teams whose ids are 1..=n.
fn store_with_teams(n: u64) -> MemoryStore {
    let mut store = MemoryStore::new();
    for i in 1..=n {
        let a = create_player(&mut store, &format!("P{i}a")).unwrap();
        let b = create_player(&mut store, &format!("P{i}b")).unwrap();
        let team = create_team(&mut store, &format!("T{i}"), a.id, b.id).unwrap();
        assert_eq!(team.id, i);
    }
    store
}

fn game(store: &MemoryStore, tournament_id: TournamentId, round: u32, match_order: u32) -> GameMatch {
    store
        .matches_of(tournament_id)
        .into_iter()
        .find(|m| m.round == round && m.match_order == match_order)
        .unwrap()
}

fn status(store: &MemoryStore, id: TournamentId) -> TournamentStatus {
    get_tournament(store, id).unwrap().status
}

fn result(team1: TeamId, team2: TeamId, score1: u32, score2: u32) -> MatchUpdate {
    MatchUpdate::default().teams(team1, team2).scores(score1, score2).finalize()
}

#[test]
fn scenario_four_team_bracket_runs_to_completion() {
    let mut store = store_with_teams(21);
    let t = create_tournament(&mut store, "Spring Cup", 4, MAX).unwrap();
    assert_eq!(t.status, TournamentStatus::Draft);

    let matches = store.matches_of(t.id);
    let positions: Vec<(u32, u32)> = matches.iter().map(|m| (m.round, m.match_order)).collect();
    assert_eq!(positions, vec![(1, 0), (1, 1), (2, 0)]);

    let m0 = game(&store, t.id, 1, 0);
    let resolved = submit_match_result(&mut store, m0.id, &result(10, 11, 3, 1)).unwrap();
    assert_eq!(resolved.winner_id, Some(10));
    assert_eq!(game(&store, t.id, 2, 0).team1_id, Some(10));
    assert_eq!(status(&store, t.id), TournamentStatus::InProgress);

    let m1 = game(&store, t.id, 1, 1);
    let resolved = submit_match_result(&mut store, m1.id, &result(20, 21, 0, 4)).unwrap();
    assert_eq!(resolved.winner_id, Some(21));
    let fin = game(&store, t.id, 2, 0);
    assert_eq!((fin.team1_id, fin.team2_id), (Some(10), Some(21)));
    assert_eq!(status(&store, t.id), TournamentStatus::InProgress);

    let update = MatchUpdate::default().scores(5, 2).finalize();
    let resolved = submit_match_result(&mut store, fin.id, &update).unwrap();
    assert_eq!(resolved.winner_id, Some(10));
    assert_eq!(status(&store, t.id), TournamentStatus::Completed);
}

#[test]
fn scenario_three_teams_is_rejected() {
    let mut store = MemoryStore::new();
    assert_eq!(
        create_tournament(&mut store, "Odd Cup", 3, MAX),
        Err(TournamentError::InvalidBracketSize(3))
    );
    assert!(store.tournaments().is_empty());
}

#[test]
fn bracket_size_above_limit_is_rejected() {
    let mut store = MemoryStore::new();
    assert_eq!(
        create_tournament(&mut store, "Huge", 2048, MAX),
        Err(TournamentError::InvalidBracketSize(2048))
    );
    assert!(create_tournament(&mut store, "Big", 16, 16).is_ok());
}

#[test]
fn tournament_name_is_required() {
    let mut store = MemoryStore::new();
    assert_eq!(
        create_tournament(&mut store, "   ", 4, MAX),
        Err(TournamentError::EmptyName)
    );
}

#[test]
fn tied_result_leaves_match_open_and_status_unchanged() {
    let mut store = store_with_teams(2);
    let t = create_tournament(&mut store, "Tie Cup", 2, MAX).unwrap();
    let fin = game(&store, t.id, 1, 0);

    submit_match_result(&mut store, fin.id, &MatchUpdate::default().teams(1, 2)).unwrap();
    assert_eq!(status(&store, t.id), TournamentStatus::InProgress);

    let tied = submit_match_result(&mut store, fin.id, &MatchUpdate::default().scores(5, 5).finalize()).unwrap();
    assert_eq!(tied.winner_id, None);
    assert_eq!(status(&store, t.id), TournamentStatus::InProgress);

    let decided = submit_match_result(&mut store, fin.id, &MatchUpdate::default().scores(6, 5).finalize()).unwrap();
    assert_eq!(decided.winner_id, Some(1));
    assert_eq!(status(&store, t.id), TournamentStatus::Completed);
}

#[test]
fn resubmitting_a_decided_match_does_not_propagate_again() {
    let mut store = store_with_teams(4);
    let t = create_tournament(&mut store, "Cup", 4, MAX).unwrap();
    let m0 = game(&store, t.id, 1, 0);
    submit_match_result(&mut store, m0.id, &result(1, 2, 2, 0)).unwrap();

    let again = submit_match_result(&mut store, m0.id, &MatchUpdate::default().scores(2, 1).finalize()).unwrap();
    assert_eq!(again.winner_id, Some(1));
    assert_eq!(game(&store, t.id, 2, 0).team1_id, Some(1));
}

#[test]
fn integrity_failure_writes_nothing() {
    let mut store = store_with_teams(5);
    let t = create_tournament(&mut store, "Cup", 4, MAX).unwrap();
    let fin = game(&store, t.id, 2, 0);
    let occupy = MatchUpdate {
        team1_id: SlotUpdate::Set(5),
        ..MatchUpdate::default()
    };
    submit_match_result(&mut store, fin.id, &occupy).unwrap();
    assert_eq!(status(&store, t.id), TournamentStatus::Draft);

    let m0 = game(&store, t.id, 1, 0);
    assert_eq!(
        submit_match_result(&mut store, m0.id, &result(1, 2, 3, 0)),
        Err(TournamentError::BracketIntegrity {
            match_id: fin.id,
            slot: Slot::Team1
        })
    );
    assert_eq!(game(&store, t.id, 1, 0), m0);
    assert_eq!(game(&store, t.id, 2, 0).team1_id, Some(5));
    assert_eq!(status(&store, t.id), TournamentStatus::Draft);
}

#[test]
fn winner_preplaced_in_the_final_is_an_integrity_error() {
    let mut store = store_with_teams(2);
    let t = create_tournament(&mut store, "Cup", 4, MAX).unwrap();
    let fin = game(&store, t.id, 2, 0);
    let preplace = MatchUpdate {
        team2_id: SlotUpdate::Set(1),
        ..MatchUpdate::default()
    };
    submit_match_result(&mut store, fin.id, &preplace).unwrap();

    let m0 = game(&store, t.id, 1, 0);
    assert_eq!(
        submit_match_result(&mut store, m0.id, &result(1, 2, 3, 1)),
        Err(TournamentError::BracketIntegrity {
            match_id: fin.id,
            slot: Slot::Team2
        })
    );
    assert_eq!(game(&store, t.id, 1, 0), m0);
    let fin = game(&store, t.id, 2, 0);
    assert_eq!((fin.team1_id, fin.team2_id), (None, Some(1)));
    assert_eq!(status(&store, t.id), TournamentStatus::Draft);
}

#[test]
fn store_rejects_a_conflicting_advancement_without_writing() {
    let mut store = store_with_teams(2);
    let t = create_tournament(&mut store, "Cup", 4, MAX).unwrap();
    let m0 = game(&store, t.id, 1, 0);
    let fin = game(&store, t.id, 2, 0);
    let preplace = MatchUpdate {
        team2_id: SlotUpdate::Set(1),
        ..MatchUpdate::default()
    };
    submit_match_result(&mut store, fin.id, &preplace).unwrap();

    let mut decided = m0.clone();
    decided.team1_id = Some(1);
    decided.team2_id = Some(2);
    decided.winner_id = Some(1);
    let submission = Submission {
        game: decided,
        advancement: Some(Advancement {
            match_id: fin.id,
            round: 2,
            match_order: 0,
            slot: Slot::Team1,
            team_id: 1,
        }),
        status: Some(TournamentStatus::InProgress),
    };
    assert_eq!(
        store.apply_submission(submission),
        Err(TournamentError::BracketIntegrity {
            match_id: fin.id,
            slot: Slot::Team2
        })
    );
    assert_eq!(game(&store, t.id, 1, 0), m0);
    assert_eq!(game(&store, t.id, 2, 0).team1_id, None);
    assert_eq!(status(&store, t.id), TournamentStatus::Draft);
}

#[test]
fn submit_validates_ids() {
    let mut store = store_with_teams(2);
    let t = create_tournament(&mut store, "Cup", 2, MAX).unwrap();
    assert_eq!(
        submit_match_result(&mut store, 999, &MatchUpdate::default()),
        Err(TournamentError::MatchNotFound(999))
    );
    let fin = game(&store, t.id, 1, 0);
    assert_eq!(
        submit_match_result(&mut store, fin.id, &result(1, 42, 1, 0)),
        Err(TournamentError::TeamNotFound(42))
    );
    assert_eq!(
        submit_match_result(&mut store, fin.id, &result(2, 2, 1, 0)),
        Err(TournamentError::InvalidTeamAssignment(2))
    );
    assert_eq!(game(&store, t.id, 1, 0), fin);
}

#[test]
fn list_matches_resolves_teams_in_bracket_order() {
    let mut store = store_with_teams(4);
    let t = create_tournament(&mut store, "Cup", 8, MAX).unwrap();
    let m = game(&store, t.id, 1, 2);
    submit_match_result(&mut store, m.id, &result(3, 4, 1, 2)).unwrap();

    let listed = list_matches(&store, t.id).unwrap();
    assert_eq!(listed.len(), 7);
    let keys: Vec<(u32, u32)> = listed.iter().map(|m| (m.game.round, m.game.match_order)).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);

    let played = listed.iter().find(|x| x.game.id == m.id).unwrap();
    assert_eq!(played.team1.as_ref().map(|t| t.name.as_str()), Some("T3"));
    assert_eq!(played.winner.as_ref().map(|t| t.id), Some(4));

    assert_eq!(
        list_matches(&store, 77).err(),
        Some(TournamentError::TournamentNotFound(77))
    );
}

#[test]
fn matches_of_two_tournaments_stay_separate() {
    let mut store = store_with_teams(4);
    let a = create_tournament(&mut store, "A", 2, MAX).unwrap();
    let b = create_tournament(&mut store, "B", 2, MAX).unwrap();
    let fa = game(&store, a.id, 1, 0);
    submit_match_result(&mut store, fa.id, &result(1, 2, 1, 0)).unwrap();
    assert_eq!(status(&store, a.id), TournamentStatus::Completed);
    assert_eq!(status(&store, b.id), TournamentStatus::Draft);
}

#[test]
fn player_names_are_unique_and_trimmed() {
    let mut store = MemoryStore::new();
    let alex = create_player(&mut store, "  Alex ").unwrap();
    assert_eq!(alex.name, "Alex");
    assert_eq!(
        create_player(&mut store, "alex"),
        Err(TournamentError::DuplicatePlayerName)
    );
    assert_eq!(create_player(&mut store, " "), Err(TournamentError::EmptyName));

    soft_delete_player(&mut store, alex.id).unwrap();
    assert!(create_player(&mut store, "Alex").is_ok());
}

#[test]
fn team_formation_rules() {
    let mut store = MemoryStore::new();
    let a = create_player(&mut store, "A").unwrap();
    let b = create_player(&mut store, "B").unwrap();
    let c = create_player(&mut store, "C").unwrap();
    let d = create_player(&mut store, "D").unwrap();

    assert_eq!(
        create_team(&mut store, "Solo", a.id, a.id),
        Err(TournamentError::SamePlayerTwice)
    );
    assert_eq!(
        create_team(&mut store, "Ghost", a.id, 99),
        Err(TournamentError::PlayerNotFound(99))
    );
    assert_eq!(create_team(&mut store, "", a.id, b.id), Err(TournamentError::EmptyName));

    let ab = create_team(&mut store, "AB", a.id, b.id).unwrap();
    assert_eq!(
        create_team(&mut store, "AC", a.id, c.id),
        Err(TournamentError::PlayerUnavailable(a.id))
    );

    soft_delete_player(&mut store, d.id).unwrap();
    assert_eq!(
        create_team(&mut store, "CD", c.id, d.id),
        Err(TournamentError::PlayerUnavailable(d.id))
    );

    let available: Vec<_> = list_available_players(&store).into_iter().map(|p| p.id).collect();
    assert_eq!(available, vec![c.id]);

    soft_delete_team(&mut store, ab.id).unwrap();
    assert!(create_team(&mut store, "AC", a.id, c.id).is_ok());

    // Deleted team still resolves with its players.
    let teams = list_teams(&store);
    let old = teams.iter().find(|t| t.team.id == ab.id).unwrap();
    assert!(old.team.deleted);
    assert_eq!(old.player1.as_ref().map(|p| p.id), Some(a.id));
}

#[test]
fn soft_delete_unknown_ids() {
    let mut store = MemoryStore::new();
    assert_eq!(soft_delete_player(&mut store, 5), Err(TournamentError::PlayerNotFound(5)));
    assert_eq!(soft_delete_team(&mut store, 6), Err(TournamentError::TeamNotFound(6)));
}

#[test]
fn demo_roster_seeds_once() {
    let mut store = MemoryStore::new();
    assert_eq!(seed_demo_roster(&mut store), Ok(true));
    assert_eq!(store.players().len(), 8);
    let teams = list_teams(&store);
    assert_eq!(teams.len(), 4);
    assert_eq!(teams[0].team.name, "The Alphas");
    assert_eq!(teams[0].player1.as_ref().map(|p| p.name.as_str()), Some("Alex"));
    assert!(list_available_players(&store).is_empty());

    assert_eq!(seed_demo_roster(&mut store), Ok(false));
    assert_eq!(store.players().len(), 8);
}
