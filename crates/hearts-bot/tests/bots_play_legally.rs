use hearts_bot::{BotDifficulty, strategy_for};
use hearts_core::game::match_state::MatchState;
use hearts_core::model::card::TOTAL_PENALTY;
use hearts_core::model::event::{NullSink, RoundEvent};
use hearts_core::model::player::Player;

fn table(difficulties: &[BotDifficulty]) -> Vec<Player> {
    difficulties
        .iter()
        .enumerate()
        .map(|(idx, &difficulty)| Player::new(format!("Player {}", idx + 1), strategy_for(difficulty)))
        .collect()
}

#[test]
fn mixed_tables_finish_with_a_unique_winner() {
    use BotDifficulty::{Advanced, Basic};
    let lineups: [&[BotDifficulty]; 3] = [
        &[Basic, Advanced, Advanced],
        &[Advanced, Basic, Basic, Advanced],
        &[Basic, Advanced, Basic, Advanced, Advanced],
    ];

    for (lineup, seed) in lineups.iter().zip([11u64, 23, 42]) {
        let mut game = MatchState::with_seed(table(lineup), 100, seed).expect("valid table");
        let mut events: Vec<RoundEvent> = Vec::new();
        let winner = game.run(&mut events).expect("bots never play illegally");

        let totals = game.totals();
        assert!(totals.iter().any(|total| *total >= 100));
        let best = totals[winner];
        assert_eq!(totals.iter().filter(|total| **total == best).count(), 1);
        assert!(matches!(events.last(), Some(RoundEvent::GameWon { seat, .. }) if *seat == winner));
    }
}

#[test]
fn every_round_hands_out_all_penalty_points() {
    for seed in 0..20u64 {
        let lineup = [BotDifficulty::Advanced; 4];
        let mut game = MatchState::with_seed(table(&lineup), 1_000, seed).expect("valid table");
        let before: u32 = game.totals().iter().sum();
        let summary = game.play_round(&mut NullSink).expect("round completes");
        assert_eq!(summary.report.penalties.iter().sum::<u32>(), TOTAL_PENALTY);

        let after: u32 = game.totals().iter().sum();
        let gained = after - before;
        // A moon shot hands 26 to each of the other three players.
        assert!(gained == TOTAL_PENALTY || gained == TOTAL_PENALTY * 3, "seed {seed}: {gained}");
    }
}
