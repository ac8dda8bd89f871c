use crate::model::card::TOTAL_PENALTY;
use crate::model::player::Player;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlayerScore {
    pub round: u32,
    pub total: u32,
}

impl PlayerScore {
    pub fn add_penalty(&mut self, points: u32) {
        self.round += points;
    }
}

/// Anything carrying a [`PlayerScore`]; lets the scoring rules run over
/// whole players or bare score rows.
pub trait Scored {
    fn score(&self) -> &PlayerScore;
    fn score_mut(&mut self) -> &mut PlayerScore;
}

impl Scored for PlayerScore {
    fn score(&self) -> &PlayerScore {
        self
    }

    fn score_mut(&mut self) -> &mut PlayerScore {
        self
    }
}

impl Scored for Player {
    fn score(&self) -> &PlayerScore {
        Player::score(self)
    }

    fn score_mut(&mut self) -> &mut PlayerScore {
        Player::score_mut(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Settlement {
    Normal,
    MoonShot { shooter: usize },
}

/// Fold round scores into totals. A player holding all 26 points scores
/// nothing and everyone else takes 26 instead. Round scores are zero after.
pub fn settle_round<S: Scored>(players: &mut [S]) -> Settlement {
    let shooter = players
        .iter()
        .position(|player| player.score().round == TOTAL_PENALTY);

    let settlement = match shooter {
        Some(shooter) => {
            for (seat, player) in players.iter_mut().enumerate() {
                if seat != shooter {
                    player.score_mut().total += TOTAL_PENALTY;
                }
            }
            Settlement::MoonShot { shooter }
        }
        None => {
            for player in players.iter_mut() {
                let score = player.score_mut();
                score.total += score.round;
            }
            Settlement::Normal
        }
    };

    for player in players.iter_mut() {
        player.score_mut().round = 0;
    }
    settlement
}

/// Game ends once someone reached `target` and a single player holds the
/// lowest total.
pub fn end_of_game<S: Scored>(players: &[S], target: u32) -> bool {
    let reached = players.iter().any(|player| player.score().total >= target);
    reached && winner(players).is_some()
}

/// Seat with the unique lowest total, if there is one.
pub fn winner<S: Scored>(players: &[S]) -> Option<usize> {
    let min = players.iter().map(|player| player.score().total).min()?;
    let mut leaders = players
        .iter()
        .enumerate()
        .filter(|(_, player)| player.score().total == min)
        .map(|(seat, _)| seat);
    let first = leaders.next()?;
    if leaders.next().is_some() {
        None
    } else {
        Some(first)
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayerScore, Settlement, end_of_game, settle_round, winner};

    fn rows(values: &[(u32, u32)]) -> Vec<PlayerScore> {
        values
            .iter()
            .map(|&(round, total)| PlayerScore { round, total })
            .collect()
    }

    #[test]
    fn normal_round_folds_into_totals() {
        let mut scores = rows(&[(1, 0), (5, 10), (0, 3), (20, 0)]);
        assert_eq!(settle_round(&mut scores), Settlement::Normal);
        let totals: Vec<_> = scores.iter().map(|s| s.total).collect();
        assert_eq!(totals, vec![1, 15, 3, 20]);
        assert!(scores.iter().all(|s| s.round == 0));
    }

    #[test]
    fn shoot_the_moon_awards_opponents() {
        let mut scores = rows(&[(0, 4), (26, 7), (0, 0), (0, 12)]);
        assert_eq!(
            settle_round(&mut scores),
            Settlement::MoonShot { shooter: 1 }
        );
        let totals: Vec<_> = scores.iter().map(|s| s.total).collect();
        assert_eq!(totals, vec![30, 7, 26, 38]);
        assert!(scores.iter().all(|s| s.round == 0));
    }

    #[test]
    fn moon_shot_with_three_players() {
        let mut scores = rows(&[(26, 0), (0, 0), (0, 0)]);
        settle_round(&mut scores);
        assert_eq!(scores[0].total, 0);
        assert_eq!(scores[1].total, 26);
        assert_eq!(scores[2].total, 26);
    }

    #[test]
    fn game_continues_below_target() {
        let scores = rows(&[(0, 10), (0, 20), (0, 30)]);
        assert!(!end_of_game(&scores, 100));
    }

    #[test]
    fn game_ends_with_unique_minimum() {
        let scores = rows(&[(0, 101), (0, 20), (0, 30), (0, 45)]);
        assert!(end_of_game(&scores, 100));
        assert_eq!(winner(&scores), Some(1));
    }

    #[test]
    fn tied_minimum_keeps_game_going() {
        let scores = rows(&[(0, 101), (0, 20), (0, 20), (0, 45)]);
        assert!(!end_of_game(&scores, 100));
        assert_eq!(winner(&scores), None);
    }

    #[test]
    fn reaching_target_exactly_counts() {
        let scores = rows(&[(0, 50), (0, 0), (0, 3)]);
        assert!(end_of_game(&scores, 50));
    }
}
