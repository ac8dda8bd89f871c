use hearts_bot::{BotDifficulty, strategy_for};
use hearts_core::model::player::{Player, PlayerCount, Strategy};
use rand::Rng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    Human,
    Bot(BotDifficulty),
}

/// Random seating: the human (if any), one basic bot and one advanced bot
/// take distinct random seats. Remaining seats get `extra` when set, else a
/// random difficulty.
pub fn seat_plan<R: Rng + ?Sized>(
    count: PlayerCount,
    human: bool,
    extra: Option<BotDifficulty>,
    rng: &mut R,
) -> Vec<Seat> {
    let mut open: Vec<usize> = count.seats().collect();
    open.shuffle(rng);

    let mut fixed = Vec::with_capacity(3);
    if human {
        fixed.push(Seat::Human);
    }
    fixed.push(Seat::Bot(BotDifficulty::Basic));
    fixed.push(Seat::Bot(BotDifficulty::Advanced));

    let mut plan = vec![None; count.get()];
    for (&seat, kind) in open.iter().zip(fixed) {
        plan[seat] = Some(kind);
    }

    let mut seats = Vec::with_capacity(plan.len());
    for slot in plan {
        let seat = match (slot, extra) {
            (Some(kind), _) => kind,
            (None, Some(difficulty)) => Seat::Bot(difficulty),
            (None, None) => {
                let pick = rng.gen_range(0..BotDifficulty::ALL.len());
                Seat::Bot(BotDifficulty::ALL[pick])
            }
        };
        seats.push(seat);
    }
    seats
}

/// Bots are named `Player N` after their 1-based seat. The human seat takes
/// the given name and strategy; without one it falls back to an advanced bot.
pub fn build_players(plan: &[Seat], human: Option<(String, Box<dyn Strategy>)>) -> Vec<Player> {
    let mut human = human;
    let mut players = Vec::with_capacity(plan.len());
    for (seat, kind) in plan.iter().enumerate() {
        let bot_name = format!("Player {}", seat + 1);
        let player = match kind {
            Seat::Human => match human.take() {
                Some((name, strategy)) => Player::new(name, strategy),
                None => Player::new(bot_name, strategy_for(BotDifficulty::Advanced)),
            },
            Seat::Bot(difficulty) => Player::new(bot_name, strategy_for(*difficulty)),
        };
        players.push(player);
    }
    players
}
