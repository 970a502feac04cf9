use serde::{Deserialize, Serialize};

use crate::random::GameRng;
use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// The choice this one defeats.
    pub const fn beats(self) -> Choice {
        use Choice::*;
        match self {
            Rock => Scissors,
            Scissors => Paper,
            Paper => Rock,
        }
    }

    pub const fn name(self) -> &'static str {
        use Choice::*;
        match self {
            Rock => "rock",
            Paper => "paper",
            Scissors => "scissors",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Tie,
    PlayerWins,
    ComputerWins,
}

impl RoundOutcome {
    pub const fn message(self) -> &'static str {
        use RoundOutcome::*;
        match self {
            Tie => "Tie Game!",
            PlayerWins => "You Win!",
            ComputerWins => "Computer Wins!",
        }
    }
}

pub fn resolve(player: Choice, computer: Choice) -> RoundOutcome {
    if player == computer {
        RoundOutcome::Tie
    } else if player.beats() == computer {
        RoundOutcome::PlayerWins
    } else {
        RoundOutcome::ComputerWins
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub player: Choice,
    pub computer: Choice,
    pub outcome: RoundOutcome,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RpsEvent {
    Play(Choice),
    Clear,
}

/// Keeps nothing between rounds except the latest one, for display.
#[derive(Clone, Debug)]
pub struct RockPaperScissors {
    rng: GameRng,
    last_round: Option<Round>,
}

impl RockPaperScissors {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
            last_round: None,
        }
    }

    pub fn last_round(&self) -> Option<Round> {
        self.last_round
    }

    pub fn computer_choice(&mut self) -> Choice {
        Choice::ALL[self.rng.below(Choice::ALL.len())]
    }

    pub fn play(&mut self, player: Choice) -> Round {
        let computer = self.computer_choice();
        let round = Round {
            player,
            computer,
            outcome: resolve(player, computer),
        };
        log::debug!(
            "rps: {} vs {} -> {:?}",
            player.name(),
            computer.name(),
            round.outcome
        );
        self.last_round = Some(round);
        round
    }
}

impl StateMachine for RockPaperScissors {
    type Event = RpsEvent;
    type Outcome = Option<Round>;

    fn apply(&mut self, event: RpsEvent) -> Self::Outcome {
        match event {
            RpsEvent::Play(choice) => Some(self.play(choice)),
            RpsEvent::Clear => self.last_round.take(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Choice::*;
    use RoundOutcome::*;

    #[test]
    fn resolve_covers_all_pairs() {
        let table = [
            (Rock, Rock, Tie),
            (Rock, Paper, ComputerWins),
            (Rock, Scissors, PlayerWins),
            (Paper, Rock, PlayerWins),
            (Paper, Paper, Tie),
            (Paper, Scissors, ComputerWins),
            (Scissors, Rock, ComputerWins),
            (Scissors, Paper, PlayerWins),
            (Scissors, Scissors, Tie),
        ];
        for (player, computer, expected) in table {
            assert_eq!(
                resolve(player, computer),
                expected,
                "{:?} vs {:?}",
                player,
                computer
            );
        }
    }

    #[test]
    fn resolve_is_antisymmetric() {
        for a in Choice::ALL {
            for b in Choice::ALL {
                let swapped = match resolve(b, a) {
                    Tie => Tie,
                    PlayerWins => ComputerWins,
                    ComputerWins => PlayerWins,
                };
                assert_eq!(resolve(a, b), swapped);
            }
        }
    }

    #[test]
    fn computer_choice_is_roughly_uniform() {
        const TRIALS: usize = 30_000;
        let mut game = RockPaperScissors::new(0xC0FFEE);
        let mut counts = [0usize; 3];
        for _ in 0..TRIALS {
            let choice = game.computer_choice();
            let slot = Choice::ALL.iter().position(|&c| c == choice).unwrap();
            counts[slot] += 1;
        }

        // expected 10_000 each, std dev is about 82
        for count in counts {
            assert!((9_500..=10_500).contains(&count), "counts: {:?}", counts);
        }
    }

    #[test]
    fn play_keeps_only_the_latest_round() {
        let mut game = RockPaperScissors::new(3);
        assert_eq!(game.last_round(), None);

        let first = game.play(Rock);
        assert_eq!(game.last_round(), Some(first));
        assert_eq!(first.outcome, resolve(Rock, first.computer));

        let second = game.apply(RpsEvent::Play(Paper)).unwrap();
        assert_eq!(game.last_round(), Some(second));
        assert_eq!(second.player, Paper);

        assert_eq!(game.apply(RpsEvent::Clear), Some(second));
        assert_eq!(game.last_round(), None);
    }
}
