use std::cmp::Ordering;
use std::fmt;

use super::Player;

/// Value of a position from Red's point of view.
///
/// A score is either *terminal* (somebody has four in a row) or a heuristic
/// estimate. Terminal scores sit outside the heuristic range: a Red win ranks
/// above every heuristic value and a Yellow win below all of them. Among
/// terminal scores the magnitude is the number of turns that were still left
/// when the line was completed, so a faster win has the larger magnitude and
/// ranks further out in its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Score {
    terminal: bool,
    value: i32,
}

impl Score {
    /// Lower bound for alpha: below every reachable score.
    pub const NEG_INFINITY: Score = Score {
        terminal: true,
        value: i32::MIN,
    };

    /// Upper bound for beta: above every reachable score.
    pub const POS_INFINITY: Score = Score {
        terminal: true,
        value: i32::MAX,
    };

    /// A heuristic mid-game value. Positive favours Red.
    pub const fn heuristic(value: i32) -> Self {
        Score {
            terminal: false,
            value,
        }
    }

    /// A forced win for `winner` found with `turns_left + 1` as magnitude.
    pub fn win(winner: Player, turns_left: usize) -> Self {
        let magnitude = i32::try_from(turns_left).unwrap_or(i32::MAX - 1) + 1;
        Score {
            terminal: true,
            value: winner.sign() * magnitude,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Signed magnitude: heuristic advantage, or turns-left-plus-one for wins.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// The player a terminal score favours. `None` for heuristic scores.
    pub fn winner(&self) -> Option<Player> {
        if !self.terminal {
            return None;
        }
        Some(if self.value >= 0 {
            Player::Red
        } else {
            Player::Yellow
        })
    }

    /// Band 0 holds Yellow wins, 1 heuristic values, 2 Red wins.
    fn band(&self) -> u8 {
        match (self.terminal, self.value >= 0) {
            (false, _) => 1,
            (true, true) => 2,
            (true, false) => 0,
        }
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.band()
            .cmp(&other.band())
            .then_with(|| self.value.cmp(&other.value))
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(player) => write!(
                f,
                "{} wins ({} turns left)",
                player.name(),
                self.value.unsigned_abs() - 1
            ),
            None => write!(f, "{:+}", self.value),
        }
    }
}
