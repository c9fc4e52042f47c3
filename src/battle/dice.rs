use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Something that can roll an n-sided die.
pub trait DiceSource {
    /// Returns a value in `1..=faces`.
    fn roll(&mut self, faces: u8) -> u8;
}

/// Uniform dice backed by a seedable RNG.
#[derive(Debug, Clone)]
pub struct RandomDice {
    rng: StdRng,
}

impl RandomDice {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomDice {
    fn default() -> Self {
        Self::new()
    }
}

impl DiceSource for RandomDice {
    fn roll(&mut self, faces: u8) -> u8 {
        self.rng.random_range(1..=faces.max(1))
    }
}

/// Replays a fixed list of outcomes, for tests that need exact rolls.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    outcomes: Vec<u8>,
    index: usize,
}

impl ScriptedDice {
    pub fn new(outcomes: Vec<u8>) -> Self {
        Self { outcomes, index: 0 }
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self, faces: u8) -> u8 {
        if self.index >= self.outcomes.len() {
            panic!(
                "ScriptedDice exhausted after {} rolls! Need more outcomes for a d{}.",
                self.index, faces
            );
        }
        let outcome = self.outcomes[self.index];
        self.index += 1;
        outcome.clamp(1, faces.max(1))
    }
}
