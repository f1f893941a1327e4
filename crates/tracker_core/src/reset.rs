use std::time::Duration;

use rand::Rng;
use shared::error::{TrackerError, TrackerResult};

/// How long front ends keep the wrong-answer indicator lit.
pub const ERROR_FLASH: Duration = Duration::from_millis(500);

const MIN_OPERAND: u8 = 1;
const MAX_OPERAND: u8 = 10;

/// Arithmetic prompt guarding the irreversible end-of-day reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetChallenge {
    lhs: u8,
    rhs: u8,
}

impl ResetChallenge {
    pub fn new(lhs: u8, rhs: u8) -> Self {
        Self { lhs, rhs }
    }

    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self::new(
            rng.random_range(MIN_OPERAND..=MAX_OPERAND),
            rng.random_range(MIN_OPERAND..=MAX_OPERAND),
        )
    }

    pub fn operands(&self) -> (u8, u8) {
        (self.lhs, self.rhs)
    }

    pub fn expected(&self) -> u16 {
        u16::from(self.lhs) + u16::from(self.rhs)
    }

    pub fn prompt(&self) -> String {
        format!("Verify it's you. What is {} + {}?", self.lhs, self.rhs)
    }

    pub fn verify(&self, answer: &str) -> TrackerResult<()> {
        match answer.trim().parse::<i64>() {
            Ok(value) if value == i64::from(self.expected()) => Ok(()),
            _ => Err(TrackerError::verification(
                "Incorrect answer; nothing was deleted.",
            )),
        }
    }
}
