//! Password challenge
//!
//! After a random idle wait a 3-digit code appears. The player must type it
//! digit by digit before the deadline. The first wrong digit fails the code,
//! running out of time expires it. The verdict stays on screen for a while,
//! then the challenge goes idle again.
//!
//! Each phase carries its own timer, so leaving a phase drops its deadline
//! and a finished code can never be resolved twice.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::CODE_LENGTH;
use crate::tuning::{ChallengeTuning, ScoreTuning};

/// How an activation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeOutcome {
    Correct,
    Incorrect,
    Expired,
}

impl ChallengeOutcome {
    /// Banner text shown while the verdict is displayed
    pub fn label(&self) -> &'static str {
        match self {
            ChallengeOutcome::Correct => "CORRECT!",
            ChallengeOutcome::Incorrect => "FALSE!",
            ChallengeOutcome::Expired => "Expired!",
        }
    }

    /// Signed score change for this outcome
    pub fn score_delta(&self, score: &ScoreTuning) -> i64 {
        match self {
            ChallengeOutcome::Correct => score.challenge_reward,
            ChallengeOutcome::Incorrect | ChallengeOutcome::Expired => -score.challenge_penalty,
        }
    }

    pub fn is_success(&self) -> bool {
        *self == ChallengeOutcome::Correct
    }
}

/// Per-digit display state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DigitFeedback {
    #[default]
    Pending,
    Correct,
    Wrong,
}

pub type Code = [u8; CODE_LENGTH];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChallengePhase {
    /// Waiting before the next code appears
    Idle { wait: f32 },
    /// A code is on screen and accepting digits
    Active {
        code: Code,
        cursor: usize,
        remaining: f32,
        feedback: [DigitFeedback; CODE_LENGTH],
    },
    /// Verdict on screen; input is ignored
    Resolved {
        code: Code,
        outcome: ChallengeOutcome,
        feedback: [DigitFeedback; CODE_LENGTH],
        display_remaining: f32,
    },
}

/// Answer to a digit press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitResult {
    /// No active code, already resolved, or not a digit
    Rejected,
    /// Correct digit at `position`, more to go
    Accepted { position: usize },
    /// The press finished the code
    Resolved(ChallengeOutcome),
}

/// Challenge lifecycle notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeEvent {
    Started { code: Code },
    Resolved { outcome: ChallengeOutcome },
    /// Back to idle after the verdict display
    Reset,
}

/// The password mini-game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChallenge {
    phase: ChallengePhase,
    activations: u32,
}

fn idle_wait<R: Rng>(tuning: &ChallengeTuning, rng: &mut R) -> f32 {
    let lo = tuning.min_delay.min(tuning.max_delay).max(0.0);
    let hi = tuning.min_delay.max(tuning.max_delay).max(0.0);
    rng.random_range(lo..=hi)
}

impl PasswordChallenge {
    /// Start idle with a random wait
    pub fn new<R: Rng>(tuning: &ChallengeTuning, rng: &mut R) -> Self {
        Self {
            phase: ChallengePhase::Idle {
                wait: idle_wait(tuning, rng),
            },
            activations: 0,
        }
    }

    pub fn phase(&self) -> &ChallengePhase {
        &self.phase
    }

    /// Codes shown so far
    pub fn activations(&self) -> u32 {
        self.activations
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, ChallengePhase::Active { .. })
    }

    /// Code currently on screen (active or resolved)
    pub fn code(&self) -> Option<Code> {
        match &self.phase {
            ChallengePhase::Active { code, .. } | ChallengePhase::Resolved { code, .. } => {
                Some(*code)
            }
            ChallengePhase::Idle { .. } => None,
        }
    }

    /// Next position awaiting input while active
    pub fn cursor(&self) -> Option<usize> {
        match &self.phase {
            ChallengePhase::Active { cursor, .. } => Some(*cursor),
            _ => None,
        }
    }

    /// Seconds left to finish the active code
    pub fn time_remaining(&self) -> Option<f32> {
        match &self.phase {
            ChallengePhase::Active { remaining, .. } => Some(remaining.max(0.0)),
            _ => None,
        }
    }

    pub fn feedback(&self) -> [DigitFeedback; CODE_LENGTH] {
        match &self.phase {
            ChallengePhase::Active { feedback, .. } | ChallengePhase::Resolved { feedback, .. } => {
                *feedback
            }
            ChallengePhase::Idle { .. } => [DigitFeedback::Pending; CODE_LENGTH],
        }
    }

    /// Status line for the code panel
    pub fn banner(&self) -> &'static str {
        match &self.phase {
            ChallengePhase::Idle { .. } => "LOADING...",
            ChallengePhase::Active { .. } => "",
            ChallengePhase::Resolved { outcome, .. } => outcome.label(),
        }
    }

    /// Show a fresh code now. Ignored unless idle.
    pub fn activate<R: Rng>(&mut self, tuning: &ChallengeTuning, rng: &mut R) -> Option<Code> {
        if !matches!(self.phase, ChallengePhase::Idle { .. }) {
            return None;
        }
        let mut code = [0u8; CODE_LENGTH];
        for digit in code.iter_mut() {
            *digit = rng.random_range(0..10);
        }
        self.phase = ChallengePhase::Active {
            code,
            cursor: 0,
            remaining: tuning.code_time_limit,
            feedback: [DigitFeedback::Pending; CODE_LENGTH],
        };
        self.activations += 1;
        log::info!("Password challenge started");
        Some(code)
    }

    fn resolve(&mut self, outcome: ChallengeOutcome, tuning: &ChallengeTuning) {
        if let ChallengePhase::Active { code, feedback, .. } = self.phase {
            log::info!("Password challenge resolved: {:?}", outcome);
            self.phase = ChallengePhase::Resolved {
                code,
                outcome,
                feedback,
                display_remaining: tuning.result_display,
            };
        }
    }

    /// Handle a digit press
    pub fn press_digit(&mut self, digit: u8, tuning: &ChallengeTuning) -> DigitResult {
        if digit > 9 {
            return DigitResult::Rejected;
        }
        let ChallengePhase::Active {
            code,
            cursor,
            feedback,
            ..
        } = &mut self.phase
        else {
            return DigitResult::Rejected;
        };

        let position = *cursor;
        if code[position] != digit {
            feedback[position] = DigitFeedback::Wrong;
            self.resolve(ChallengeOutcome::Incorrect, tuning);
            return DigitResult::Resolved(ChallengeOutcome::Incorrect);
        }

        feedback[position] = DigitFeedback::Correct;
        *cursor += 1;
        if *cursor == CODE_LENGTH {
            self.resolve(ChallengeOutcome::Correct, tuning);
            return DigitResult::Resolved(ChallengeOutcome::Correct);
        }
        DigitResult::Accepted { position }
    }

    /// Advance timers by `dt`
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        tuning: &ChallengeTuning,
        rng: &mut R,
    ) -> Option<ChallengeEvent> {
        match &mut self.phase {
            ChallengePhase::Idle { wait } => {
                *wait -= dt;
                if *wait <= 0.0 {
                    return self
                        .activate(tuning, rng)
                        .map(|code| ChallengeEvent::Started { code });
                }
                None
            }
            ChallengePhase::Active { remaining, .. } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    self.resolve(ChallengeOutcome::Expired, tuning);
                    return Some(ChallengeEvent::Resolved {
                        outcome: ChallengeOutcome::Expired,
                    });
                }
                None
            }
            ChallengePhase::Resolved {
                display_remaining, ..
            } => {
                *display_remaining -= dt;
                if *display_remaining <= 0.0 {
                    self.phase = ChallengePhase::Idle {
                        wait: idle_wait(tuning, rng),
                    };
                    return Some(ChallengeEvent::Reset);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn active(seed: u64) -> (PasswordChallenge, Code, ChallengeTuning, Pcg32) {
        let tuning = ChallengeTuning::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut challenge = PasswordChallenge::new(&tuning, &mut rng);
        let code = challenge.activate(&tuning, &mut rng).unwrap();
        (challenge, code, tuning, rng)
    }

    #[test]
    fn test_idle_rejects_digits_and_waits() {
        let tuning = ChallengeTuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut challenge = PasswordChallenge::new(&tuning, &mut rng);
        assert_eq!(challenge.banner(), "LOADING...");
        assert_eq!(challenge.press_digit(3, &tuning), DigitResult::Rejected);

        // Never starts before the minimum delay
        assert_eq!(challenge.update(4.9, &tuning, &mut rng), None);
        assert!(!challenge.is_active());

        // Always started by the maximum delay
        let event = challenge.update(5.2, &tuning, &mut rng);
        assert!(matches!(event, Some(ChallengeEvent::Started { .. })));
        assert!(challenge.is_active());
        assert_eq!(challenge.time_remaining(), Some(5.0));
    }

    #[test]
    fn test_correct_code() {
        let (mut challenge, code, tuning, _) = active(2);
        assert_eq!(
            challenge.press_digit(code[0], &tuning),
            DigitResult::Accepted { position: 0 }
        );
        assert_eq!(
            challenge.press_digit(code[1], &tuning),
            DigitResult::Accepted { position: 1 }
        );
        assert_eq!(
            challenge.press_digit(code[2], &tuning),
            DigitResult::Resolved(ChallengeOutcome::Correct)
        );
        assert_eq!(challenge.banner(), "CORRECT!");
        assert_eq!(challenge.feedback(), [DigitFeedback::Correct; 3]);
        // Input is ignored once resolved
        assert_eq!(challenge.press_digit(code[0], &tuning), DigitResult::Rejected);
    }

    #[test]
    fn test_first_wrong_digit_fails() {
        let (mut challenge, code, tuning, _) = active(3);
        challenge.press_digit(code[0], &tuning);
        let wrong = (code[1] + 1) % 10;
        assert_eq!(
            challenge.press_digit(wrong, &tuning),
            DigitResult::Resolved(ChallengeOutcome::Incorrect)
        );
        assert_eq!(
            challenge.feedback(),
            [DigitFeedback::Correct, DigitFeedback::Wrong, DigitFeedback::Pending]
        );
        assert_eq!(challenge.press_digit(code[2], &tuning), DigitResult::Rejected);
    }

    #[test]
    fn test_timeout_expires_once() {
        let (mut challenge, code, tuning, mut rng) = active(4);
        challenge.press_digit(code[0], &tuning);
        assert_eq!(challenge.update(4.0, &tuning, &mut rng), None);
        assert_eq!(
            challenge.update(1.5, &tuning, &mut rng),
            Some(ChallengeEvent::Resolved {
                outcome: ChallengeOutcome::Expired
            })
        );
        assert_eq!(challenge.banner(), "Expired!");
        assert_eq!(challenge.press_digit(code[1], &tuning), DigitResult::Rejected);
        // The verdict display never reports a second resolution
        assert_eq!(challenge.update(1.0, &tuning, &mut rng), None);
    }

    #[test]
    fn test_completed_code_cannot_expire() {
        let (mut challenge, code, tuning, mut rng) = active(5);
        for digit in code {
            challenge.press_digit(digit, &tuning);
        }
        assert_eq!(challenge.update(3.0, &tuning, &mut rng), None);
        assert_eq!(challenge.update(1.0, &tuning, &mut rng), Some(ChallengeEvent::Reset));
        assert!(matches!(challenge.phase(), ChallengePhase::Idle { .. }));
        assert_eq!(challenge.code(), None);
    }

    #[test]
    fn test_out_of_range_digit_rejected() {
        let (mut challenge, _, tuning, _) = active(6);
        assert_eq!(challenge.press_digit(10, &tuning), DigitResult::Rejected);
        assert_eq!(challenge.cursor(), Some(0));
    }

    #[test]
    fn test_exactly_one_outcome_per_activation() {
        let tuning = ChallengeTuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut challenge = PasswordChallenge::new(&tuning, &mut rng);
        let mut outcomes = 0u32;
        let dt = 1.0 / 60.0;
        for step in 0..(600.0 / dt) as u32 {
            // Mash a digit every so often to mix all three outcomes
            if step % 97 == 0 {
                let digit = (step % 10) as u8;
                if let DigitResult::Resolved(_) = challenge.press_digit(digit, &tuning) {
                    outcomes += 1;
                }
            }
            if let Some(ChallengeEvent::Resolved { .. }) = challenge.update(dt, &tuning, &mut rng) {
                outcomes += 1;
            }
        }
        let activations = challenge.activations();
        assert!(activations > 10);
        // The last activation may still be pending
        assert!(outcomes == activations || outcomes + 1 == activations);
    }

    #[test]
    fn test_score_deltas() {
        let score = ScoreTuning::default();
        assert_eq!(ChallengeOutcome::Correct.score_delta(&score), 100);
        assert_eq!(ChallengeOutcome::Incorrect.score_delta(&score), -50);
        assert_eq!(ChallengeOutcome::Expired.score_delta(&score), -50);
    }
}
