//! Score readout and post-game rank
//!
//! Purely derived from the session counters; nothing here feeds back into
//! the simulation.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::audio::SoundEffect;
use crate::settings::Platform;
use crate::sim::GameState;

/// Shots fired before accuracy can earn a rank on its own
const SHARPSHOOTER_MIN_SHOTS: u32 = 30;
/// Hit ratio that makes a sharpshooter
const SHARPSHOOTER_ACCURACY: f32 = 0.7;

/// End-of-game letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    D,
    C,
    B,
    A,
    S,
}

/// A rank together with the flavour text it may be shown with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub rank: Rank,
    pub comments: &'static [&'static str],
}

impl Rank {
    /// Grade a finished game. Score bands decide most of it; a sharpshooter
    /// reaches each band at a lower score, and a pacifist never fired.
    pub fn evaluate(score: u32, shots: u32, hits: u32) -> Verdict {
        let sharpshooter =
            shots > SHARPSHOOTER_MIN_SHOTS && hits as f32 >= shots as f32 * SHARPSHOOTER_ACCURACY;
        let pacifist = shots == 0;

        let mut verdict = Verdict {
            rank: Rank::D,
            comments: if pacifist {
                &["PULL THE TRIGGER", "DO A BARREL ROLL"]
            } else {
                &[
                    "MIX IT UP A LIL' BIT",
                    "STAY IN SCHOOL",
                    "I BELIEVE IN YOU",
                    "SKILL ISSUE",
                    "TRY HARDER",
                    "JUST SAY NO",
                ]
            },
        };

        if sharpshooter && score >= 30 {
            verdict = Verdict {
                rank: Rank::C,
                comments: &["HEATING UP", "LET 'EM COOK"],
            };
        }
        if score >= 45 {
            verdict = Verdict {
                rank: Rank::C,
                comments: if pacifist {
                    &["NAILED IT", "PHONE HOME"]
                } else {
                    &["GOOD HUSTLE", "NOT BAD", "GETTING SOMEWHERE", "MEDIUM WELL"]
                },
            };
        }
        if sharpshooter && score >= 65 {
            verdict = Verdict {
                rank: Rank::B,
                comments: &["NICE SHOOTIN' TEX", "MORE COFFEE SIR?"],
            };
        }
        if score >= 90 {
            verdict = Verdict {
                rank: Rank::B,
                comments: if pacifist {
                    &["CHOSEN ONE", "ZEN MODE", "NAMASTE"]
                } else {
                    &["VERY NICE", "SOLID", "RESPECT+", "WELL DONE"]
                },
            };
        }
        if sharpshooter && score >= 180 {
            verdict = Verdict {
                rank: Rank::A,
                comments: &["LOCKED IN", "EAGLE EYE"],
            };
        }
        if score >= 270 {
            verdict = Verdict {
                rank: Rank::A,
                comments: &["TOP NOTCH", "EXCELLENT", "A WINNER IS YOU", "RARE"],
            };
            if sharpshooter || pacifist || score >= 1080 {
                verdict = Verdict {
                    rank: Rank::S,
                    comments: if pacifist {
                        &["ENLIGHTENED", "WE COME IN PEACE"]
                    } else if sharpshooter {
                        &["HOT SHOT", "SHOW OFF", "LEGEND"]
                    } else {
                        &["SEEK HELP", "CHILL OUT", "RAW"]
                    },
                };
            }
        }
        verdict
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::D => "D",
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::S => "S",
        }
    }

    /// Jingle played when the rank is revealed
    pub fn jingle(&self) -> SoundEffect {
        match self {
            Rank::D => SoundEffect::RankD,
            Rank::C => SoundEffect::RankC,
            Rank::B => SoundEffect::RankB,
            Rank::A => SoundEffect::RankA,
            Rank::S => SoundEffect::RankS,
        }
    }
}

/// What the HUD shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u32,
    pub shots: u32,
    pub hits: u32,
    /// Hits per shot, 0 when nothing was fired
    pub accuracy: f32,
    /// Set once the game is over
    pub rank: Option<Rank>,
    pub comment: Option<String>,
}

impl Hud {
    pub fn snapshot(state: &GameState) -> Self {
        let accuracy = if state.shots > 0 {
            state.hits as f32 / state.shots as f32
        } else {
            0.0
        };
        Self {
            score: state.score,
            shots: state.shots,
            hits: state.hits,
            accuracy,
            rank: None,
            comment: None,
        }
    }

    /// Grade the game and pick a comment for it
    pub fn judge(&mut self, rng: &mut impl Rng) -> Rank {
        let verdict = Rank::evaluate(self.score, self.shots, self.hits);
        self.rank = Some(verdict.rank);
        self.comment = verdict.comments.choose(rng).map(|c| c.to_string());
        verdict.rank
    }

    /// End-of-game text block
    pub fn game_over_lines(&self, platform: Platform) -> Vec<String> {
        let mut lines = vec!["GAME OVER".to_string(), format!("SCORE: {}", self.score)];
        if let Some(rank) = self.rank {
            lines.push(format!("RANK : {}", rank.as_str()));
        }
        if let Some(comment) = &self.comment {
            lines.push(comment.clone());
        }
        lines.push("THANKS FOR PLAYING".to_string());
        let restart = match platform {
            Platform::Desktop => "ESC",
            Platform::Mobile => "HOLD",
        };
        lines.push(format!("{restart} FOR NEW GAME"));
        lines
    }
}
