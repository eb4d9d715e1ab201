//! WCAG AA/AAA compliance for a contrast ratio.

use serde::Serialize;
use std::fmt;

/// One of the four WCAG text-contrast success levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Level {
    AaNormal,
    AaLarge,
    AaaNormal,
    AaaLarge,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::AaNormal,
        Level::AaLarge,
        Level::AaaNormal,
        Level::AaaLarge,
    ];

    /// Minimum ratio to pass (inclusive).
    pub const fn threshold(self) -> f64 {
        match self {
            Self::AaNormal => 4.5,
            Self::AaLarge => 3.0,
            Self::AaaNormal => 7.0,
            Self::AaaLarge => 4.5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AaNormal => "AA normal text",
            Self::AaLarge => "AA large text",
            Self::AaaNormal => "AAA normal text",
            Self::AaaLarge => "AAA large text",
        }
    }

    pub fn verdict(self, ratio: f64) -> Verdict {
        if ratio >= self.threshold() {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
        })
    }
}

/// Verdicts for all four levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Compliance {
    pub aa_normal: Verdict,
    pub aa_large: Verdict,
    pub aaa_normal: Verdict,
    pub aaa_large: Verdict,
}

impl Compliance {
    pub fn evaluate(ratio: f64) -> Self {
        Self {
            aa_normal: Level::AaNormal.verdict(ratio),
            aa_large: Level::AaLarge.verdict(ratio),
            aaa_normal: Level::AaaNormal.verdict(ratio),
            aaa_large: Level::AaaLarge.verdict(ratio),
        }
    }

    pub const fn get(&self, level: Level) -> Verdict {
        match level {
            Level::AaNormal => self.aa_normal,
            Level::AaLarge => self.aa_large,
            Level::AaaNormal => self.aaa_normal,
            Level::AaaLarge => self.aaa_large,
        }
    }

    /// `(level, verdict)` in [`Level::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Level, Verdict)> + '_ {
        Level::ALL.into_iter().map(|level| (level, self.get(level)))
    }

    pub fn all_pass(&self) -> bool {
        self.iter().all(|(_, v)| v.is_pass())
    }
}
