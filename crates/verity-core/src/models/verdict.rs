use serde::{Deserialize, Serialize};

use crate::constants::{VERDICT_CONTRADICTORY, VERDICT_GROUNDED, VERDICT_UNGROUNDED};

/// Classification of a generated answer against its evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HallucinationVerdict {
    Grounded,
    Ungrounded,
    Contradictory,
}

impl HallucinationVerdict {
    /// Map a classifier code. Unknown codes count as grounded.
    pub fn from_code(code: u32) -> Self {
        match code {
            VERDICT_UNGROUNDED => Self::Ungrounded,
            VERDICT_CONTRADICTORY => Self::Contradictory,
            _ => Self::Grounded,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            Self::Grounded => VERDICT_GROUNDED,
            Self::Ungrounded => VERDICT_UNGROUNDED,
            Self::Contradictory => VERDICT_CONTRADICTORY,
        }
    }

    pub fn is_grounded(self) -> bool {
        self == Self::Grounded
    }
}
