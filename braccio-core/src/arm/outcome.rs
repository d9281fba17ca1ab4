//! Result of a target-setting call

/// What happened to a requested target
///
/// Out-of-range targets are never rejected. The applied value is always the
/// clamped one; this type only reports whether clamping occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetOutcome {
    /// Requested value was within limits and stored as-is
    Applied(i32),
    /// Requested value was outside limits; `applied` was stored instead
    Clamped { requested: i32, applied: i32 },
}

impl SetOutcome {
    /// Classify a requested/applied pair
    pub fn new(requested: i32, applied: i32) -> Self {
        if requested == applied {
            Self::Applied(applied)
        } else {
            Self::Clamped { requested, applied }
        }
    }

    /// Check if the request was accepted without clamping
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Check if the request was clamped
    pub fn is_clamped(&self) -> bool {
        !self.is_applied()
    }

    /// The value that was stored as the new target
    pub fn applied(&self) -> i32 {
        match self {
            Self::Applied(value) | Self::Clamped { applied: value, .. } => *value,
        }
    }
}

impl From<SetOutcome> for bool {
    fn from(outcome: SetOutcome) -> bool {
        outcome.is_applied()
    }
}
