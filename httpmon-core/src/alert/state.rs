use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AlertState {
    /// The rule does not hold.
    #[default]
    Inactive,
    /// The rule holds, but not yet for the whole alert period.
    Pending,
    /// The rule held for the whole alert period.
    Active,
}

impl AlertState {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertState::Inactive => "Inactive",
            AlertState::Pending => "Pending",
            AlertState::Active => "Active",
        }
    }

    /// The two states this one is not, in declaration order.
    pub fn others(self) -> (AlertState, AlertState) {
        match self {
            AlertState::Inactive => (AlertState::Pending, AlertState::Active),
            AlertState::Pending => (AlertState::Inactive, AlertState::Active),
            AlertState::Active => (AlertState::Inactive, AlertState::Pending),
        }
    }
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
