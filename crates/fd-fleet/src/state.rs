//! The taxi state enum shared by records, commands, and status updates.

use serde::{Deserialize, Serialize};

/// Where a robot is in its mission cycle.
///
/// `Idle` is both the initial state and the end of every cycle; there is no
/// terminal state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxiState {
    /// Driving to the customer's pickup node.
    GoingToCustomer,
    /// Carrying the customer to the drop-off node.
    WithCustomer,
    /// No active request; available for assignment.
    #[default]
    Idle,
}

impl TaxiState {
    pub fn as_str(self) -> &'static str {
        match self {
            TaxiState::GoingToCustomer => "going_to_customer",
            TaxiState::WithCustomer    => "with_customer",
            TaxiState::Idle            => "idle",
        }
    }
}

impl std::fmt::Display for TaxiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
