//! An account together with its loaded role graph.

use serde::{Deserialize, Serialize};

use super::model::Account;
use super::role::RoleGraph;

/// Read-only view of an account used to mint tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// The account row.
    pub account: Account,
    /// Roles and permissions held by the account.
    pub graph: RoleGraph,
}

impl AccountSnapshot {
    /// Pair an account with its role graph.
    pub fn new(account: Account, graph: RoleGraph) -> Self {
        Self { account, graph }
    }
}
