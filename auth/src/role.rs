use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Closed set of identity roles.
///
/// Serialized with the stored/wire names (`SUPER_ADMIN`, `SUB_ADMIN`, `USER`)
/// so tokens and persisted records stay compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    SubAdmin,
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::SubAdmin => "SUB_ADMIN",
            Role::User => "USER",
        };
        f.write_str(name)
    }
}

/// Decide whether a role satisfies a required-role set.
///
/// Pure membership test. There is no hierarchy between roles: an operation
/// permits exactly the roles it declares, so escalation is opt-in per
/// operation rather than inferred.
pub fn authorize(role: Role, required: &[Role]) -> bool {
    required.contains(&role)
}
