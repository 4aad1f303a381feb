use auth::Role;

/// Protected operations and their required-role sets.
///
/// Declarative replacement for route-level guard annotations: each operation
/// names its exact permitted roles, and authorization is a pure membership
/// check with no hierarchy between roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateUser,
    ListUsers,
    UpdateUser,
    ChangePassword,
    DeleteUser,
}

impl Operation {
    /// The exact set of roles permitted to perform this operation.
    pub fn required_roles(self) -> &'static [Role] {
        match self {
            Operation::CreateUser => &[Role::SuperAdmin],
            Operation::ListUsers => &[Role::SuperAdmin, Role::SubAdmin],
            Operation::UpdateUser => &[Role::SuperAdmin, Role::User],
            Operation::ChangePassword => &[Role::User],
            Operation::DeleteUser => &[Role::SuperAdmin],
        }
    }
}
