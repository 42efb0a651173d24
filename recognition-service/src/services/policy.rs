/// Role/department visibility policy.
///
/// A stateless decision table keyed by the caller's role and department.
/// Ownership of individual resources (e.g. "only the author may edit their
/// own shoutout") is a separate per-resource check applied at the operation,
/// not part of this table.
use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::error::AppError;

pub const ROLE_EMPLOYEE: &str = "employee";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPERADMIN: &str = "superadmin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Employee,
    Admin,
    Superadmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => ROLE_EMPLOYEE,
            Role::Admin => ROLE_ADMIN,
            Role::Superadmin => ROLE_SUPERADMIN,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::Superadmin)
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_EMPLOYEE => Ok(Role::Employee),
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_SUPERADMIN => Ok(Role::Superadmin),
            other => Err(AppError::Validation(format!("Unknown role: {}", other))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of departments a caller may read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityScope {
    /// Superadmins see every department
    AllDepartments,
    /// Everyone else is confined to their own department
    Department(String),
}

impl VisibilityScope {
    pub fn includes(&self, department: &str) -> bool {
        match self {
            VisibilityScope::AllDepartments => true,
            VisibilityScope::Department(own) => own == department,
        }
    }

    /// Department filter for SQL queries; `None` means unrestricted
    pub fn department_filter(&self) -> Option<&str> {
        match self {
            VisibilityScope::AllDepartments => None,
            VisibilityScope::Department(d) => Some(d.as_str()),
        }
    }
}

/// Derive the caller's visibility scope from role and department
pub fn scope_for(role: Role, department: &str) -> VisibilityScope {
    match role {
        Role::Superadmin => VisibilityScope::AllDepartments,
        Role::Admin | Role::Employee => VisibilityScope::Department(department.to_string()),
    }
}

/// Admins and superadmins may list employees (within their scope)
pub fn can_list_employees(role: Role) -> bool {
    role.is_admin()
}

/// Only superadmins may list admins
pub fn can_list_admins(role: Role) -> bool {
    role == Role::Superadmin
}

/// Only superadmins may delete admins, regardless of department
pub fn can_delete_admin(role: Role) -> bool {
    role == Role::Superadmin
}

/// Admins manage employee rows inside their scope; superadmins anywhere
pub fn can_manage_employee(role: Role, caller_department: &str, employee_department: &str) -> bool {
    match role {
        Role::Superadmin => true,
        Role::Admin => caller_department == employee_department,
        Role::Employee => false,
    }
}

/// Per-resource removal check for shoutouts: the author always may; admins
/// may moderate within their scope
pub fn can_remove_shoutout(
    role: Role,
    caller_id: Uuid,
    caller_department: &str,
    author_id: Uuid,
    shoutout_department: &str,
) -> bool {
    if caller_id == author_id {
        return true;
    }
    match role {
        Role::Superadmin => true,
        Role::Admin => caller_department == shoutout_department,
        Role::Employee => false,
    }
}

/// Admins may crown employee-of-the-month only inside their department
pub fn can_announce_employee_of_month(
    role: Role,
    caller_department: &str,
    employee_department: &str,
) -> bool {
    match role {
        Role::Superadmin => true,
        Role::Admin => caller_department == employee_department,
        Role::Employee => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("employee".parse::<Role>().unwrap(), Role::Employee);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("superadmin".parse::<Role>().unwrap(), Role::Superadmin);
        assert!("manager".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_superadmin_scope_is_unrestricted() {
        let scope = scope_for(Role::Superadmin, "Eng");
        assert_eq!(scope, VisibilityScope::AllDepartments);
        assert!(scope.includes("Eng"));
        assert!(scope.includes("Sales"));
        assert_eq!(scope.department_filter(), None);
    }

    #[test]
    fn test_admin_and_employee_scopes_are_department_bound() {
        for role in [Role::Admin, Role::Employee] {
            let scope = scope_for(role, "Eng");
            assert!(scope.includes("Eng"));
            assert!(!scope.includes("Sales"));
            assert_eq!(scope.department_filter(), Some("Eng"));
        }
    }

    #[test]
    fn test_admin_listing_rules() {
        assert!(can_list_employees(Role::Superadmin));
        assert!(can_list_employees(Role::Admin));
        assert!(!can_list_employees(Role::Employee));

        assert!(can_list_admins(Role::Superadmin));
        assert!(!can_list_admins(Role::Admin));
        assert!(!can_list_admins(Role::Employee));
    }

    #[test]
    fn test_only_superadmin_deletes_admins() {
        assert!(can_delete_admin(Role::Superadmin));
        assert!(!can_delete_admin(Role::Admin));
        assert!(!can_delete_admin(Role::Employee));
    }

    #[test]
    fn test_employee_management_is_department_scoped() {
        assert!(can_manage_employee(Role::Superadmin, "Eng", "Sales"));
        assert!(can_manage_employee(Role::Admin, "Eng", "Eng"));
        assert!(!can_manage_employee(Role::Admin, "Eng", "Sales"));
        assert!(!can_manage_employee(Role::Employee, "Eng", "Eng"));
    }

    #[test]
    fn test_shoutout_removal() {
        let author = Uuid::new_v4();
        let other = Uuid::new_v4();

        // Authors always remove their own, whatever the role
        assert!(can_remove_shoutout(Role::Employee, author, "Eng", author, "Eng"));
        // Employees cannot touch someone else's post
        assert!(!can_remove_shoutout(Role::Employee, other, "Eng", author, "Eng"));
        // Admins moderate inside their own department only
        assert!(can_remove_shoutout(Role::Admin, other, "Eng", author, "Eng"));
        assert!(!can_remove_shoutout(Role::Admin, other, "Eng", author, "Sales"));
        // Superadmins moderate everywhere
        assert!(can_remove_shoutout(Role::Superadmin, other, "HR", author, "Sales"));
    }

    #[test]
    fn test_employee_of_month_announcement() {
        assert!(can_announce_employee_of_month(Role::Superadmin, "HR", "Eng"));
        assert!(can_announce_employee_of_month(Role::Admin, "Eng", "Eng"));
        assert!(!can_announce_employee_of_month(Role::Admin, "Eng", "Sales"));
        assert!(!can_announce_employee_of_month(Role::Employee, "Eng", "Eng"));
    }
}
