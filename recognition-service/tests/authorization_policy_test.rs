/// Unit tests for the role/department authorization policy
///
/// This test module covers:
/// - Visibility scope derivation per role
/// - Admin-management gates (listing, deletion, suspension)
/// - Per-resource ownership/moderation checks for shoutouts
use uuid::Uuid;

use recognition_service::services::policy::{
    can_announce_employee_of_month, can_delete_admin, can_list_admins, can_list_employees,
    can_manage_employee, can_remove_shoutout, scope_for, Role, VisibilityScope,
};

// ============================================================================
// Scope derivation
// ============================================================================

#[test]
fn test_superadmin_sees_all_departments() {
    assert_eq!(
        scope_for(Role::Superadmin, "Eng"),
        VisibilityScope::AllDepartments
    );
}

#[test]
fn test_admin_and_employee_confined_to_own_department() {
    assert_eq!(
        scope_for(Role::Admin, "Eng"),
        VisibilityScope::Department("Eng".to_string())
    );
    assert_eq!(
        scope_for(Role::Employee, "Sales"),
        VisibilityScope::Department("Sales".to_string())
    );
}

#[test]
fn test_scope_filter_drives_queries() {
    assert_eq!(scope_for(Role::Superadmin, "Eng").department_filter(), None);
    assert_eq!(
        scope_for(Role::Admin, "Eng").department_filter(),
        Some("Eng")
    );
}

// ============================================================================
// Admin management gates
// ============================================================================

#[test]
fn test_employee_listing_requires_admin() {
    assert!(can_list_employees(Role::Admin));
    assert!(can_list_employees(Role::Superadmin));
    assert!(!can_list_employees(Role::Employee));
}

#[test]
fn test_admin_listing_and_deletion_require_superadmin() {
    assert!(can_list_admins(Role::Superadmin));
    assert!(!can_list_admins(Role::Admin));

    assert!(can_delete_admin(Role::Superadmin));
    // Department never grants admin deletion to a mere admin
    assert!(!can_delete_admin(Role::Admin));
    assert!(!can_delete_admin(Role::Employee));
}

#[test]
fn test_employee_management_scoping() {
    assert!(can_manage_employee(Role::Admin, "Eng", "Eng"));
    assert!(!can_manage_employee(Role::Admin, "Eng", "Sales"));
    assert!(can_manage_employee(Role::Superadmin, "Eng", "Sales"));
    assert!(!can_manage_employee(Role::Employee, "Eng", "Eng"));
}

// ============================================================================
// Per-resource checks
// ============================================================================

#[test]
fn test_author_always_removes_own_shoutout() {
    let author = Uuid::new_v4();
    assert!(can_remove_shoutout(
        Role::Employee,
        author,
        "Eng",
        author,
        "Eng"
    ));
}

#[test]
fn test_admin_moderation_is_department_bound() {
    let author = Uuid::new_v4();
    let admin = Uuid::new_v4();

    assert!(can_remove_shoutout(Role::Admin, admin, "Eng", author, "Eng"));
    assert!(!can_remove_shoutout(
        Role::Admin,
        admin,
        "Eng",
        author,
        "Sales"
    ));
    assert!(can_remove_shoutout(
        Role::Superadmin,
        admin,
        "HR",
        author,
        "Sales"
    ));
}

#[test]
fn test_employee_cannot_moderate_others() {
    let author = Uuid::new_v4();
    let someone = Uuid::new_v4();
    assert!(!can_remove_shoutout(
        Role::Employee,
        someone,
        "Eng",
        author,
        "Eng"
    ));
}

#[test]
fn test_employee_of_month_announcement_rules() {
    assert!(can_announce_employee_of_month(Role::Admin, "Eng", "Eng"));
    assert!(!can_announce_employee_of_month(Role::Admin, "Eng", "Sales"));
    assert!(can_announce_employee_of_month(
        Role::Superadmin,
        "HR",
        "Eng"
    ));
    assert!(!can_announce_employee_of_month(
        Role::Employee,
        "Eng",
        "Eng"
    ));
}

// ============================================================================
// Role parsing round-trip
// ============================================================================

#[test]
fn test_role_round_trip() {
    for role in [Role::Employee, Role::Admin, Role::Superadmin] {
        assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
    }
    assert!("intern".parse::<Role>().is_err());
}
