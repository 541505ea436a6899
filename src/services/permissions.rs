use crate::models::Role;

/// Capability set for one actor role. Derived, never stored.
///
/// This is the single source of truth for what a role may do: both the UI
/// affordances and every mutating handler consult it, so a capability cannot
/// drift between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    pub can_edit: bool,
    pub can_bulk_edit: bool,
    pub can_export: bool,
    pub can_check_in: bool,
    pub can_change_status: bool,
    pub can_promote: bool,
    pub can_remove_admin: bool,
}

/// Role-gated back-office views. All of them are super-admin territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminView {
    Roles,
    AdminManagement,
    AuditLogs,
    SystemSettings,
}

/// Pure policy function of (role, explicit read-only override).
///
/// The read-only override only narrows the admin role's field editing; it
/// mirrors the back office letting a super admin hand out a read-only admin
/// session. Note that `can_promote` is granted to `admin` and not to
/// `super_admin`; that asymmetry comes straight from the product's permission
/// table and is flagged as an open product question rather than corrected
/// here. `can_remove_admin` likewise follows the table and describes the UI
/// affordance only: the lifecycle transitions themselves demand a super-admin
/// caller.
pub fn permissions_for(role: Role, read_only: bool) -> Permissions {
    match role {
        Role::Volunteer => Permissions {
            can_edit: false,
            can_bulk_edit: false,
            can_export: false,
            can_check_in: true,
            can_change_status: false,
            can_promote: false,
            can_remove_admin: false,
        },
        Role::Admin => Permissions {
            can_edit: !read_only,
            can_bulk_edit: true,
            can_export: true,
            can_check_in: true,
            can_change_status: true,
            can_promote: true,
            can_remove_admin: true,
        },
        Role::SuperAdmin => Permissions {
            can_edit: true,
            can_bulk_edit: true,
            can_export: true,
            can_check_in: true,
            can_change_status: true,
            can_promote: false,
            can_remove_admin: true,
        },
    }
}

pub fn can_access_view(role: Role, view: AdminView) -> bool {
    match view {
        AdminView::Roles
        | AdminView::AdminManagement
        | AdminView::AuditLogs
        | AdminView::SystemSettings => role == Role::SuperAdmin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volunteer_is_check_in_only() {
        let p = permissions_for(Role::Volunteer, false);
        assert!(!p.can_edit);
        assert!(!p.can_bulk_edit);
        assert!(!p.can_export);
        assert!(p.can_check_in);
        assert!(!p.can_change_status);
        assert!(!p.can_promote);
        assert!(!p.can_remove_admin);
    }

    #[test]
    fn admin_has_everything_but_view_access() {
        let p = permissions_for(Role::Admin, false);
        assert!(p.can_edit);
        assert!(p.can_bulk_edit);
        assert!(p.can_export);
        assert!(p.can_check_in);
        assert!(p.can_change_status);
        assert!(p.can_promote);
        assert!(p.can_remove_admin);
    }

    #[test]
    fn read_only_override_blocks_admin_edits_only() {
        let p = permissions_for(Role::Admin, true);
        assert!(!p.can_edit);
        assert!(p.can_bulk_edit);
        assert!(p.can_export);
        assert!(p.can_check_in);
        assert!(p.can_change_status);

        // Super admin edits are not subject to the override.
        assert!(permissions_for(Role::SuperAdmin, true).can_edit);
        // Neither does the override grant a volunteer anything.
        assert!(!permissions_for(Role::Volunteer, true).can_edit);
    }

    #[test]
    fn super_admin_matches_table_including_promotion_quirk() {
        let p = permissions_for(Role::SuperAdmin, false);
        assert!(p.can_edit);
        assert!(p.can_bulk_edit);
        assert!(p.can_export);
        assert!(p.can_check_in);
        assert!(p.can_change_status);
        assert!(!p.can_promote);
        assert!(p.can_remove_admin);
    }

    #[test]
    fn back_office_views_are_super_admin_only() {
        let views = [
            AdminView::Roles,
            AdminView::AdminManagement,
            AdminView::AuditLogs,
            AdminView::SystemSettings,
        ];
        for view in views {
            assert!(!can_access_view(Role::Volunteer, view));
            assert!(!can_access_view(Role::Admin, view));
            assert!(can_access_view(Role::SuperAdmin, view));
        }
    }
}
