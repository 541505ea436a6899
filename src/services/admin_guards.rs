use crate::error::AppError;
use crate::models::{ActorStatus, Role};

/// Pure transition guards for the admin lifecycle.
///
/// These take the current state (target role/status plus the relevant super
/// admin count) as plain values so they can be exercised without a database;
/// the lifecycle service feeds them counts read inside the same transaction
/// that performs the mutation.

pub fn require_super_admin(caller_role: Role) -> Result<(), AppError> {
    if caller_role != Role::SuperAdmin {
        return Err(AppError::Unauthorized("Super Admin access required"));
    }
    Ok(())
}

/// A role change may not demote the sole active super admin.
pub fn guard_role_change(
    target_role: Role,
    target_status: ActorStatus,
    new_role: Role,
    active_super_admin_count: i64,
) -> Result<(), AppError> {
    if target_role == Role::SuperAdmin
        && target_status == ActorStatus::Active
        && new_role != Role::SuperAdmin
        && active_super_admin_count <= 1
    {
        return Err(AppError::LastSuperAdminViolation);
    }
    Ok(())
}

/// A status change may not be self-inflicted and may not deactivate the sole
/// active super admin.
pub fn guard_status_change(
    caller_id: &str,
    target_id: &str,
    target_role: Role,
    target_status: ActorStatus,
    new_status: ActorStatus,
    active_super_admin_count: i64,
) -> Result<(), AppError> {
    if caller_id == target_id {
        return Err(AppError::SelfModificationForbidden);
    }
    if target_role == Role::SuperAdmin
        && target_status == ActorStatus::Active
        && new_status != ActorStatus::Active
        && active_super_admin_count <= 1
    {
        return Err(AppError::LastSuperAdminViolation);
    }
    Ok(())
}

/// Deletion may not be self-inflicted and may not remove the sole super
/// admin. Unlike the role/status guards this one counts super admins
/// regardless of status: deleting a suspended super admin that happens to be
/// the only one would leave the role unfillable.
pub fn guard_delete(
    caller_id: &str,
    target_id: &str,
    target_role: Role,
    super_admin_count: i64,
) -> Result<(), AppError> {
    if caller_id == target_id {
        return Err(AppError::SelfModificationForbidden);
    }
    if target_role == Role::SuperAdmin && super_admin_count <= 1 {
        return Err(AppError::LastSuperAdminViolation);
    }
    Ok(())
}
