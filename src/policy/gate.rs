//! Authorization gate
//!
//! One decision function per action, composing the role hierarchy with
//! ownership facts. All functions are pure and synchronous: callers
//! fetch the relevant records first, then ask the gate. Denial is the
//! `false` return value, never an error, so every decision is unit
//! testable without a database.

use crate::domain::{Business, Employee, EmployeeRole, Ownable, StringUuid};
use crate::policy::hierarchy;

/// The business attachment of an employee actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Employment {
    pub business_id: StringUuid,
    pub role: EmployeeRole,
}

/// Snapshot of the authenticated identity performing an operation.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: StringUuid,
    /// System admin flag (orthogonal to any employee role)
    pub is_staff: bool,
    /// Present when the actor is an employee
    pub employment: Option<Employment>,
}

impl Actor {
    pub fn user(user_id: StringUuid, is_staff: bool) -> Self {
        Self {
            user_id,
            is_staff,
            employment: None,
        }
    }

    pub fn employee(user_id: StringUuid, business_id: StringUuid, role: EmployeeRole) -> Self {
        Self {
            user_id,
            is_staff: false,
            employment: Some(Employment { business_id, role }),
        }
    }

    fn owns(&self, business: &Business) -> bool {
        business.owner_id == self.user_id
    }
}

/// Employee creation through the invitation workflow.
///
/// The business owner and system admins may assign any role. An
/// employee actor must belong to the same business and pass the
/// hierarchy's assignment ceiling.
pub fn can_create_employee(actor: &Actor, business: &Business, target_role: EmployeeRole) -> bool {
    if actor.is_staff || actor.owns(business) {
        return true;
    }
    match &actor.employment {
        Some(emp) => emp.business_id == business.id && hierarchy::can_assign(emp.role, target_role),
        None => false,
    }
}

/// Employee update.
///
/// Only the system admin, the business owner, the record's creator or
/// the employee themselves may update at all. A role change by anyone
/// other than the owner or a system admin additionally requires the
/// actor's own role to clear the assignment ceiling for the new role.
/// The owner/admin bypass here is intentional and asymmetric.
pub fn can_update_employee(
    actor: &Actor,
    employee: &Employee,
    business: &Business,
    new_role: Option<EmployeeRole>,
) -> bool {
    let privileged = actor.is_staff || actor.owns(business);
    let related = privileged
        || employee.created_by == Some(actor.user_id)
        || employee.id == actor.user_id;
    if !related {
        return false;
    }

    if let Some(role) = new_role {
        if !privileged {
            let Some(emp) = &actor.employment else {
                return false;
            };
            if !hierarchy::can_assign(emp.role, role) {
                return false;
            }
        }
    }

    true
}

/// Employee deletion: business owner, system admin, or an Admin-role
/// employee of the same business. Creators without Admin rank cannot
/// delete, not even their own invitees.
pub fn can_delete_employee(actor: &Actor, employee: &Employee, business: &Business) -> bool {
    if actor.is_staff || actor.owns(business) {
        return true;
    }
    actor
        .employment
        .as_ref()
        .is_some_and(|emp| {
            emp.role == EmployeeRole::Admin && emp.business_id == employee.business_id
        })
}

/// Employee detail retrieval: self, business owner, system admin, or
/// strictly-below rank visibility.
pub fn can_retrieve_employee(actor: &Actor, employee: &Employee, business: &Business) -> bool {
    if employee.id == actor.user_id {
        return true;
    }
    if actor.is_staff || actor.owns(business) {
        return true;
    }
    actor
        .employment
        .as_ref()
        .is_some_and(|emp| hierarchy::can_retrieve(emp.role, employee.role))
}

/// Generic owner-or-admin rule for resources without their own
/// hierarchy (users, customers, suppliers). The creator or a system
/// admin may touch the record; resources with no creator tracking fall
/// back to "the record is the actor's own identity".
pub fn owner_or_admin<R: Ownable>(actor: &Actor, resource: &R) -> bool {
    if actor.is_staff {
        return true;
    }
    match resource.creator_id() {
        Some(creator) => creator == actor.user_id,
        None => resource.record_id() == actor.user_id,
    }
}

/// Business creation: any authenticated user who is not already an
/// employee of some business. Prevents an employee from also
/// registering as a business owner.
pub fn can_create_business(actor: &Actor) -> bool {
    actor.employment.is_none()
}

/// Business listing is a system-admin view.
pub fn can_list_businesses(actor: &Actor) -> bool {
    actor.is_staff
}

/// Business retrieve/update/delete: owner or system admin only.
pub fn can_access_business(actor: &Actor, business: &Business) -> bool {
    actor.is_staff || actor.owns(business)
}
