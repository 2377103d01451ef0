//! Role hierarchy evaluation
//!
//! Pure functions over the ranked [`EmployeeRole`] order. Owner and
//! system-admin bypasses live in the gate; these functions only answer
//! questions about the hierarchy itself.

use crate::domain::EmployeeRole;

/// Whether `actor` may assign `target` as a role, at employee-creation
/// or role-update time.
///
/// An actor can only assign roles strictly below their own: Admin may
/// assign Manager or Sales, Manager may assign Sales, Sales may assign
/// nothing. Nobody assigns Admin through the hierarchy (only the
/// business owner or a system admin can, via their gate bypass).
pub fn can_assign(actor: EmployeeRole, target: EmployeeRole) -> bool {
    actor.rank() > target.rank()
}

/// Whether `actor` may read the detail record of an employee holding
/// `target` role.
///
/// Strictly-below visibility: an Admin cannot retrieve another Admin,
/// a Manager can retrieve Sales but not Admin or another Manager.
/// Self-retrieval and the owner bypass are handled by the gate.
pub fn can_retrieve(actor: EmployeeRole, target: EmployeeRole) -> bool {
    target.rank() < actor.rank()
}
