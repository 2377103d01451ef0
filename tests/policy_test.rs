//! Authorization policy tests through the public API
//!
//! These cover the full role matrix for assignment and retrieval plus
//! the ownership scenarios the gate composes on top.

use accounts_core::domain::EmployeeRole::{self, Admin, Manager, Sales};
use accounts_core::domain::{Business, Employee, StringUuid};
use accounts_core::policy::{gate, hierarchy, Actor};
use rstest::rstest;

fn business_owned_by(owner_id: StringUuid) -> Business {
    Business {
        owner_id,
        name: "Policy Test Business".to_string(),
        ..Default::default()
    }
}

fn employee_of(business: &Business, role: EmployeeRole) -> Employee {
    Employee {
        business_id: business.id,
        role,
        ..Default::default()
    }
}

#[rstest]
#[case(Admin, Manager, true)]
#[case(Admin, Sales, true)]
#[case(Manager, Sales, true)]
#[case(Admin, Admin, false)]
#[case(Manager, Manager, false)]
#[case(Manager, Admin, false)]
#[case(Sales, Sales, false)]
#[case(Sales, Manager, false)]
#[case(Sales, Admin, false)]
fn assignment_requires_strictly_higher_rank(
    #[case] actor: EmployeeRole,
    #[case] target: EmployeeRole,
    #[case] allowed: bool,
) {
    assert_eq!(hierarchy::can_assign(actor, target), allowed);
}

#[rstest]
#[case(Admin, Manager, true)]
#[case(Admin, Sales, true)]
#[case(Manager, Sales, true)]
#[case(Admin, Admin, false)]
#[case(Manager, Manager, false)]
#[case(Manager, Admin, false)]
#[case(Sales, Sales, false)]
#[case(Sales, Manager, false)]
#[case(Sales, Admin, false)]
fn retrieval_requires_strictly_lower_target(
    #[case] actor: EmployeeRole,
    #[case] target: EmployeeRole,
    #[case] allowed: bool,
) {
    assert_eq!(hierarchy::can_retrieve(actor, target), allowed);
}

#[rstest]
#[case(Admin, Manager, true)]
#[case(Admin, Sales, true)]
#[case(Manager, Sales, true)]
// An Admin employee inviting another Admin only works for the owner.
#[case(Admin, Admin, false)]
#[case(Manager, Manager, false)]
#[case(Manager, Admin, false)]
#[case(Sales, Sales, false)]
#[case(Sales, Manager, false)]
#[case(Sales, Admin, false)]
fn employee_invites_within_assignment_ceiling(
    #[case] actor_role: EmployeeRole,
    #[case] invited_role: EmployeeRole,
    #[case] allowed: bool,
) {
    let biz = business_owned_by(StringUuid::new_v4());
    let actor = Actor::employee(StringUuid::new_v4(), biz.id, actor_role);

    assert_eq!(
        gate::can_create_employee(&actor, &biz, invited_role),
        allowed
    );
}

#[test]
fn owner_and_staff_invite_any_role() {
    let owner_id = StringUuid::new_v4();
    let biz = business_owned_by(owner_id);
    let owner = Actor::user(owner_id, false);
    let staff = Actor::user(StringUuid::new_v4(), true);

    for role in [Sales, Manager, Admin] {
        assert!(gate::can_create_employee(&owner, &biz, role));
        assert!(gate::can_create_employee(&staff, &biz, role));
    }
}

#[test]
fn cross_business_invite_denied_regardless_of_rank() {
    let biz = business_owned_by(StringUuid::new_v4());
    let other_business = StringUuid::new_v4();
    let admin_elsewhere = Actor::employee(StringUuid::new_v4(), other_business, Admin);

    assert!(!gate::can_create_employee(&admin_elsewhere, &biz, Sales));
}

#[test]
fn creator_updates_invitee_but_cannot_escalate_past_own_rank() {
    let biz = business_owned_by(StringUuid::new_v4());
    let manager_id = StringUuid::new_v4();
    let manager = Actor::employee(manager_id, biz.id, Manager);

    let mut invitee = employee_of(&biz, Sales);
    invitee.created_by = Some(manager_id);

    // Plain field update is fine.
    assert!(gate::can_update_employee(&manager, &invitee, &biz, None));
    // Demoting-to-Sales stays under the ceiling.
    assert!(gate::can_update_employee(
        &manager,
        &invitee,
        &biz,
        Some(Sales)
    ));
    // Promoting to Manager is assigning a peer rank: denied.
    assert!(!gate::can_update_employee(
        &manager,
        &invitee,
        &biz,
        Some(Manager)
    ));
}

#[test]
fn unrelated_employee_cannot_update() {
    let biz = business_owned_by(StringUuid::new_v4());
    let bystander = Actor::employee(StringUuid::new_v4(), biz.id, Admin);
    let target = employee_of(&biz, Sales);

    assert!(!gate::can_update_employee(&bystander, &target, &biz, None));
}

#[test]
fn owner_bypasses_hierarchy_on_role_change() {
    let owner_id = StringUuid::new_v4();
    let biz = business_owned_by(owner_id);
    let owner = Actor::user(owner_id, false);
    let target = employee_of(&biz, Sales);

    assert!(gate::can_update_employee(&owner, &target, &biz, Some(Admin)));
}

#[test]
fn sales_cannot_escalate_own_role() {
    let biz = business_owned_by(StringUuid::new_v4());
    let sales_id = StringUuid::new_v4();
    let sales = Actor::employee(sales_id, biz.id, Sales);

    let mut own_record = employee_of(&biz, Sales);
    own_record.id = sales_id;

    // Self-update of plain fields is allowed.
    assert!(gate::can_update_employee(&sales, &own_record, &biz, None));
    // Self-promotion is not.
    assert!(!gate::can_update_employee(
        &sales,
        &own_record,
        &biz,
        Some(Admin)
    ));
}

#[rstest]
#[case(Admin, true)]
#[case(Manager, false)]
#[case(Sales, false)]
fn deletion_needs_admin_rank_in_same_business(#[case] actor_role: EmployeeRole, #[case] allowed: bool) {
    let biz = business_owned_by(StringUuid::new_v4());
    let actor = Actor::employee(StringUuid::new_v4(), biz.id, actor_role);
    let target = employee_of(&biz, Sales);

    assert_eq!(gate::can_delete_employee(&actor, &target, &biz), allowed);
}

#[test]
fn admin_of_another_business_cannot_delete() {
    let biz = business_owned_by(StringUuid::new_v4());
    let target = employee_of(&biz, Sales);
    let foreign_admin = Actor::employee(StringUuid::new_v4(), StringUuid::new_v4(), Admin);

    assert!(!gate::can_delete_employee(&foreign_admin, &target, &biz));
}

#[test]
fn retrieval_composes_self_owner_staff_and_rank() {
    let owner_id = StringUuid::new_v4();
    let biz = business_owned_by(owner_id);
    let target = employee_of(&biz, Manager);

    // Self.
    let self_actor = Actor::employee(target.id, biz.id, Manager);
    assert!(gate::can_retrieve_employee(&self_actor, &target, &biz));

    // Owner and staff.
    assert!(gate::can_retrieve_employee(
        &Actor::user(owner_id, false),
        &target,
        &biz
    ));
    assert!(gate::can_retrieve_employee(
        &Actor::user(StringUuid::new_v4(), true),
        &target,
        &biz
    ));

    // Rank dominance: Admin sees Manager, a peer Manager does not.
    let admin = Actor::employee(StringUuid::new_v4(), biz.id, Admin);
    assert!(gate::can_retrieve_employee(&admin, &target, &biz));
    let peer = Actor::employee(StringUuid::new_v4(), biz.id, Manager);
    assert!(!gate::can_retrieve_employee(&peer, &target, &biz));
}

#[test]
fn business_creation_blocked_for_employees() {
    assert!(gate::can_create_business(&Actor::user(
        StringUuid::new_v4(),
        false
    )));
    assert!(!gate::can_create_business(&Actor::employee(
        StringUuid::new_v4(),
        StringUuid::new_v4(),
        Admin
    )));
}

#[test]
fn business_access_is_owner_or_staff() {
    let owner_id = StringUuid::new_v4();
    let biz = business_owned_by(owner_id);

    assert!(gate::can_access_business(&Actor::user(owner_id, false), &biz));
    assert!(gate::can_access_business(
        &Actor::user(StringUuid::new_v4(), true),
        &biz
    ));
    assert!(!gate::can_access_business(
        &Actor::user(StringUuid::new_v4(), false),
        &biz
    ));
    assert!(gate::can_list_businesses(&Actor::user(
        StringUuid::new_v4(),
        true
    )));
    assert!(!gate::can_list_businesses(&Actor::user(
        StringUuid::new_v4(),
        false
    )));
}
