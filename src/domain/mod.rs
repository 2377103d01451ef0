//! Domain models for the accounts service

mod business;
mod common;
mod contact;
mod employee;
mod invitation;
mod user;

pub use business::{Business, CreateBusinessInput, UpdateBusinessInput};
pub use common::StringUuid;
pub use contact::{Customer, Supplier};
pub use employee::{Employee, EmployeeRole, UpdateEmployeeInput};
pub use invitation::{
    AcceptInvitationInput, CreateInvitationInput, EmployeeInvitation, InvitationResponse,
};
pub use user::{
    ChangePasswordInput, CreateUserInput, LoginInput, PasswordResetToken,
    RequestPasswordResetInput, ResetPasswordInput, UpdateUserInput, User, PHONE_REGEX,
};

/// Capability interface for resources that support owner-based
/// authorization. Replaces ad-hoc "does it have a created_by field"
/// checks with an explicit contract.
pub trait Ownable {
    /// Primary key of the record itself
    fn record_id(&self) -> StringUuid;

    /// Who created the record, if the resource tracks that at all.
    /// `None` means ownership falls back to the record being the
    /// actor's own identity.
    fn creator_id(&self) -> Option<StringUuid>;
}
