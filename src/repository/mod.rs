//! Data access layer (Repository pattern)

pub mod business;
pub mod employee;
pub mod invitation;
pub mod password_reset;
pub mod user;

pub use business::BusinessRepository;
pub use employee::EmployeeRepository;
pub use invitation::InvitationRepository;
pub use password_reset::PasswordResetRepository;
pub use user::UserRepository;
