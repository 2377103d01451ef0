//! Business logic layer

pub mod auth;
pub mod business;
pub mod employee;
pub mod invitation;
pub mod password_reset;
pub mod user;

pub use auth::AuthService;
pub use business::BusinessService;
pub use employee::EmployeeService;
pub use invitation::InvitationService;
pub use password_reset::PasswordResetService;
pub use user::UserService;
