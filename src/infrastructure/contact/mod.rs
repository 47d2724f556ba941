// ============================================================
// CONTACT VALIDATION
// ============================================================
// Phone and email validators backed by phonenumber and validator

mod email_validator;
mod phone_validator;

pub use email_validator::EmailValidator;
pub use phone_validator::PhoneValidator;
