pub mod admin;
pub mod otp;
pub mod team;

mod de;
pub mod validation;
