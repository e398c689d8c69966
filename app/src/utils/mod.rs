pub mod email;
pub mod jwt;
pub mod otp;
pub mod password;
pub mod qr;
pub mod whatsapp;

pub use jwt::{decode_data, encode_data};
