pub mod admin;
pub mod login;
pub mod pin;
pub mod profile;
pub mod sequence;
pub mod token;
