pub mod db;
pub mod otp;
