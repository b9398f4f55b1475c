
mod admin_test;
mod pin_test;
mod profile_test;
mod token_test;
