use partline_auth_types::token::{ACCESS_TOKEN_TTL_SECS, AuthError, validate_access_token};
use partline_domain::role::Role;
use partline_identity::usecase::token::issue_access_token;

use crate::helpers::{TEST_JWT_SECRET, test_account};

#[tokio::test]
async fn issued_claims_survive_the_round_trip() {
    for role in [Role::Admin, Role::Vendor, Role::Garage, Role::Delivery] {
        let account = test_account("+911234567890", role, "ABCD2345");
        let (token, exp) = issue_access_token(&account, TEST_JWT_SECRET).unwrap();

        let info = validate_access_token(&token, TEST_JWT_SECRET).unwrap();
        assert_eq!(info.account_id, account.id);
        assert_eq!(info.phone, account.phone);
        assert_eq!(info.role, role);
        assert_eq!(info.access_token_exp, exp);
    }
}

#[tokio::test]
async fn token_expires_24_hours_out() {
    let account = test_account("+911234567890", Role::Garage, "ABCD2345");
    let (_, exp) = issue_access_token(&account, TEST_JWT_SECRET).unwrap();

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs();
    assert!(exp.abs_diff(now + ACCESS_TOKEN_TTL_SECS) <= 2);
}

#[tokio::test]
async fn wrong_secret_is_rejected() {
    let account = test_account("+911234567890", Role::Vendor, "ABCD2345");
    let (token, _) = issue_access_token(&account, TEST_JWT_SECRET).unwrap();

    let err = validate_access_token(&token, "some-other-secret").unwrap_err();
    assert!(matches!(err, AuthError::InvalidSignature));
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let account = test_account("+911234567890", Role::Vendor, "ABCD2345");
    let (token, _) = issue_access_token(&account, TEST_JWT_SECRET).unwrap();

    // Flip part of the payload; the signature no longer matches.
    let tampered = token.replace('a', "b");
    assert!(validate_access_token(&tampered, TEST_JWT_SECRET).is_err());
}
