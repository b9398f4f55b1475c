use partline_auth_types::token::validate_access_token;
use partline_domain::role::Role;
use partline_identity::error::IdentityServiceError;
use partline_identity::infra::otp::MemoryOtpGateway;
use partline_identity::usecase::pin::{
    ResetPinInput, ResetPinUseCase, SetPinInput, SetPinUseCase, VerifyPinInput, VerifyPinUseCase,
};

use crate::helpers::{FailingOtpGateway, MockAccountRepo, TEST_JWT_SECRET, test_account};

fn set_pin(repo: &MockAccountRepo) -> SetPinUseCase<MockAccountRepo> {
    SetPinUseCase {
        accounts: repo.clone(),
    }
}

fn verify_pin(repo: &MockAccountRepo) -> VerifyPinUseCase<MockAccountRepo> {
    VerifyPinUseCase {
        accounts: repo.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
}

// ── SetPin ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn set_then_verify_pin_yields_token_with_stored_role() {
    let account = test_account("+911234567890", Role::Garage, "GARAGE01");
    let account_id = account.id;
    let repo = MockAccountRepo::new(vec![account]);

    set_pin(&repo)
        .execute(SetPinInput {
            account_id,
            pin: "1234".to_owned(),
            confirm_pin: "1234".to_owned(),
        })
        .await
        .unwrap();

    let out = verify_pin(&repo)
        .execute(VerifyPinInput {
            phone: "+911234567890".to_owned(),
            pin: "1234".to_owned(),
        })
        .await
        .unwrap();

    let info = validate_access_token(&out.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.role, Role::Garage);
    assert_eq!(info.account_id, account_id);
}

#[tokio::test]
async fn should_reject_mismatched_confirmation() {
    let account = test_account("+911234567890", Role::Garage, "GARAGE01");
    let account_id = account.id;
    let repo = MockAccountRepo::new(vec![account]);

    let result = set_pin(&repo)
        .execute(SetPinInput {
            account_id,
            pin: "1234".to_owned(),
            confirm_pin: "4321".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(IdentityServiceError::PinMismatch)));
}

#[tokio::test]
async fn should_reject_non_four_digit_pins() {
    let account = test_account("+911234567890", Role::Garage, "GARAGE01");
    let account_id = account.id;
    let repo = MockAccountRepo::new(vec![account]);

    for bad in ["123", "12345", "12a4", ""] {
        let result = set_pin(&repo)
            .execute(SetPinInput {
                account_id,
                pin: bad.to_owned(),
                confirm_pin: bad.to_owned(),
            })
            .await;
        assert!(
            matches!(result, Err(IdentityServiceError::InvalidPinFormat)),
            "expected InvalidPinFormat for {bad:?}"
        );
    }
}

#[tokio::test]
async fn set_pin_for_unknown_account_is_not_found() {
    let result = set_pin(&MockAccountRepo::empty())
        .execute(SetPinInput {
            account_id: uuid::Uuid::new_v4(),
            pin: "1234".to_owned(),
            confirm_pin: "1234".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(IdentityServiceError::AccountNotFound)));
}

#[tokio::test]
async fn stored_pin_is_hashed_and_updated_at_bumped() {
    let account = test_account("+911234567890", Role::Vendor, "VENDOR01");
    let account_id = account.id;
    let created_at = account.created_at;
    let repo = MockAccountRepo::new(vec![account]);

    set_pin(&repo)
        .execute(SetPinInput {
            account_id,
            pin: "1234".to_owned(),
            confirm_pin: "1234".to_owned(),
        })
        .await
        .unwrap();

    let accounts = repo.accounts_handle();
    let accounts = accounts.lock().unwrap();
    let stored = accounts[0].pin_hash.as_deref().unwrap();
    assert!(stored.starts_with("$argon2"));
    assert!(!stored.contains("1234"));
    assert!(accounts[0].updated_at >= created_at);
}

// ── VerifyPin ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn wrong_pin_is_invalid_pin() {
    let account = test_account("+911234567890", Role::Garage, "GARAGE01");
    let account_id = account.id;
    let repo = MockAccountRepo::new(vec![account]);

    set_pin(&repo)
        .execute(SetPinInput {
            account_id,
            pin: "1234".to_owned(),
            confirm_pin: "1234".to_owned(),
        })
        .await
        .unwrap();

    let result = verify_pin(&repo)
        .execute(VerifyPinInput {
            phone: "+911234567890".to_owned(),
            pin: "9999".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(IdentityServiceError::InvalidPin)));
}

#[tokio::test]
async fn verify_with_no_pin_set_is_invalid_pin() {
    let account = test_account("+911234567890", Role::Garage, "GARAGE01");
    let repo = MockAccountRepo::new(vec![account]);

    let result = verify_pin(&repo)
        .execute(VerifyPinInput {
            phone: "+911234567890".to_owned(),
            pin: "1234".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(IdentityServiceError::InvalidPin)));
}

#[tokio::test]
async fn verify_for_unknown_phone_is_not_found() {
    let result = verify_pin(&MockAccountRepo::empty())
        .execute(VerifyPinInput {
            phone: "+911234567890".to_owned(),
            pin: "1234".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(IdentityServiceError::AccountNotFound)));
}

// ── ResetPin ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn reset_replaces_the_old_pin_after_otp_check() {
    let account = test_account("+911234567890", Role::Garage, "GARAGE01");
    let account_id = account.id;
    let repo = MockAccountRepo::new(vec![account]);
    let gateway = MemoryOtpGateway::new();
    gateway.preload("+911234567890", "123456");

    set_pin(&repo)
        .execute(SetPinInput {
            account_id,
            pin: "1234".to_owned(),
            confirm_pin: "1234".to_owned(),
        })
        .await
        .unwrap();

    ResetPinUseCase {
        accounts: repo.clone(),
        gateway,
    }
    .execute(ResetPinInput {
        phone: "+911234567890".to_owned(),
        otp: "123456".to_owned(),
        new_pin: "5678".to_owned(),
        confirm_pin: "5678".to_owned(),
    })
    .await
    .unwrap();

    let old = verify_pin(&repo)
        .execute(VerifyPinInput {
            phone: "+911234567890".to_owned(),
            pin: "1234".to_owned(),
        })
        .await;
    assert!(matches!(old, Err(IdentityServiceError::InvalidPin)));

    verify_pin(&repo)
        .execute(VerifyPinInput {
            phone: "+911234567890".to_owned(),
            pin: "5678".to_owned(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn reset_with_wrong_otp_fails_and_keeps_old_pin() {
    let account = test_account("+911234567890", Role::Garage, "GARAGE01");
    let account_id = account.id;
    let repo = MockAccountRepo::new(vec![account]);
    let gateway = MemoryOtpGateway::new();
    gateway.preload("+911234567890", "123456");

    set_pin(&repo)
        .execute(SetPinInput {
            account_id,
            pin: "1234".to_owned(),
            confirm_pin: "1234".to_owned(),
        })
        .await
        .unwrap();

    let result = ResetPinUseCase {
        accounts: repo.clone(),
        gateway,
    }
    .execute(ResetPinInput {
        phone: "+911234567890".to_owned(),
        otp: "000000".to_owned(),
        new_pin: "5678".to_owned(),
        confirm_pin: "5678".to_owned(),
    })
    .await;
    assert!(matches!(
        result,
        Err(IdentityServiceError::OtpVerificationFailed)
    ));

    // Old PIN still works.
    verify_pin(&repo)
        .execute(VerifyPinInput {
            phone: "+911234567890".to_owned(),
            pin: "1234".to_owned(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn reset_checks_pin_pair_before_touching_the_gateway() {
    let account = test_account("+911234567890", Role::Garage, "GARAGE01");
    let repo = MockAccountRepo::new(vec![account]);

    // Failing gateway: reaching it would error with GatewayUnavailable.
    let result = ResetPinUseCase {
        accounts: repo,
        gateway: FailingOtpGateway,
    }
    .execute(ResetPinInput {
        phone: "+911234567890".to_owned(),
        otp: "123456".to_owned(),
        new_pin: "5678".to_owned(),
        confirm_pin: "8765".to_owned(),
    })
    .await;
    assert!(matches!(result, Err(IdentityServiceError::PinMismatch)));
}
