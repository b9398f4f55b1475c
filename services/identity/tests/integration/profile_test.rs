use serde_json::json;

use partline_domain::profile::RoleProfile;
use partline_domain::role::Role;
use partline_identity::error::IdentityServiceError;
use partline_identity::usecase::profile::{
    AddAddressInput, AddAddressUseCase, GetAccountUseCase, UpdateProfileUseCase,
};

use crate::helpers::{MockAccountRepo, test_account};

fn address(tag: &str, is_default: bool) -> AddAddressInput {
    AddAddressInput {
        tag: tag.to_owned(),
        address_line: Some("12 MG Road".to_owned()),
        city: Some("Bengaluru".to_owned()),
        state: Some("Karnataka".to_owned()),
        pincode: Some("560001".to_owned()),
        location: None,
        is_default,
    }
}

// ── GetAccount ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_account_by_id() {
    let account = test_account("+911234567890", Role::Garage, "GARAGE01");
    let account_id = account.id;
    let repo = MockAccountRepo::new(vec![account]);

    let found = GetAccountUseCase {
        accounts: repo,
    }
    .execute(account_id)
    .await
    .unwrap();
    assert_eq!(found.id, account_id);
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let result = GetAccountUseCase {
        accounts: MockAccountRepo::empty(),
    }
    .execute(uuid::Uuid::new_v4())
    .await;
    assert!(matches!(result, Err(IdentityServiceError::AccountNotFound)));
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

#[tokio::test]
async fn garage_patch_updates_base_and_profile_fields() {
    let account = test_account("+911234567890", Role::Garage, "GARAGE01");
    let account_id = account.id;
    let repo = MockAccountRepo::new(vec![account]);

    UpdateProfileUseCase {
        accounts: repo.clone(),
    }
    .execute(
        account_id,
        json!({
            "full_name": "Asha Mechanic",
            "garage_name": "Asha Auto Works",
            "brands_served": ["maruti", "tata"],
        }),
    )
    .await
    .unwrap();

    let accounts = repo.accounts_handle();
    let accounts = accounts.lock().unwrap();
    let stored = &accounts[0];
    assert_eq!(stored.full_name.as_deref(), Some("Asha Mechanic"));
    match &stored.profile {
        RoleProfile::Garage(p) => {
            assert_eq!(p.garage_name.as_deref(), Some("Asha Auto Works"));
            assert_eq!(p.brands_served, vec!["maruti", "tata"]);
            // Untouched field stays untouched.
            assert!(p.garage_size.is_none());
        }
        other => panic!("expected garage profile, got {other:?}"),
    }
}

#[tokio::test]
async fn patch_with_another_roles_fields_is_rejected() {
    let account = test_account("+911234567890", Role::Garage, "GARAGE01");
    let account_id = account.id;
    let repo = MockAccountRepo::new(vec![account]);

    // `gstin` belongs to vendors; a garage patch must not accept it.
    let result = UpdateProfileUseCase {
        accounts: repo,
    }
    .execute(account_id, json!({ "gstin": "29ABCDE1234F1Z5" }))
    .await;
    assert!(matches!(result, Err(IdentityServiceError::InvalidProfile)));
}

#[tokio::test]
async fn empty_patch_is_missing_data() {
    let account = test_account("+911234567890", Role::Vendor, "VENDOR01");
    let account_id = account.id;
    let repo = MockAccountRepo::new(vec![account]);

    let result = UpdateProfileUseCase {
        accounts: repo,
    }
    .execute(account_id, json!({}))
    .await;
    assert!(matches!(result, Err(IdentityServiceError::MissingData)));
}

// ── AddAddress ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_append_address_with_generated_id() {
    let account = test_account("+911234567890", Role::Garage, "GARAGE01");
    let account_id = account.id;
    let repo = MockAccountRepo::new(vec![account]);

    let added = AddAddressUseCase {
        accounts: repo.clone(),
    }
    .execute(account_id, address("shop", false))
    .await
    .unwrap();

    let accounts = repo.accounts_handle();
    let accounts = accounts.lock().unwrap();
    assert_eq!(accounts[0].addresses.len(), 1);
    assert_eq!(accounts[0].addresses[0].address_id, added.address_id);
    assert_eq!(accounts[0].addresses[0].tag, "shop");
}

#[tokio::test]
async fn new_default_address_clears_previous_default() {
    let account = test_account("+911234567890", Role::Garage, "GARAGE01");
    let account_id = account.id;
    let repo = MockAccountRepo::new(vec![account]);

    let usecase = AddAddressUseCase {
        accounts: repo.clone(),
    };
    usecase
        .execute(account_id, address("home", true))
        .await
        .unwrap();
    usecase
        .execute(account_id, address("shop", true))
        .await
        .unwrap();

    let accounts = repo.accounts_handle();
    let accounts = accounts.lock().unwrap();
    let defaults: Vec<_> = accounts[0]
        .addresses
        .iter()
        .filter(|a| a.is_default)
        .collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0].tag, "shop");
}
