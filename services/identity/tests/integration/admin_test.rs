use partline_domain::role::Role;
use partline_identity::error::IdentityServiceError;
use partline_identity::usecase::admin::{DeleteAccountUseCase, ListAccountsUseCase};

use crate::helpers::{MockAccountRepo, test_account};

#[tokio::test]
async fn list_returns_every_partition() {
    let repo = MockAccountRepo::new(vec![
        test_account("+911111111111", Role::Admin, "PARTLINE01"),
        test_account("+912222222222", Role::Vendor, "VENDOR01"),
        test_account("+913333333333", Role::Garage, "GARAGE01"),
        test_account("+914444444444", Role::Delivery, "RIDER001"),
    ]);

    let accounts = ListAccountsUseCase {
        accounts: repo,
    }
    .execute()
    .await
    .unwrap();
    assert_eq!(accounts.len(), 4);

    let roles: Vec<_> = accounts.iter().map(|a| a.role).collect();
    for role in [Role::Admin, Role::Vendor, Role::Garage, Role::Delivery] {
        assert!(roles.contains(&role));
    }
}

#[tokio::test]
async fn delete_removes_the_account() {
    let account = test_account("+912222222222", Role::Vendor, "VENDOR01");
    let account_id = account.id;
    let repo = MockAccountRepo::new(vec![account]);

    DeleteAccountUseCase {
        accounts: repo.clone(),
    }
    .execute(account_id)
    .await
    .unwrap();

    assert!(repo.accounts_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn delete_of_unknown_account_is_not_found() {
    let result = DeleteAccountUseCase {
        accounts: MockAccountRepo::empty(),
    }
    .execute(uuid::Uuid::new_v4())
    .await;
    assert!(matches!(result, Err(IdentityServiceError::AccountNotFound)));
}
