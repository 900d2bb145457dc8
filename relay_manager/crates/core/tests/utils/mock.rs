use mockall::mock;
use relay_manager_core::errors::TokenError;
use relay_manager_core::traits::{AccessControl, TokenModule};
use relay_manager_core::types::{Address, Amount};

mock! {
    pub Token {}
    impl TokenModule for Token {
        fn burn(&self, account: Address, amount: Amount) -> Result<(), TokenError>;
        fn mint(&self, account: Address, amount: Amount) -> Result<(), TokenError>;
    }
}

mock! {
    pub Access {}
    impl AccessControl for Access {
        fn is_operator(&self, caller: Address) -> bool;
    }
}

pub fn permissive_access() -> MockAccess {
    let mut access = MockAccess::new();
    access.expect_is_operator().returning(|_| true);
    access
}
