use global_utils::logger::{LoggerGuard, init_logger};
use relay_manager_core::access::OperatorSet;
use relay_manager_core::manager::{InitParams, RelayManager};
use relay_manager_core::recovery::EthereumRecovery;
use relay_manager_core::signer::LocalSigner;
use relay_manager_core::token::InMemoryToken;
use relay_manager_core::types::{Address, Amount};
use std::sync::{Arc, LazyLock};

pub static TEST_LOGGER: LazyLock<LoggerGuard> = LazyLock::new(|| init_logger());

pub const SIGNER_1_KEY: &str = "0x34cee9ead792f332d133b1bfc7a915438e41bc42cec0ef3f4f79b74877a16012";
pub const SIGNER_2_KEY: &str = "0x16f8c6cc563f28f8b213b85a0f7149243794e3b0f87519833b08f6838892121c";

pub const ADMIN_FEE: Amount = 5;
pub const OPERATOR: Address = Address([0x0a; 20]);
pub const ALICE: Address = Address([0xa1; 20]);
pub const BOB: Address = Address([0xb0; 20]);
pub const BRIDGE_WALLET: Address = Address([0x77; 20]);

pub struct Harness {
    pub manager: RelayManager,
    pub token: Arc<InMemoryToken>,
    pub signer_1: LocalSigner,
    pub signer_2: LocalSigner,
}

/// Founding signer set `{signer_1}` with threshold 1, Alice holding 1000 tokens.
pub fn init_harness() -> anyhow::Result<Harness> {
    let signer_1 = LocalSigner::new(SIGNER_1_KEY)?;
    let signer_2 = LocalSigner::new(SIGNER_2_KEY)?;
    let token = Arc::new(InMemoryToken::with_balances([(ALICE, 1000)]));
    let manager = RelayManager::new(
        InitParams {
            admin_fee: ADMIN_FEE,
            bridge_wallet: BRIDGE_WALLET,
            threshold: 1,
            signers: vec![signer_1.address()],
        },
        token.clone(),
        Arc::new(OperatorSet::new([OPERATOR])),
        Arc::new(EthereumRecovery),
    )?;
    Ok(Harness {
        manager,
        token,
        signer_1,
        signer_2,
    })
}

pub fn numbered_signers(count: u8) -> anyhow::Result<Vec<LocalSigner>> {
    (1..=count)
        .map(|i| Ok(LocalSigner::from_secret_bytes([i; 32])?))
        .collect()
}
