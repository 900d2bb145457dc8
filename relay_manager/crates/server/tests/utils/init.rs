use axum_test::http::{HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};
use global_utils::logger::{LoggerGuard, init_logger};
use relay_manager_core::access::OperatorSet;
use relay_manager_core::caller_auth::CallerAuthenticator;
use relay_manager_core::manager::{InitParams, RelayManager};
use relay_manager_core::recovery::{EthereumRecovery, SignerRecovery};
use relay_manager_core::signer::LocalSigner;
use relay_manager_core::token::InMemoryToken;
use relay_manager_core::types::{Address, RelaySignature};
use relay_manager_processor::init::create_relay_processor;
use relay_manager_processor::relay_sender::RelaySender;
use relay_manager_server::middleware::{CALLER_NONCE_HEADER, CALLER_SIGNATURE_HEADER};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};
use tracing::instrument;

pub static TEST_LOGGER: LazyLock<LoggerGuard> = LazyLock::new(|| init_logger());

pub const SIGNER_1_KEY: &str = "0x34cee9ead792f332d133b1bfc7a915438e41bc42cec0ef3f4f79b74877a16012";
pub const SIGNER_2_KEY: &str = "0x16f8c6cc563f28f8b213b85a0f7149243794e3b0f87519833b08f6838892121c";
pub const OPERATOR_KEY: [u8; 32] = [0x0a; 32];
pub const ALICE_KEY: [u8; 32] = [0xa1; 32];
pub const MALLORY_KEY: [u8; 32] = [0xee; 32];

pub const BOB: Address = Address([0xb0; 20]);
pub const BRIDGE_WALLET: Address = Address([0x77; 20]);

pub struct TestContext {
    pub server: TestServer,
    pub relay_sender: RelaySender,
    pub token: Arc<InMemoryToken>,
    pub signer_1: LocalSigner,
    pub signer_2: LocalSigner,
    pub operator: LocalSigner,
    pub alice: LocalSigner,
    pub mallory: LocalSigner,
    caller_nonce: AtomicU64,
}

/// Body bytes together with the caller headers that authorize them.
pub struct SignedBody {
    pub caller_nonce: u64,
    pub signature: RelaySignature,
    pub body: Vec<u8>,
}

impl TestContext {
    /// Signs `body` as `caller` with the next nonce.
    pub fn sign_body(&self, path: &str, caller: &LocalSigner, body: &serde_json::Value) -> anyhow::Result<SignedBody> {
        let body = serde_json::to_vec(body)?;
        let caller_nonce = self.caller_nonce.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(SignedBody {
            caller_nonce,
            signature: caller.sign_request(path, caller_nonce, &body),
            body,
        })
    }

    pub fn post_signed(&self, path: &str, signed: &SignedBody) -> anyhow::Result<TestRequest> {
        Ok(self
            .server
            .post(path)
            .add_header(
                HeaderName::from_static(CALLER_NONCE_HEADER),
                HeaderValue::from(signed.caller_nonce),
            )
            .add_header(
                HeaderName::from_static(CALLER_SIGNATURE_HEADER),
                HeaderValue::from_str(&signed.signature.to_string())?,
            )
            .bytes(signed.body.clone().into())
            .content_type("application/json"))
    }

    pub fn signed_post(&self, path: &str, caller: &LocalSigner, body: &serde_json::Value) -> anyhow::Result<TestRequest> {
        let signed = self.sign_body(path, caller, body)?;
        self.post_signed(path, &signed)
    }
}

/// Signers `{signer_1}`, threshold 1, admin fee 5, one operator, Alice holding 1000.
#[instrument(level = "debug")]
pub async fn init_test_server() -> anyhow::Result<TestContext> {
    let _logger_guard = &*TEST_LOGGER;
    let signer_1 = LocalSigner::new(SIGNER_1_KEY)?;
    let signer_2 = LocalSigner::new(SIGNER_2_KEY)?;
    let operator = LocalSigner::from_secret_bytes(OPERATOR_KEY)?;
    let alice = LocalSigner::from_secret_bytes(ALICE_KEY)?;
    let mallory = LocalSigner::from_secret_bytes(MALLORY_KEY)?;

    let token = Arc::new(InMemoryToken::with_balances([(alice.address(), 1000)]));
    let recovery: Arc<dyn SignerRecovery> = Arc::new(EthereumRecovery);
    let manager = RelayManager::new(
        InitParams {
            admin_fee: 5,
            bridge_wallet: BRIDGE_WALLET,
            threshold: 1,
            signers: vec![signer_1.address()],
        },
        token.clone(),
        Arc::new(OperatorSet::new([operator.address()])),
        recovery.clone(),
    )?;
    let (mut relay_processor, relay_sender) = create_relay_processor(manager, 100);
    tokio::spawn(async move { relay_processor.run().await });

    let app = relay_manager_server::create_app(relay_sender.clone(), Arc::new(CallerAuthenticator::new(recovery))).await;
    let server = TestServer::builder().http_transport().build(app.into_make_service())?;
    tracing::info!("Serving local axum test server on {:?}", server.server_address());
    Ok(TestContext {
        server,
        relay_sender,
        token,
        signer_1,
        signer_2,
        operator,
        alice,
        mallory,
        caller_nonce: AtomicU64::new(0),
    })
}
