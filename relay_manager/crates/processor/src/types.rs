use crate::errors::RelayProcessorError;
use global_utils::common_resp::Empty;
use relay_manager_core::events::RecordedEvent;
use relay_manager_core::manager::RelayState;
use relay_manager_core::types::{Address, Amount, ChainId, Nonce, RelaySignature, TransferKey};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

pub type OneshotRelayProcessorSender = oneshot::Sender<Result<RelayProcessorResponse, RelayProcessorError>>;

#[derive(Debug, Clone)]
pub enum RelayProcessorMessage {
    AddSigner(AddSignerRequest),
    RemoveSigner(RemoveSignerRequest),
    SetThreshold(SetThresholdRequest),
    SetAdminFee(SetAdminFeeRequest),
    SetBridgeWallet(SetBridgeWalletRequest),
    Send(SendRequest),
    Deposit(DepositRequest),
    GetState(GetStateRequest),
    IsProcessed(IsProcessedRequest),
    GetEvents(GetEventsRequest),
    Healthcheck(HealthcheckRequest),
}

impl RelayProcessorMessage {
    pub fn name(&self) -> &'static str {
        match self {
            RelayProcessorMessage::AddSigner(_) => "add_signer",
            RelayProcessorMessage::RemoveSigner(_) => "remove_signer",
            RelayProcessorMessage::SetThreshold(_) => "set_threshold",
            RelayProcessorMessage::SetAdminFee(_) => "set_admin_fee",
            RelayProcessorMessage::SetBridgeWallet(_) => "set_bridge_wallet",
            RelayProcessorMessage::Send(_) => "send",
            RelayProcessorMessage::Deposit(_) => "deposit",
            RelayProcessorMessage::GetState(_) => "get_state",
            RelayProcessorMessage::IsProcessed(_) => "is_processed",
            RelayProcessorMessage::GetEvents(_) => "get_events",
            RelayProcessorMessage::Healthcheck(_) => "healthcheck",
        }
    }
}

#[derive(Debug, Clone)]
pub enum RelayProcessorResponse {
    Recorded(RecordedEvent),
    State(RelayState),
    IsProcessed(IsProcessedResponse),
    Events(GetEventsResponse),
    Healthcheck(Empty),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddSignerRequest {
    pub caller: Address,
    pub account: Address,
    pub signatures: Vec<RelaySignature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveSignerRequest {
    pub caller: Address,
    pub account: Address,
    pub signatures: Vec<RelaySignature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetThresholdRequest {
    pub caller: Address,
    pub threshold: u32,
    pub signatures: Vec<RelaySignature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetAdminFeeRequest {
    pub caller: Address,
    #[serde(with = "serde_str")]
    pub admin_fee: Amount,
    pub signatures: Vec<RelaySignature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetBridgeWalletRequest {
    pub caller: Address,
    pub bridge_wallet: Address,
    pub signatures: Vec<RelaySignature>,
}

/// Outbound release; anyone holding a valid quorum may submit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendRequest {
    pub source: Address,
    pub dest: Address,
    #[serde(with = "serde_str")]
    pub amount: Amount,
    #[serde(with = "serde_str")]
    pub nonce: Nonce,
    pub signatures: Vec<RelaySignature>,
}

impl SendRequest {
    pub fn transfer_key(&self) -> TransferKey {
        TransferKey {
            source: self.source,
            dest: self.dest,
            amount: self.amount,
            nonce: self.nonce,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRequest {
    pub caller: Address,
    pub receiver: Address,
    #[serde(with = "serde_str")]
    pub amount: Amount,
    pub dest_chain_id: ChainId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetStateRequest {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsProcessedRequest {
    #[serde(flatten)]
    pub transfer: TransferKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsProcessedResponse {
    pub transfer: TransferKey,
    pub processed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetEventsRequest {
    /// Only records with a greater sequence number are returned.
    #[serde(default)]
    pub since: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetEventsResponse {
    pub events: Vec<RecordedEvent>,
    pub last_sequence: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthcheckRequest {}
