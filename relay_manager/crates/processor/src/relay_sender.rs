use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

use crate::{errors::RelayProcessorError, types::*};
use global_utils::common_resp::Empty;
use relay_manager_core::events::RecordedEvent;
use relay_manager_core::manager::RelayState;

// This trait is used in order to send typed messages to the relay processor
#[async_trait::async_trait]
pub trait TypedMessageSender<S, R> {
    async fn send(&self, message: S) -> Result<R, RelayProcessorError>;
}

// Cloneable handle that sends messages to the relay processor and waits for the response
#[derive(Clone)]
pub struct RelaySender {
    tx_sender: mpsc::Sender<(RelayProcessorMessage, OneshotRelayProcessorSender)>,
    cancellation_token: CancellationToken,
}

impl RelaySender {
    pub fn new(
        tx_sender: mpsc::Sender<(RelayProcessorMessage, OneshotRelayProcessorSender)>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            tx_sender,
            cancellation_token,
        }
    }

    pub async fn send_messsage(
        &self,
        message: RelayProcessorMessage,
    ) -> Result<RelayProcessorResponse, RelayProcessorError> {
        if self.cancellation_token.is_cancelled() {
            return Err(RelayProcessorError::ChannelClosedError(
                "Relay processor is shut down".to_string(),
            ));
        }
        let (router_sender, router_receiver) =
            oneshot::channel::<Result<RelayProcessorResponse, RelayProcessorError>>();
        let send_response = self.tx_sender.send((message, router_sender)).await;

        match send_response {
            Ok(_) => router_receiver
                .await
                .map_err(|_| RelayProcessorError::ChannelClosedError("Channel closed".to_string()))?,
            Err(e) => Err(RelayProcessorError::ChannelClosedError(e.to_string())),
        }
    }

    pub async fn shutdown(&self) {
        self.cancellation_token.cancel();
    }
}

macro_rules! impl_typed_sender {
    ($request:ty => $response:ty, $message:ident, $expected:ident) => {
        #[async_trait::async_trait]
        impl TypedMessageSender<$request, $response> for RelaySender {
            async fn send(&self, request: $request) -> Result<$response, RelayProcessorError> {
                let response = self.send_messsage(RelayProcessorMessage::$message(request)).await?;
                match response {
                    RelayProcessorResponse::$expected(response) => Ok(response),
                    x => Err(RelayProcessorError::InvalidResponseType(format!(
                        "Invalid response type, obtain: {x:?}, expected: [RelayProcessorResponse::{}]",
                        stringify!($expected)
                    ))),
                }
            }
        }
    };
}

impl_typed_sender!(AddSignerRequest => RecordedEvent, AddSigner, Recorded);
impl_typed_sender!(RemoveSignerRequest => RecordedEvent, RemoveSigner, Recorded);
impl_typed_sender!(SetThresholdRequest => RecordedEvent, SetThreshold, Recorded);
impl_typed_sender!(SetAdminFeeRequest => RecordedEvent, SetAdminFee, Recorded);
impl_typed_sender!(SetBridgeWalletRequest => RecordedEvent, SetBridgeWallet, Recorded);
impl_typed_sender!(SendRequest => RecordedEvent, Send, Recorded);
impl_typed_sender!(DepositRequest => RecordedEvent, Deposit, Recorded);
impl_typed_sender!(GetStateRequest => RelayState, GetState, State);
impl_typed_sender!(IsProcessedRequest => IsProcessedResponse, IsProcessed, IsProcessed);
impl_typed_sender!(GetEventsRequest => GetEventsResponse, GetEvents, Events);
impl_typed_sender!(HealthcheckRequest => Empty, Healthcheck, Healthcheck);
