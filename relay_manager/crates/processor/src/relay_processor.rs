use crate::errors::RelayProcessorError;
use crate::types::*;
use global_utils::common_resp::Empty;
use global_utils::common_types::get_uuid;
use relay_manager_core::manager::RelayManager;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

// Single writer over the relay manager state.
// Messages are handled one at a time in arrival order, so no two mutations ever interleave.
pub struct RelayProcessor {
    pub tx_receiver: mpsc::Receiver<(RelayProcessorMessage, OneshotRelayProcessorSender)>,
    pub manager: RelayManager,
    pub cancellation_token: CancellationToken,
}

impl RelayProcessor {
    pub fn new(
        tx_receiver: mpsc::Receiver<(RelayProcessorMessage, OneshotRelayProcessorSender)>,
        manager: RelayManager,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            tx_receiver,
            manager,
            cancellation_token,
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn run(&mut self) {
        loop {
            tokio::select! {
                biased;
                _ = self.cancellation_token.cancelled() => {
                    tracing::info!("Shutting down relay processor");
                    self.reject_pending();
                    break;
                }
                wrapper = self.tx_receiver.recv() => {
                    match wrapper {
                        None => {
                            tracing::info!("All relay senders dropped, stopping relay processor");
                            break;
                        }
                        Some((message, response_sender)) => {
                            let request_id = get_uuid();
                            let operation = message.name();
                            tracing::debug!(%request_id, operation, "Received message");

                            let response = self.handle(message);
                            if let Err(e) = &response {
                                tracing::warn!(%request_id, operation, error = %e, "Message rejected");
                            }
                            if response_sender.send(response).is_err() {
                                tracing::warn!(%request_id, operation, "Requester went away before the response was sent");
                            }
                        }
                    }
                }
            }
        }
    }

    pub fn handle(&mut self, message: RelayProcessorMessage) -> Result<RelayProcessorResponse, RelayProcessorError> {
        let manager = &mut self.manager;
        let response = match message {
            RelayProcessorMessage::AddSigner(request) => {
                RelayProcessorResponse::Recorded(manager.add_signer(request.caller, request.account, &request.signatures)?)
            }
            RelayProcessorMessage::RemoveSigner(request) => RelayProcessorResponse::Recorded(manager.remove_signer(
                request.caller,
                request.account,
                &request.signatures,
            )?),
            RelayProcessorMessage::SetThreshold(request) => RelayProcessorResponse::Recorded(manager.set_threshold(
                request.caller,
                request.threshold,
                &request.signatures,
            )?),
            RelayProcessorMessage::SetAdminFee(request) => RelayProcessorResponse::Recorded(manager.set_admin_fee(
                request.caller,
                request.admin_fee,
                &request.signatures,
            )?),
            RelayProcessorMessage::SetBridgeWallet(request) => RelayProcessorResponse::Recorded(
                manager.set_bridge_wallet(request.caller, request.bridge_wallet, &request.signatures)?,
            ),
            RelayProcessorMessage::Send(request) => {
                RelayProcessorResponse::Recorded(manager.send(request.transfer_key(), &request.signatures)?)
            }
            RelayProcessorMessage::Deposit(request) => RelayProcessorResponse::Recorded(manager.deposit(
                request.caller,
                request.receiver,
                request.amount,
                request.dest_chain_id,
            )?),
            RelayProcessorMessage::GetState(_) => RelayProcessorResponse::State(manager.state()),
            RelayProcessorMessage::IsProcessed(request) => RelayProcessorResponse::IsProcessed(IsProcessedResponse {
                processed: manager.is_processed(&request.transfer),
                transfer: request.transfer,
            }),
            RelayProcessorMessage::GetEvents(request) => RelayProcessorResponse::Events(GetEventsResponse {
                events: manager.events_since(request.since).to_vec(),
                last_sequence: manager.state().last_event_sequence,
            }),
            RelayProcessorMessage::Healthcheck(_) => RelayProcessorResponse::Healthcheck(Empty {}),
        };
        Ok(response)
    }

    fn reject_pending(&mut self) {
        self.tx_receiver.close();
        let mut rejected = 0usize;
        while let Ok((message, response_sender)) = self.tx_receiver.try_recv() {
            let _ = response_sender.send(Err(RelayProcessorError::ChannelClosedError(format!(
                "Relay processor is shut down, '{}' was not applied",
                message.name()
            ))));
            rejected += 1;
        }
        if rejected > 0 {
            tracing::info!(rejected, "Rejected queued messages on shutdown");
        }
    }
}
