use crate::relay_processor::RelayProcessor;
use crate::relay_sender::RelaySender;
use relay_manager_core::manager::RelayManager;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub fn create_relay_processor(manager: RelayManager, channel_capacity: usize) -> (RelayProcessor, RelaySender) {
    let (tx_sender, tx_receiver) = mpsc::channel(channel_capacity.max(1));
    let cancellation_token = CancellationToken::new();
    let relay_processor = RelayProcessor::new(tx_receiver, manager, cancellation_token.clone());
    let relay_sender = RelaySender::new(tx_sender, cancellation_token);
    (relay_processor, relay_sender)
}
