use crate::types::{Address, Amount, ChainId, Nonce};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Record emitted by every successful mutating call, consumed by off-chain observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RelayEvent {
    Deposited {
        from: Address,
        to: Address,
        #[serde(with = "serde_str")]
        amount: Amount,
        dest_chain_id: ChainId,
    },
    Sent {
        source: Address,
        dest: Address,
        #[serde(with = "serde_str")]
        amount: Amount,
        #[serde(with = "serde_str")]
        nonce: Nonce,
    },
    SignerAdded {
        account: Address,
    },
    SignerRemoved {
        account: Address,
    },
    ThresholdChanged {
        value: u32,
    },
    AdminFeeChanged {
        #[serde(with = "serde_str")]
        value: Amount,
    },
    BridgeWalletChanged {
        account: Address,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedEvent {
    pub sequence: u64,
    pub event: RelayEvent,
}

/// Append-only ordered log, sequence numbers start at 1.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    records: Vec<RecordedEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: RelayEvent) -> RecordedEvent {
        let record = RecordedEvent {
            sequence: self.records.len() as u64 + 1,
            event,
        };
        info!(sequence = record.sequence, event = ?record.event, "Relay event recorded");
        self.records.push(record.clone());
        record
    }

    pub fn all(&self) -> &[RecordedEvent] {
        &self.records
    }

    /// Records with a sequence number strictly greater than `sequence`.
    pub fn since(&self, sequence: u64) -> &[RecordedEvent] {
        let start = usize::try_from(sequence).unwrap_or(usize::MAX).min(self.records.len());
        &self.records[start..]
    }

    pub fn last_sequence(&self) -> u64 {
        self.records.len() as u64
    }
}
