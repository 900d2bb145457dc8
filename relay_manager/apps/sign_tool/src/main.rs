use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use relay_manager_core::message::CanonicalMessage;
use relay_manager_core::signer::{LocalSigner, sign_in_quorum_order};
use relay_manager_core::types::{Address, Amount, Nonce};

/// Computes canonical relay digests and signs them with local keys.
#[derive(Parser, Debug)]
#[command(name = "relay-sign-tool", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prints the signer address of a private key
    Address {
        #[arg(long)]
        key: String,
    },
    /// Prints the message digest and the prefixed signing digest of an operation
    Digest {
        #[command(subcommand)]
        operation: Operation,
    },
    /// Signs an operation with every `--key` and prints the signatures in quorum order as JSON
    Sign {
        #[arg(long = "key", required = true)]
        keys: Vec<String>,
        #[command(subcommand)]
        operation: Operation,
    },
    /// Signs an HTTP request body as its caller and prints the `x-caller-*` header values
    SignRequest {
        #[arg(long)]
        key: String,
        #[arg(long)]
        path: String,
        #[arg(long)]
        nonce: u64,
        /// Exact JSON body that will be sent
        body: String,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Operation {
    AddSigner {
        account: Address,
    },
    RemoveSigner {
        account: Address,
    },
    SetThreshold {
        threshold: u32,
    },
    SetAdminFee {
        admin_fee: Amount,
    },
    SetBridgeWallet {
        bridge_wallet: Address,
    },
    Send {
        source: Address,
        dest: Address,
        amount: Amount,
        nonce: Nonce,
    },
}

impl From<Operation> for CanonicalMessage {
    fn from(operation: Operation) -> Self {
        match operation {
            Operation::AddSigner { account } => CanonicalMessage::AddSigner(account),
            Operation::RemoveSigner { account } => CanonicalMessage::RemoveSigner(account),
            Operation::SetThreshold { threshold } => CanonicalMessage::SetThreshold(threshold),
            Operation::SetAdminFee { admin_fee } => CanonicalMessage::SetAdminFee(admin_fee),
            Operation::SetBridgeWallet { bridge_wallet } => CanonicalMessage::SetBridgeWallet(bridge_wallet),
            Operation::Send {
                source,
                dest,
                amount,
                nonce,
            } => CanonicalMessage::Send {
                source,
                dest,
                amount,
                nonce,
            },
        }
    }
}

fn run(command: Command) -> Result<String> {
    match command {
        Command::Address { key } => {
            let signer = LocalSigner::new(&key).wrap_err("Failed to load private key")?;
            Ok(signer.address().to_string())
        }
        Command::Digest { operation } => {
            let message = CanonicalMessage::from(operation);
            Ok(serde_json::to_string_pretty(&serde_json::json!({
                "operation": message.operation(),
                "encoded": format!("0x{}", hex::encode(message.encode())),
                "message_digest": format!("0x{}", hex::encode(message.digest())),
                "signing_digest": format!("0x{}", hex::encode(message.signing_digest())),
            }))?)
        }
        Command::Sign { keys, operation } => {
            let signers = keys
                .iter()
                .map(|key| LocalSigner::new(key))
                .collect::<Result<Vec<_>, _>>()
                .wrap_err("Failed to load private key")?;
            let signers = signers.iter().collect::<Vec<_>>();
            let signatures = sign_in_quorum_order(&signers, &CanonicalMessage::from(operation));
            Ok(serde_json::to_string_pretty(&signatures)?)
        }
        Command::SignRequest { key, path, nonce, body } => {
            let signer = LocalSigner::new(&key).wrap_err("Failed to load private key")?;
            let signature = signer.sign_request(&path, nonce, body.as_bytes());
            Ok(serde_json::to_string_pretty(&serde_json::json!({
                "caller": signer.address(),
                "x-caller-nonce": nonce.to_string(),
                "x-caller-signature": signature,
            }))?)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    println!("{}", run(cli.command)?);
    Ok(())
}
