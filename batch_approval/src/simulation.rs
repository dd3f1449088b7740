//! Replays the life of a custodian's notes against an in-memory ledger:
//! approve, spend, replay the spend, spend unapproved notes, re-approve
//! spent notes. Only the first two are expected to succeed.
use cl::{Address, AssetId, JoinSplitWitness, NoteHash, NoteWitness};
use ledger::{Receipt, SharedLedger, ZkLedger};
use rand_core::CryptoRngCore;
use tracing::info;

use crate::{
    authority::BatchApproval,
    config::{total_value, ConfigError, SimulationConfig},
};

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ledger(#[from] ledger::Error),

    #[error("failed to encode proof: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("{0} unexpectedly succeeded")]
    UnexpectedSuccess(&'static str),
}

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub approved: Vec<NoteHash>,
    pub transfer: Receipt,
    pub replay: ledger::Error,
    pub unapproved_spend: Option<ledger::Error>,
    pub reapproval: ledger::Error,
}

pub fn run(
    config: &SimulationConfig,
    mut rng: impl CryptoRngCore,
) -> Result<SimulationReport, SimulationError> {
    config.validate()?;

    let asset = AssetId::derive(&config.asset);
    let custodian = config.authority.address;
    let owner = config.authority.owner;

    let mut zk_ledger = ZkLedger::new();
    zk_ledger.create_asset(asset, config.minter)?;
    let approved = mint(&mut zk_ledger, &asset, config, &config.approved_notes, &mut rng)?;
    let unapproved = mint(&mut zk_ledger, &asset, config, &config.unapproved_notes, &mut rng)?;

    let authority = BatchApproval::from_config(SharedLedger::new(zk_ledger), &config.authority);

    let approved_hashes = approved
        .iter()
        .map(|n| n.note_hash(&asset))
        .collect::<Vec<_>>();
    authority.batch_approve(&owner, &approved_hashes, &asset, &custodian)?;

    let proof = transfer(&approved, custodian, config.recipient, config.invoice, &mut rng)?
        .prove(&asset)
        .encode()?;
    let receipt = authority.proof_validation(&proof, &asset, &custodian)?;
    info!(
        "transfer of {} to {} accepted",
        config.invoice, config.recipient
    );

    let replay = expect_failure(
        "replaying the transfer",
        authority.proof_validation(&proof, &asset, &custodian),
    )?;

    let unapproved_spend = if unapproved.is_empty() {
        None
    } else {
        let proof = transfer(&unapproved, custodian, config.recipient, config.invoice, &mut rng)?
            .prove(&asset)
            .encode()?;
        Some(expect_failure(
            "spending unapproved notes",
            authority.proof_validation(&proof, &asset, &custodian),
        )?)
    };

    let reapproval = expect_failure(
        "re-approving spent notes",
        authority.batch_approve(&owner, &approved_hashes, &asset, &config.recipient),
    )?;

    Ok(SimulationReport {
        approved: approved_hashes,
        transfer: receipt,
        replay,
        unapproved_spend,
        reapproval,
    })
}

fn mint(
    ledger: &mut ZkLedger,
    asset: &AssetId,
    config: &SimulationConfig,
    values: &[u64],
    mut rng: impl CryptoRngCore,
) -> Result<Vec<NoteWitness>, SimulationError> {
    let notes = values
        .iter()
        .map(|v| NoteWitness::new(*v, config.authority.address, &mut rng))
        .collect::<Vec<_>>();
    let public = notes.iter().map(|n| n.commit(asset)).collect::<Vec<_>>();
    ledger.confidential_mint(asset, &config.minter, &public)?;
    Ok(notes)
}

/// Pays `invoice` to `recipient` out of `inputs`, returning the change to
/// `custodian`.
fn transfer(
    inputs: &[NoteWitness],
    custodian: Address,
    recipient: Address,
    invoice: u64,
    mut rng: impl CryptoRngCore,
) -> Result<JoinSplitWitness, ConfigError> {
    let total = total_value(inputs.iter().map(|n| n.value))?;
    let mut outputs = vec![NoteWitness::new(invoice, recipient, &mut rng)];
    if total > invoice {
        outputs.push(NoteWitness::new(total - invoice, custodian, &mut rng));
    }
    Ok(JoinSplitWitness::new(inputs.to_vec(), outputs, custodian))
}

fn expect_failure<T>(
    step: &'static str,
    result: ledger::Result<T>,
) -> Result<ledger::Error, SimulationError> {
    match result {
        Ok(_) => Err(SimulationError::UnexpectedSuccess(step)),
        Err(e) => {
            info!("{} rejected: {}", step, e);
            Ok(e)
        }
    }
}
