#![allow(dead_code)]

use batch_approval::BatchApproval;
use cl::{Address, AssetId, JoinSplitWitness, NoteHash, NoteWitness};
use ledger::{NoteLedger, NoteStatus, SharedLedger, ZkLedger};

pub struct Deployment {
    pub ledger: SharedLedger<ZkLedger>,
    pub authority: BatchApproval<ZkLedger>,
    pub asset: AssetId,
    pub minter: Address,
    pub alice: Address,
    pub bob: Address,
}

impl Deployment {
    /// An asset, a custodian authority owned by alice, and bob as a third party.
    pub fn new() -> Self {
        let asset = AssetId::derive("ZKASSET");
        let minter = Address::from_label("zk-asset-mintable");
        let alice = Address::from_label("alice");
        let bob = Address::from_label("bob");

        let mut zk_ledger = ZkLedger::new();
        zk_ledger.create_asset(asset, minter).unwrap();
        let ledger = SharedLedger::new(zk_ledger);
        let authority = BatchApproval::new(ledger.clone(), Address::from_label("batch-approval"), alice);

        Self {
            ledger,
            authority,
            asset,
            minter,
            alice,
            bob,
        }
    }

    pub fn custodian(&self) -> Address {
        self.authority.address()
    }

    /// Mints notes owned by the authority.
    pub fn mint(&self, values: &[u64]) -> Vec<NoteWitness> {
        self.mint_to(self.custodian(), values)
    }

    pub fn mint_to(&self, owner: Address, values: &[u64]) -> Vec<NoteWitness> {
        let mut rng = rand::thread_rng();
        let notes = values
            .iter()
            .map(|v| NoteWitness::new(*v, owner, &mut rng))
            .collect::<Vec<_>>();
        let public = notes.iter().map(|n| n.commit(&self.asset)).collect::<Vec<_>>();
        self.ledger
            .transact(|l| l.confidential_mint(&self.asset, &self.minter, &public))
            .unwrap();
        notes
    }

    pub fn hashes(&self, notes: &[NoteWitness]) -> Vec<NoteHash> {
        notes.iter().map(|n| n.note_hash(&self.asset)).collect()
    }

    /// Encoded proof paying `invoice` to bob with change back to the authority.
    pub fn pay_bob(&self, inputs: &[NoteWitness], invoice: u64) -> Vec<u8> {
        let mut rng = rand::thread_rng();
        let total: u64 = inputs.iter().map(|n| n.value).sum();
        let invoice_note = NoteWitness::new(invoice, self.bob, &mut rng);
        let change = NoteWitness::new(total - invoice, self.custodian(), &mut rng);
        JoinSplitWitness::new(inputs.to_vec(), vec![invoice_note, change], self.custodian())
            .prove(&self.asset)
            .encode()
            .unwrap()
    }

    pub fn status(&self, note: &NoteHash) -> NoteStatus {
        self.ledger.transact(|l| l.status(&self.asset, note)).unwrap()
    }

    pub fn is_approved(&self, note: &NoteHash, spender: &Address) -> bool {
        self.ledger
            .transact(|l| l.is_approved(&self.asset, note, spender))
            .unwrap()
    }

    pub fn snapshot(&self) -> ZkLedger {
        self.ledger.transact(|l| Ok(l.clone())).unwrap()
    }
}
