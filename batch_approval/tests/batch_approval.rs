mod common;

use cl::{AssetId, NoteWitness};
use common::Deployment;
use ledger::{Error, NoteStatus, ProofError};

#[test]
fn test_custodian_notes_lifecycle() {
    let d = Deployment::new();

    // the owner mints notes held by the authority
    let approved = d.mint(&[50, 75, 100]);
    let not_approved = d.mint(&[25, 125]);
    let approved_hashes = d.hashes(&approved);
    let not_approved_hashes = d.hashes(&not_approved);
    for h in approved_hashes.iter().chain(&not_approved_hashes) {
        assert_eq!(d.status(h), NoteStatus::Unspent);
    }

    // the owner approves the authority itself to spend the first three
    d.authority
        .batch_approve(&d.alice, &approved_hashes, &d.asset, &d.custodian())
        .unwrap();
    assert!(approved_hashes
        .iter()
        .all(|h| d.is_approved(h, &d.custodian())));
    assert!(!not_approved_hashes
        .iter()
        .any(|h| d.is_approved(h, &d.custodian())));

    // the authority spends the approved notes: 100 to bob, 125 back to itself
    let proof = d.pay_bob(&approved, 100);
    let receipt = d
        .authority
        .proof_validation(&proof, &d.asset, &d.custodian())
        .unwrap();
    assert_eq!(receipt.consumed, approved_hashes);
    assert_eq!(receipt.produced.len(), 2);
    for h in &approved_hashes {
        assert_eq!(d.status(h), NoteStatus::Spent);
    }
    for h in &receipt.produced {
        assert_eq!(d.status(h), NoteStatus::Unspent);
    }

    // unapproved notes cannot be spent
    let proof_unapproved = d.pay_bob(&not_approved, 100);
    assert_eq!(
        d.authority
            .proof_validation(&proof_unapproved, &d.asset, &d.custodian()),
        Err(Error::NotApproved(not_approved_hashes[0]))
    );

    // spent notes cannot be spent again
    assert_eq!(
        d.authority.proof_validation(&proof, &d.asset, &d.custodian()),
        Err(Error::NotUnspent(approved_hashes[0]))
    );

    // nor approved again, for anyone
    for spender in [d.custodian(), d.bob] {
        assert_eq!(
            d.authority
                .batch_approve(&d.alice, &approved_hashes, &d.asset, &spender),
            Err(Error::OnlyUnspentNotesApprovable(approved_hashes[0]))
        );
    }
}

#[test]
fn test_batch_with_one_spent_note_approves_nothing() {
    let d = Deployment::new();
    let spent = d.mint(&[10]);
    let fresh = d.mint(&[20, 30]);
    let spent_hashes = d.hashes(&spent);
    let fresh_hashes = d.hashes(&fresh);

    d.authority
        .batch_approve(&d.alice, &spent_hashes, &d.asset, &d.custodian())
        .unwrap();
    d.authority
        .proof_validation(&d.pay_bob(&spent, 10), &d.asset, &d.custodian())
        .unwrap();

    // the spent note sits in the middle of the batch
    let batch = vec![fresh_hashes[0], spent_hashes[0], fresh_hashes[1]];
    let before = d.snapshot();
    assert_eq!(
        d.authority.batch_approve(&d.alice, &batch, &d.asset, &d.bob),
        Err(Error::OnlyUnspentNotesApprovable(spent_hashes[0]))
    );
    assert_eq!(d.snapshot(), before);
    assert!(!d.is_approved(&fresh_hashes[0], &d.bob));
    assert!(!d.is_approved(&fresh_hashes[1], &d.bob));
}

#[test]
fn test_approval_is_scoped_to_spender() {
    let d = Deployment::new();
    let notes = d.mint(&[40, 60]);
    let hashes = d.hashes(&notes);

    d.authority
        .batch_approve(&d.alice, &hashes, &d.asset, &d.bob)
        .unwrap();
    assert!(hashes.iter().all(|h| d.is_approved(h, &d.bob)));
    assert!(!hashes.iter().any(|h| d.is_approved(h, &d.custodian())));

    // approved for bob, so the authority itself still cannot spend them
    assert_eq!(
        d.authority
            .proof_validation(&d.pay_bob(&notes, 50), &d.asset, &d.custodian()),
        Err(Error::NotApproved(hashes[0]))
    );
}

#[test]
fn test_approval_then_spend_succeeds() {
    let d = Deployment::new();
    let notes = d.mint(&[5, 6]);
    let hashes = d.hashes(&notes);
    let proof = d.pay_bob(&notes, 11);

    assert_eq!(
        d.authority.proof_validation(&proof, &d.asset, &d.custodian()),
        Err(Error::NotApproved(hashes[0]))
    );

    d.authority
        .batch_approve(&d.alice, &hashes, &d.asset, &d.custodian())
        .unwrap();
    assert!(d
        .authority
        .proof_validation(&proof, &d.asset, &d.custodian())
        .is_ok());
}

#[test]
fn test_repeated_hashes_and_regrants_are_idempotent() {
    let d = Deployment::new();
    let notes = d.mint(&[7]);
    let h = d.hashes(&notes)[0];

    d.authority
        .batch_approve(&d.alice, &[h, h, h], &d.asset, &d.bob)
        .unwrap();
    d.authority
        .batch_approve(&d.alice, &[h], &d.asset, &d.bob)
        .unwrap();
    assert!(d.is_approved(&h, &d.bob));
    assert_eq!(d.status(&h), NoteStatus::Unspent);
}

#[test]
fn test_empty_batch_is_a_no_op() {
    let d = Deployment::new();
    let before = d.snapshot();
    d.authority
        .batch_approve(&d.alice, &[], &d.asset, &d.bob)
        .unwrap();
    assert_eq!(d.snapshot(), before);
}

#[test]
fn test_only_owner_can_batch_approve() {
    let d = Deployment::new();
    let hashes = d.hashes(&d.mint(&[10]));

    let before = d.snapshot();
    assert_eq!(
        d.authority.batch_approve(&d.bob, &hashes, &d.asset, &d.bob),
        Err(Error::Unauthorized(d.bob))
    );
    assert_eq!(d.snapshot(), before);
}

#[test]
fn test_cannot_approve_notes_held_by_others() {
    let d = Deployment::new();
    let mine = d.hashes(&d.mint(&[10]));
    let bobs = d.hashes(&d.mint_to(d.bob, &[10]));

    let before = d.snapshot();
    assert_eq!(
        d.authority
            .batch_approve(&d.alice, &[mine[0], bobs[0]], &d.asset, &d.alice),
        Err(Error::NotNoteOwner {
            note: bobs[0],
            approver: d.custodian()
        })
    );
    assert_eq!(d.snapshot(), before);
}

#[test]
fn test_unknown_note_and_asset_are_surfaced() {
    let d = Deployment::new();
    let known = d.hashes(&d.mint(&[10]));
    let unknown = NoteWitness::new(10, d.custodian(), rand::thread_rng()).note_hash(&d.asset);

    let before = d.snapshot();
    assert_eq!(
        d.authority
            .batch_approve(&d.alice, &[known[0], unknown], &d.asset, &d.bob),
        Err(Error::UnknownNote(unknown))
    );
    let other = AssetId::derive("OTHER");
    assert_eq!(
        d.authority.batch_approve(&d.alice, &known, &other, &d.bob),
        Err(Error::UnknownAsset(other))
    );
    assert_eq!(d.snapshot(), before);
}

#[test]
fn test_proof_errors_are_relayed_verbatim() {
    let d = Deployment::new();
    let notes = d.mint(&[10]);
    d.authority
        .batch_approve(&d.alice, &d.hashes(&notes), &d.asset, &d.custodian())
        .unwrap();
    let proof = d.pay_bob(&notes, 4);

    let before = d.snapshot();
    assert_eq!(
        d.authority.proof_validation(&proof, &d.asset, &d.bob),
        Err(Error::InvalidProof(ProofError::SenderMismatch {
            expected: d.bob,
            found: d.custodian()
        }))
    );
    assert!(matches!(
        d.authority
            .proof_validation(&proof[1..], &d.asset, &d.custodian()),
        Err(Error::InvalidProof(_))
    ));
    assert_eq!(d.snapshot(), before);
}

#[test]
fn test_anyone_may_relay_a_proof() {
    let d = Deployment::new();
    let notes = d.mint(&[10]);
    let hashes = d.hashes(&notes);
    d.authority
        .batch_approve(&d.alice, &hashes, &d.asset, &d.custodian())
        .unwrap();

    // a clone of the handle held by some relayer with no special role
    let relayer = d.authority.clone();
    let receipt = relayer
        .proof_validation(&d.pay_bob(&notes, 10), &d.asset, &d.custodian())
        .unwrap();
    assert_eq!(receipt.submitter, d.custodian());
    assert_eq!(d.status(&hashes[0]), NoteStatus::Spent);
}
