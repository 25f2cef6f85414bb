//! # Issuer Attestation
//!
//! A verifier configured with the wrong verification key must reject every
//! payload as malformed — proofs are only acceptable from the deployment's
//! own issuer.

use std::sync::Arc;

use pramaan_attest::{token, EnrollmentService, IssuerConfig, ProofIssuer, Verifier, VerifyError};
use pramaan_core::{
    AttendanceDay, AttendanceType, BiometricSample, IdentityId, Modality, OrganizationId,
    Timestamp, VerifierId,
};
use pramaan_crypto::IssuerKey;
use pramaan_store::{CommitmentStore, ProofStore};
use pramaan_zkp::{ProofBackend, TransparentBackend};

#[test]
fn foreign_issuer_key_fails_malformed() {
    let commitments = CommitmentStore::new();
    let proofs = ProofStore::new();
    let backend: Arc<dyn ProofBackend> = Arc::new(TransparentBackend::new());
    let issuer_key = Arc::new(IssuerKey::from_seed(&[51; 32]));
    let rogue_key = IssuerKey::from_seed(&[52; 32]);

    let enroll = EnrollmentService::new(commitments.clone(), backend.clone());
    let issuer = ProofIssuer::new(
        commitments,
        proofs.clone(),
        backend.clone(),
        issuer_key,
        IssuerConfig::default(),
    );
    // Misconfigured verifier: expects the rogue key.
    let verifier = Verifier::new(proofs, backend, rogue_key.public_key());

    let identity = IdentityId::new();
    let org = OrganizationId::new();
    let sample = BiometricSample::new(Modality::Fingerprint, b"A1".to_vec()).unwrap();
    enroll.enroll(identity, org, &sample).unwrap();

    let proof = issuer
        .issue_at(
            identity,
            org,
            AttendanceType::CheckIn,
            &sample,
            AttendanceDay::parse("2024-01-15").unwrap(),
            None,
            Timestamp::parse("2024-01-15T08:30:00Z").unwrap(),
        )
        .unwrap();
    let t = token::encode(&proof).unwrap();

    let err = verifier
        .verify_at(
            t.as_str(),
            org,
            VerifierId::new(),
            Timestamp::parse("2024-01-15T08:31:00Z").unwrap(),
        )
        .unwrap_err();
    assert!(matches!(err, VerifyError::MalformedProof(_)));
}
