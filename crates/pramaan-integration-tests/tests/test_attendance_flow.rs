//! # End-to-End Attendance Flow
//!
//! The canonical scenario: enroll S1 with sample F1 at O1; a second
//! identity with the same trait fails globally; S1 checks in on
//! 2024-01-15, the token verifies once at O1 and only once; check-out
//! becomes issuable only after the verified check-in.

use std::sync::Arc;

use pramaan_attest::{
    token, EnrollError, EnrollmentService, IssueError, IssuerConfig, ProofIssuer, Verifier,
    VerifyError,
};
use pramaan_core::{
    AttendanceDay, AttendanceType, BiometricSample, DayStatus, IdentityId, Modality,
    OrganizationId, Timestamp, VerifierId,
};
use pramaan_crypto::IssuerKey;
use pramaan_store::{CommitmentStore, ProofStore};
use pramaan_zkp::{ProofBackend, TransparentBackend};

struct Stack {
    enroll: EnrollmentService,
    issuer: ProofIssuer,
    verifier: Verifier,
    proofs: ProofStore,
}

fn stack() -> Stack {
    let commitments = CommitmentStore::new();
    let proofs = ProofStore::new();
    let backend: Arc<dyn ProofBackend> = Arc::new(TransparentBackend::new());
    let key = Arc::new(IssuerKey::from_seed(&[11; 32]));
    Stack {
        enroll: EnrollmentService::new(commitments.clone(), backend.clone()),
        issuer: ProofIssuer::new(
            commitments,
            proofs.clone(),
            backend.clone(),
            key.clone(),
            IssuerConfig::default(),
        ),
        verifier: Verifier::new(proofs.clone(), backend, key.public_key()),
        proofs,
    }
}

fn fingerprint(bytes: &[u8]) -> BiometricSample {
    BiometricSample::new(Modality::Fingerprint, bytes.to_vec()).unwrap()
}

fn ts(s: &str) -> Timestamp {
    Timestamp::parse(s).unwrap()
}

#[test]
fn example_scenario_from_the_contract() {
    let stack = stack();
    let s1 = IdentityId::new();
    let s2 = IdentityId::new();
    let o1 = OrganizationId::new();
    let o2 = OrganizationId::new();
    let day = AttendanceDay::parse("2024-01-15").unwrap();

    // Enroll S1 with fingerprint sample F1 at O1 → succeeds.
    stack.enroll.enroll(s1, o1, &fingerprint(b"F1")).unwrap();

    // Enroll S2 with the same sample F1 at O2 → DuplicateBiometric.
    let err = stack.enroll.enroll(s2, o2, &fingerprint(b"F1")).unwrap_err();
    assert!(matches!(err, EnrollError::DuplicateBiometric { .. }));

    // S1 issues a check-in proof for 2024-01-15 → token T1, expiry +5min.
    let proof = stack
        .issuer
        .issue_at(
            s1,
            o1,
            AttendanceType::CheckIn,
            &fingerprint(b"F1"),
            day,
            None,
            ts("2024-01-15T08:30:00Z"),
        )
        .unwrap();
    assert_eq!(proof.expires_at, ts("2024-01-15T08:35:00Z"));
    let t1 = token::encode(&proof).unwrap();

    // Verifying T1 at O1 → succeeds.
    let report = stack
        .verifier
        .verify_at(t1.as_str(), o1, VerifierId::new(), ts("2024-01-15T08:31:00Z"))
        .unwrap();
    assert!(report.verified);
    assert_eq!(report.identity_id, s1);

    // Verifying T1 again → AlreadyVerified.
    let err = stack
        .verifier
        .verify_at(t1.as_str(), o1, VerifierId::new(), ts("2024-01-15T08:32:00Z"))
        .unwrap_err();
    assert!(matches!(err, VerifyError::AlreadyVerified(_)));

    // S1 issues check-out → succeeds only because the check-in verified.
    let out = stack
        .issuer
        .issue_at(
            s1,
            o1,
            AttendanceType::CheckOut,
            &fingerprint(b"F1"),
            day,
            None,
            ts("2024-01-15T17:00:00Z"),
        )
        .unwrap();
    let t2 = token::encode(&out).unwrap();
    stack
        .verifier
        .verify_at(t2.as_str(), o1, VerifierId::new(), ts("2024-01-15T17:01:00Z"))
        .unwrap();
    assert_eq!(stack.proofs.day_status(s1, day), DayStatus::CheckedOut);
}

#[test]
fn checkout_without_checkin_fails_and_day_stays_absent() {
    let stack = stack();
    let identity = IdentityId::new();
    let org = OrganizationId::new();
    let day = AttendanceDay::parse("2024-01-15").unwrap();
    stack.enroll.enroll(identity, org, &fingerprint(b"F9")).unwrap();

    let err = stack
        .issuer
        .issue_at(
            identity,
            org,
            AttendanceType::CheckOut,
            &fingerprint(b"F9"),
            day,
            None,
            ts("2024-01-15T17:00:00Z"),
        )
        .unwrap_err();
    assert!(matches!(err, IssueError::NoCheckIn { .. }));
    assert_eq!(stack.proofs.day_status(identity, day), DayStatus::Absent);
}

#[test]
fn issuance_alone_never_advances_day_status() {
    let stack = stack();
    let identity = IdentityId::new();
    let org = OrganizationId::new();
    let day = AttendanceDay::parse("2024-01-15").unwrap();
    stack.enroll.enroll(identity, org, &fingerprint(b"F8")).unwrap();

    stack
        .issuer
        .issue_at(
            identity,
            org,
            AttendanceType::CheckIn,
            &fingerprint(b"F8"),
            day,
            None,
            ts("2024-01-15T08:30:00Z"),
        )
        .unwrap();
    assert_eq!(stack.proofs.day_status(identity, day), DayStatus::Absent);
}

#[test]
fn next_day_is_a_fresh_slot() {
    let stack = stack();
    let identity = IdentityId::new();
    let org = OrganizationId::new();
    stack.enroll.enroll(identity, org, &fingerprint(b"F7")).unwrap();

    for (day, at) in [
        ("2024-01-15", "2024-01-15T08:30:00Z"),
        ("2024-01-16", "2024-01-16T08:30:00Z"),
    ] {
        let proof = stack
            .issuer
            .issue_at(
                identity,
                org,
                AttendanceType::CheckIn,
                &fingerprint(b"F7"),
                AttendanceDay::parse(day).unwrap(),
                None,
                ts(at),
            )
            .unwrap();
        let token = token::encode(&proof).unwrap();
        stack
            .verifier
            .verify_at(token.as_str(), org, VerifierId::new(), proof.issued_at)
            .unwrap();
    }
}

#[test]
fn re_enrollment_invalidates_old_sample_for_issuance() {
    let stack = stack();
    let identity = IdentityId::new();
    let org = OrganizationId::new();
    let day = AttendanceDay::parse("2024-01-15").unwrap();

    stack.enroll.enroll(identity, org, &fingerprint(b"old")).unwrap();
    stack.enroll.re_enroll(identity, org, &fingerprint(b"new")).unwrap();

    // The old template no longer binds.
    let err = stack
        .issuer
        .issue_at(
            identity,
            org,
            AttendanceType::CheckIn,
            &fingerprint(b"old"),
            day,
            None,
            ts("2024-01-15T08:30:00Z"),
        )
        .unwrap_err();
    assert!(matches!(err, IssueError::SampleMismatch { .. }));

    // The new one does.
    stack
        .issuer
        .issue_at(
            identity,
            org,
            AttendanceType::CheckIn,
            &fingerprint(b"new"),
            day,
            None,
            ts("2024-01-15T08:31:00Z"),
        )
        .unwrap();
}
