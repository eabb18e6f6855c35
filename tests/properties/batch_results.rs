//! Property tests for batch result aggregation.

use proptest::prelude::*;

use batchship::domain::entities::{ArtifactKind, ArtifactRef, ArtifactVerification, TransferOutcome};
use batchship::BatchResult;

fn outcome(index: usize, transferred: bool) -> TransferOutcome {
    let artifact = ArtifactRef::parse(&format!("artifact_{}.txt", index)).unwrap();
    if transferred {
        TransferOutcome::succeeded(artifact, ArtifactKind::File, 0.1, Some(10))
    } else {
        TransferOutcome::failed(artifact, ArtifactKind::File, 0.1, "scp exited with code 1")
    }
}

fn verification(index: usize, verified: bool) -> ArtifactVerification {
    ArtifactVerification {
        artifact: ArtifactRef::parse(&format!("artifact_{}.txt", index)).unwrap(),
        verified,
        detail: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A batch counts as uploaded exactly when every artifact transferred.
    #[test]
    fn property_uploaded_iff_all_transferred(flags in proptest::collection::vec(any::<bool>(), 0..8)) {
        let outcomes = flags.iter().enumerate().map(|(i, ok)| outcome(i, *ok)).collect();
        let result = BatchResult::from_outcomes(outcomes);

        prop_assert_eq!(result.uploaded, flags.iter().all(|ok| *ok));
        prop_assert_eq!(result.transferred_count(), flags.iter().filter(|ok| **ok).count());
    }

    /// PROPERTY: A batch is never verified without having been uploaded.
    #[test]
    fn property_verified_implies_uploaded(
        transferred in proptest::collection::vec(any::<bool>(), 1..8),
        verified in proptest::collection::vec(any::<bool>(), 0..8),
    ) {
        let outcomes = transferred.iter().enumerate().map(|(i, ok)| outcome(i, *ok)).collect();
        let mut result = BatchResult::from_outcomes(outcomes);
        let checks = verified.iter().enumerate().map(|(i, ok)| verification(i, *ok)).collect();
        result.record_verification(checks);

        if result.verified {
            prop_assert!(result.uploaded);
            prop_assert_eq!(verified.len(), transferred.len());
            prop_assert!(verified.iter().all(|ok| *ok));
        }
        prop_assert_eq!(result.is_success(), result.uploaded && result.verified);
    }
}
