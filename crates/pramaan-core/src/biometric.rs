//! # Biometric Sample
//!
//! `BiometricSample` is the opaque template material submitted at enrollment
//! and at attendance time. The stack never inspects its structure: fuzzy
//! matching / feature extraction is a collaborator upstream of this boundary,
//! and the bytes arriving here are assumed to be its stable output. Binding
//! equality downstream is exact.
//!
//! Samples are never persisted and never logged. `Debug` prints only the
//! modality and length.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::Modality;
use crate::error::ValidationError;

/// Maximum accepted template size: 1 MiB.
///
/// Face embeddings and fingerprint templates from the capture pipeline are
/// orders of magnitude smaller; anything larger is a malformed or hostile
/// submission.
pub const MAX_SAMPLE_BYTES: usize = 1 << 20;

/// A validated, opaque biometric template.
///
/// Serializes as `{"modality": ..., "data": "<base64>"}` for the transport
/// boundary. The raw bytes are exposed only through [`as_bytes`] for the
/// binding computation.
///
/// [`as_bytes`]: BiometricSample::as_bytes
#[derive(Clone, PartialEq, Eq)]
pub struct BiometricSample {
    modality: Modality,
    data: Vec<u8>,
}

impl BiometricSample {
    /// Construct a validated sample.
    ///
    /// # Errors
    ///
    /// [`ValidationError::EmptySample`] for zero-length input;
    /// [`ValidationError::OversizedSample`] above [`MAX_SAMPLE_BYTES`].
    pub fn new(modality: Modality, data: Vec<u8>) -> Result<Self, ValidationError> {
        if data.is_empty() {
            return Err(ValidationError::EmptySample);
        }
        if data.len() > MAX_SAMPLE_BYTES {
            return Err(ValidationError::OversizedSample {
                len: data.len(),
                max: MAX_SAMPLE_BYTES,
            });
        }
        Ok(Self { modality, data })
    }

    /// The modality this template belongs to.
    pub fn modality(&self) -> Modality {
        self.modality
    }

    /// The raw template bytes, for binding computation only.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Template length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the template is empty. Always `false` for a constructed
    /// sample; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl std::fmt::Debug for BiometricSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BiometricSample({}, {} bytes)",
            self.modality,
            self.data.len()
        )
    }
}

#[derive(Serialize, Deserialize)]
struct SampleWire {
    modality: Modality,
    data: String,
}

impl Serialize for BiometricSample {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use base64::Engine as _;
        SampleWire {
            modality: self.modality,
            data: base64::engine::general_purpose::STANDARD.encode(&self.data),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BiometricSample {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use base64::Engine as _;
        let wire = SampleWire::deserialize(deserializer)?;
        let data = base64::engine::general_purpose::STANDARD
            .decode(&wire.data)
            .map_err(serde::de::Error::custom)?;
        Self::new(wire.modality, data).map_err(serde::de::Error::custom)
    }
}
