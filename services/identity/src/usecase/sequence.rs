use crate::domain::repository::SequenceRepository;
use crate::domain::types::format_sequence;
use crate::error::IdentityServiceError;

// ── NextSequence ─────────────────────────────────────────────────────────────

/// Hands out formatted sequence numbers (`INV-00042`) to collaborator
/// services (invoice/order numbering). One counter per prefix; the port's
/// `next` is a single atomic increment-and-return, so two callers can never
/// receive the same number.
pub struct NextSequenceUseCase<S: SequenceRepository> {
    pub sequences: S,
}

impl<S: SequenceRepository> NextSequenceUseCase<S> {
    pub async fn execute(&self, prefix: &str) -> Result<String, IdentityServiceError> {
        let seq = self.sequences.next(prefix).await?;
        Ok(format_sequence(prefix, seq))
    }
}
