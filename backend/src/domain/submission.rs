//! Validate-then-persist step shared by every owned record form.
//!
//! A submission is either rejected with field errors (nothing is written)
//! or persisted through the owner-scoped repository. Storage failures are
//! returned as errors, never folded into the rejection branch.

use super::ports::{OwnerScopedRepository, RepositoryError};
use super::{FieldErrors, OwnedEntity, UserId, Validator};

/// Result of a well-formed submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome<E> {
    /// Field rules failed; the map is never empty.
    Rejected(FieldErrors),
    /// The record was written.
    Persisted(E),
}

/// Check `draft` against the record's field rules.
pub fn validate_draft<E: OwnedEntity>(draft: &E::Draft) -> Result<(), FieldErrors> {
    let mut validator = Validator::new();
    E::validate(draft, &mut validator);
    if validator.is_valid() {
        Ok(())
    } else {
        Err(validator.into_errors())
    }
}

/// Validate and insert a new record for `owner`.
pub async fn submit_new<E: OwnedEntity>(
    records: &dyn OwnerScopedRepository<E>,
    owner: &UserId,
    draft: E::Draft,
) -> Result<SubmissionOutcome<E>, RepositoryError> {
    if let Err(errors) = validate_draft::<E>(&draft) {
        return Ok(SubmissionOutcome::Rejected(errors));
    }
    records
        .insert(owner, draft)
        .await
        .map(SubmissionOutcome::Persisted)
}

/// Validate and overwrite an existing record of `owner`.
pub async fn submit_edit<E: OwnedEntity>(
    records: &dyn OwnerScopedRepository<E>,
    owner: &UserId,
    id: E::Id,
    draft: E::Draft,
) -> Result<SubmissionOutcome<E>, RepositoryError> {
    if let Err(errors) = validate_draft::<E>(&draft) {
        return Ok(SubmissionOutcome::Rejected(errors));
    }
    records
        .update(owner, id, draft)
        .await
        .map(SubmissionOutcome::Persisted)
}
