//! Short code allocation.
//!
//! The allocator turns an optional custom code into a code that is not yet
//! taken. Existence checks here only avoid obvious collisions: the store's
//! unique constraint decides at insert time, so a code can still be lost to
//! a concurrent request between the check and the insert.

use urlshort_core::{generate_code, validate_custom_code, ShortCode, MAX_ALLOCATION_ATTEMPTS};
use urlshort_store::Store;

use crate::error::ServiceError;

/// Produces unused short codes against a store.
///
/// Holds nothing but the store handle; every call re-reads the store.
pub struct CodeAllocator<'a> {
    store: &'a dyn Store,
}

impl<'a> CodeAllocator<'a> {
    /// Create an allocator over the given store.
    #[must_use]
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Allocate a code, using the thread-local RNG for generated codes.
    ///
    /// # Errors
    ///
    /// See [`CodeAllocator::allocate_with`].
    pub async fn allocate(&self, custom: Option<&str>) -> Result<ShortCode, ServiceError> {
        self.allocate_with(custom, || generate_code(&mut rand::rng()))
            .await
    }

    /// Allocate a code, drawing random candidates from `candidate`.
    ///
    /// A custom code is validated before the store is touched and must not
    /// exist yet. Without one, up to [`MAX_ALLOCATION_ATTEMPTS`] candidates
    /// are tried.
    ///
    /// # Errors
    ///
    /// - `ServiceError::InvalidInput` if the custom code is malformed.
    /// - `ServiceError::Conflict` if the custom code is taken.
    /// - `ServiceError::Exhausted` if every candidate was taken.
    /// - `ServiceError::Storage` if the store fails.
    pub async fn allocate_with<F>(
        &self,
        custom: Option<&str>,
        mut candidate: F,
    ) -> Result<ShortCode, ServiceError>
    where
        F: FnMut() -> ShortCode + Send,
    {
        if let Some(custom) = custom {
            let code = validate_custom_code(custom)?;
            if self.store.code_exists(&code).await? {
                return Err(ServiceError::Conflict(code.into_inner()));
            }
            return Ok(code);
        }

        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let code = candidate();
            if !self.store.code_exists(&code).await? {
                return Ok(code);
            }
            tracing::debug!(code = %code, attempt, "Generated code already taken");
        }

        tracing::warn!(
            attempts = MAX_ALLOCATION_ATTEMPTS,
            "Giving up on code generation"
        );
        Err(ServiceError::Exhausted {
            attempts: MAX_ALLOCATION_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use urlshort_core::ShortLink;
    use urlshort_store::MemoryStore;

    async fn store_with(codes: &[&str]) -> MemoryStore {
        let store = MemoryStore::new();
        for code in codes {
            store
                .insert_short_link(&ShortLink::new(code.parse().unwrap(), "https://example.com/"))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn custom_code_is_returned_verbatim() {
        let store = store_with(&[]).await;
        let code = CodeAllocator::new(&store)
            .allocate(Some("My-Code"))
            .await
            .unwrap();
        assert_eq!(code.as_str(), "My-Code");
    }

    #[tokio::test]
    async fn taken_custom_code_conflicts() {
        let store = store_with(&["taken"]).await;
        let err = CodeAllocator::new(&store)
            .allocate(Some("taken"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(code) if code == "taken"));
    }

    #[tokio::test]
    async fn custom_codes_differing_in_case_do_not_conflict() {
        let store = store_with(&["taken"]).await;
        let code = CodeAllocator::new(&store)
            .allocate(Some("Taken"))
            .await
            .unwrap();
        assert_eq!(code.as_str(), "Taken");
    }

    #[tokio::test]
    async fn malformed_custom_code_is_invalid_input() {
        let store = store_with(&[]).await;
        for bad in ["", "has space", "slash/ed", "under_score"] {
            let err = CodeAllocator::new(&store).allocate(Some(bad)).await.unwrap_err();
            assert!(matches!(err, ServiceError::InvalidInput(_)), "{bad:?}");
        }
    }

    #[tokio::test]
    async fn generated_code_is_six_alphanumerics() {
        let store = store_with(&[]).await;
        let code = CodeAllocator::new(&store).allocate(None).await.unwrap();
        assert_eq!(code.as_str().len(), 6);
        assert!(code.as_str().bytes().all(|b| b.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn retries_past_collisions() {
        let mut seeded = StdRng::seed_from_u64(3);
        let first = generate_code(&mut seeded);
        let second = generate_code(&mut seeded);
        let store = store_with(&[first.as_str()]).await;

        let mut rng = StdRng::seed_from_u64(3);
        let code = CodeAllocator::new(&store)
            .allocate_with(None, || generate_code(&mut rng))
            .await
            .unwrap();
        assert_eq!(code, second);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let store = store_with(&["AAAAAA"]).await;
        let mut calls = 0;

        let err = CodeAllocator::new(&store)
            .allocate_with(None, || {
                calls += 1;
                "AAAAAA".parse().unwrap()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Exhausted { attempts: 10 }));
        assert_eq!(calls, MAX_ALLOCATION_ATTEMPTS);
    }
}
