// Submission service: validate the form, persist the name

use serde::Deserialize;
use std::sync::Arc;
use userform_core::{NewUser, StoreError, User, UserStore};

/// Decoded `POST /submit` body.
///
/// `name` is optional here so that a missing field becomes our own 400
/// rather than a framework deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitForm {
    pub name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("failed to save submission: {0}")]
    Store(#[from] StoreError),
}

pub struct SubmissionService {
    store: Arc<dyn UserStore>,
}

impl SubmissionService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Persist one submission. The row is committed when this returns `Ok`.
    ///
    /// Store failures are returned as-is; there is no retry here.
    pub async fn submit(&self, form: SubmitForm) -> Result<User, SubmitError> {
        let name = form.name.ok_or(SubmitError::MissingField("name"))?;
        let user = self.store.insert_user(NewUser { name }).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use userform_core::InMemoryUserStore;

    fn service() -> (Arc<InMemoryUserStore>, SubmissionService) {
        let store = Arc::new(InMemoryUserStore::new());
        (store.clone(), SubmissionService::new(store))
    }

    #[tokio::test]
    async fn test_submit_persists_name() {
        let (store, service) = service();

        let user = service
            .submit(SubmitForm {
                name: Some("Alice".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(store.list_users().await.unwrap(), vec![user]);
    }

    #[tokio::test]
    async fn test_empty_name_is_accepted() {
        let (store, service) = service();

        service
            .submit(SubmitForm {
                name: Some(String::new()),
            })
            .await
            .unwrap();

        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_name() {
        let (store, service) = service();

        let err = service.submit(SubmitForm::default()).await.unwrap_err();

        assert!(matches!(err, SubmitError::MissingField("name")));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let (store, service) = service();
        store.set_unavailable(Some("connection reset"));

        let err = service
            .submit(SubmitForm {
                name: Some("Alice".to_string()),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Store(StoreError::Unavailable(_))));
    }
}
