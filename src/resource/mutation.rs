//! The write side of a resource: create, update, delete.
//!
//! Every call follows the same shape: check the payload, send it, and on success
//! patch the view's store with [`reduce`](super::reduce) instead of reading the
//! table again. On any failure the store is left exactly as it was and an error
//! notification is queued.

use super::reducer::Change;
use super::store::ListStore;
use super::validate::ValidationErrors;
use super::Resource;
use crate::ui::Toasts;
use table_store::{StoreError, TableClient};
use thiserror::Error;
use tracing::{debug, instrument};

/// Why a mutation did not happen.
#[derive(Debug, Error)]
pub enum MutationError {
    /// Caught before anything was sent.
    #[error("Validation failed: {0}")]
    Invalid(#[from] ValidationErrors),

    /// The data store refused or could not be reached.
    #[error("Remote failure: {0}")]
    Remote(#[from] StoreError),

    /// A delete was confirmed while no delete was pending.
    #[error("Nothing to confirm")]
    NothingToConfirm,

    /// The view has no storage bucket, or the resource has no image field.
    #[error("Image upload unavailable")]
    UploadUnavailable,
}

pub struct Mutations<T: Resource> {
    client: TableClient<T>,
}

impl<T: Resource> Clone for Mutations<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: Resource> Mutations<T> {
    pub fn new(client: TableClient<T>) -> Self {
        Self { client }
    }

    fn invalid(toasts: &mut Toasts, errors: ValidationErrors) -> MutationError {
        toasts.error("Formulaire incomplet", errors.to_string());
        MutationError::Invalid(errors)
    }

    fn remote(toasts: &mut Toasts, action: &str, error: StoreError) -> MutationError {
        toasts.error("Erreur", format!("{} : échec {action} ({error})", T::LABEL));
        MutationError::Remote(error)
    }

    #[instrument(skip_all, fields(table = T::TABLE))]
    pub async fn create(
        &self,
        draft: T::Draft,
        store: &mut ListStore<T>,
        toasts: &mut Toasts,
    ) -> Result<T, MutationError> {
        T::validate_draft(&draft).map_err(|e| Self::invalid(toasts, e))?;
        debug!(?draft, "create called");

        let row = self
            .client
            .insert(draft)
            .await
            .map_err(|e| Self::remote(toasts, "de la création", e))?;

        store.apply(&Change::Created(row.clone()));
        toasts.success("Succès", format!("{} créé(e)", T::LABEL));
        Ok(row)
    }

    #[instrument(skip_all, fields(table = T::TABLE, id = %id))]
    pub async fn update(
        &self,
        id: T::Id,
        patch: T::Patch,
        store: &mut ListStore<T>,
        toasts: &mut Toasts,
    ) -> Result<T, MutationError> {
        T::validate_patch(&patch).map_err(|e| Self::invalid(toasts, e))?;
        debug!(?patch, "update called");

        let row = self
            .client
            .update(id, patch)
            .await
            .map_err(|e| Self::remote(toasts, "de la mise à jour", e))?;

        store.apply(&Change::Updated(row.clone()));
        toasts.success("Succès", format!("{} mis(e) à jour", T::LABEL));
        Ok(row)
    }

    /// Deletes permanently. Callers go through the confirmation step first.
    #[instrument(skip_all, fields(table = T::TABLE, id = %id))]
    pub async fn delete(
        &self,
        id: T::Id,
        store: &mut ListStore<T>,
        toasts: &mut Toasts,
    ) -> Result<(), MutationError> {
        self.client
            .delete(id.clone())
            .await
            .map_err(|e| Self::remote(toasts, "de la suppression", e))?;

        store.apply(&Change::Deleted(id));
        toasts.success("Succès", format!("{} supprimé(e)", T::LABEL));
        Ok(())
    }
}
