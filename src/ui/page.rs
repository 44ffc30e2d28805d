//! One resource screen: list, edit dialog, delete confirmation and notifications.

use super::{DeleteConfirmation, FormModel, FormState, Formatter, ListView, Presentable, Toasts};
use crate::resource::{AccessScope, ListStore, MutationError, Mutations, Owned, ResourceQuery};
use crate::upload;
use table_store::{BucketClient, Filter, TableClient};
use tracing::{info, instrument, warn};

/// The view object behind one back-office screen.
///
/// A page owns its list store; every operation takes `&mut self` and awaits the
/// data store, so there is never more than one request in flight per page.
pub struct ResourcePage<T: FormModel + Presentable> {
    query: ResourceQuery<T>,
    mutations: Mutations<T>,
    store: ListStore<T>,
    form: FormState<T>,
    confirm: DeleteConfirmation<T::Id>,
    toasts: Toasts,
    formatter: Formatter,
    bucket: Option<BucketClient>,
}

impl<T: FormModel + Presentable> ResourcePage<T> {
    pub fn new(client: TableClient<T>, formatter: Formatter) -> Self {
        Self {
            query: ResourceQuery::new(client.clone()),
            mutations: Mutations::new(client),
            store: ListStore::new(),
            form: FormState::new(),
            confirm: DeleteConfirmation::Idle,
            toasts: Toasts::new(),
            formatter,
            bucket: None,
        }
    }

    pub fn with_bucket(mut self, bucket: BucketClient) -> Self {
        self.bucket = Some(bucket);
        self
    }

    pub fn with_filter(mut self, filter: Option<Filter<T>>) -> Self {
        self.query.set_filter(filter.clone());
        self.store.set_filter(filter);
        self
    }

    // ── list ────────────────────────────────────────────────────────────────

    /// Reads the table into the page's store.
    pub async fn load(&mut self) -> &[T] {
        self.query.fetch_all(&mut self.store, &mut self.toasts).await
    }

    /// Reads the table only when the store is stale or the last read failed.
    pub async fn refresh(&mut self) -> &[T] {
        if self.store.needs_refresh() {
            self.load().await
        } else {
            self.store.read()
        }
    }

    pub fn invalidate(&mut self) {
        self.store.invalidate();
    }

    pub fn rows(&self) -> &[T] {
        self.store.read()
    }

    pub fn store(&self) -> &ListStore<T> {
        &self.store
    }

    pub fn view(&self) -> ListView<T::Id> {
        ListView::render(&self.store, &self.formatter)
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    // ── form ────────────────────────────────────────────────────────────────

    pub fn form(&self) -> &FormState<T> {
        &self.form
    }

    pub fn draft_mut(&mut self) -> &mut T::Draft {
        self.form.draft_mut()
    }

    pub fn open_create(&mut self) {
        self.form.open_create();
    }

    /// Opens the dialog on a listed row. Returns `false` when the row is not listed.
    pub fn open_edit(&mut self, id: &T::Id) -> bool {
        match self.store.get(id) {
            Some(row) => {
                self.form.open_edit(row);
                true
            }
            None => false,
        }
    }

    pub fn close_form(&mut self) {
        self.form.close();
    }

    pub async fn submit(&mut self) -> Result<T, MutationError> {
        self.form
            .submit(&self.mutations, &mut self.store, &mut self.toasts)
            .await
    }

    /// Direct update without the dialog (row toggles such as active/inactive).
    pub async fn update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, MutationError> {
        self.mutations
            .update(id, patch, &mut self.store, &mut self.toasts)
            .await
    }

    // ── delete ──────────────────────────────────────────────────────────────

    pub fn request_delete(&mut self, id: T::Id) {
        self.confirm.request(id);
    }

    pub fn cancel_delete(&mut self) {
        self.confirm.cancel();
    }

    pub fn pending_delete(&self) -> Option<&T::Id> {
        self.confirm.pending()
    }

    /// Deletes the row awaiting confirmation.
    pub async fn confirm_delete(&mut self) -> Result<T::Id, MutationError> {
        let id = self.confirm.confirm().ok_or(MutationError::NothingToConfirm)?;
        self.mutations
            .delete(id.clone(), &mut self.store, &mut self.toasts)
            .await?;
        Ok(id)
    }

    // ── images ──────────────────────────────────────────────────────────────

    /// Uploads a file and attaches its public URL to the open draft.
    #[instrument(skip(self, bytes), fields(table = T::TABLE, size = bytes.len()))]
    pub async fn upload_image(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<String, MutationError> {
        let Some(bucket) = self.bucket.clone() else {
            self.toasts.error("Erreur", "Aucun espace de stockage configuré");
            return Err(MutationError::UploadUnavailable);
        };

        let key = upload::object_key(T::TABLE, file_name);
        let url = match bucket.upload(key.clone(), bytes).await {
            Ok(url) => url,
            Err(e) => {
                self.toasts.error("Erreur", format!("Échec du téléversement ({e})"));
                return Err(e.into());
            }
        };

        if !T::attach_image(self.form.draft_mut(), url.clone()) {
            warn!(%key, "Resource has no image field, removing upload");
            if let Err(e) = bucket.remove(key).await {
                warn!(error = %e, "Cleanup failed");
            }
            self.toasts.error("Erreur", format!("{} n'accepte pas d'image", T::LABEL));
            return Err(MutationError::UploadUnavailable);
        }

        info!(%url, "Image attached");
        self.toasts.success("Succès", "Image téléversée");
        Ok(url)
    }

    // ── notifications ───────────────────────────────────────────────────────

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut Toasts {
        &mut self.toasts
    }
}

impl<T: FormModel + Presentable + Owned> ResourcePage<T> {
    /// Restricts the list to the rows `scope` may see.
    pub fn with_scope(self, scope: &AccessScope) -> Self {
        let filter = scope.filter::<T>();
        self.with_filter(filter)
    }
}
