//! The edit dialog of a resource screen.

use crate::resource::{ListStore, MutationError, Mutations, Resource};
use crate::ui::Toasts;
use tracing::debug;

/// Draft handling an entity needs to be edited in a form.
pub trait FormModel: Resource {
    /// Draft a new entity starts from.
    fn blank_draft() -> Self::Draft;

    /// Draft seeded from an existing row, with its gallery normalised.
    fn to_draft(&self) -> Self::Draft;

    /// Patch setting every editable field to the draft's value.
    fn patch_from_draft(draft: Self::Draft) -> Self::Patch;

    /// Stores an uploaded image URL in the draft. Returns `false` when the entity
    /// has no image field.
    fn attach_image(_draft: &mut Self::Draft, _url: String) -> bool {
        false
    }
}

/// Whether submitting creates a row or updates an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode<Id> {
    Create,
    Edit(Id),
}

pub struct FormState<T: FormModel> {
    mode: FormMode<T::Id>,
    draft: T::Draft,
    open: bool,
}

impl<T: FormModel> Default for FormState<T> {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            draft: T::blank_draft(),
            open: false,
        }
    }
}

impl<T: FormModel> FormState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &FormMode<T::Id> {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &T::Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut T::Draft {
        &mut self.draft
    }

    pub fn open_create(&mut self) {
        self.reset();
        self.open = true;
    }

    pub fn open_edit(&mut self, row: &T) {
        self.mode = FormMode::Edit(row.id().clone());
        self.draft = row.to_draft();
        self.open = true;
    }

    /// Hides the dialog. The draft is kept until the next open.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Back to create mode with the default draft.
    pub fn reset(&mut self) {
        self.mode = FormMode::Create;
        self.draft = T::blank_draft();
    }

    /// Sends the draft: `create` in create mode, `update` in edit mode.
    ///
    /// On success the form resets and closes. On failure it stays open with the
    /// draft intact.
    pub async fn submit(
        &mut self,
        mutations: &Mutations<T>,
        store: &mut ListStore<T>,
        toasts: &mut Toasts,
    ) -> Result<T, MutationError> {
        let draft = self.draft.clone();
        let saved = match &self.mode {
            FormMode::Create => mutations.create(draft, store, toasts).await?,
            FormMode::Edit(id) => {
                debug!(table = T::TABLE, %id, "Submitting edit");
                mutations
                    .update(id.clone(), T::patch_from_draft(draft), store, toasts)
                    .await?
            }
        };
        self.reset();
        self.close();
        Ok(saved)
    }
}
