//! Admin list/edit screens over the master-data endpoints
//!
//! Every screen follows the same contract: load the list on mount, edit a
//! draft in a modal (empty defaults for create, a copy of the record for
//! edit), save with POST or PUT depending on whether an id is being edited,
//! delete only after confirmation, and reload the list after each write.

mod dashboard;
mod room_filters;
mod tariffs;

use log::{info, warn};
use serde::{de::DeserializeOwned, Serialize};

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::forms::ValidationErrors;

pub use dashboard::*;
pub use tariffs::*;

/// A master-data record managed through an admin screen
pub trait Resource: Clone + Default + Serialize + DeserializeOwned + Send + Sync {
    /// Collection path, e.g. `/meal-tariff-master`
    const PATH: &'static str;

    fn id(&self) -> Option<i64>;

    /// Check a draft against the other records on screen.
    ///
    /// `others` never contains the record being edited.
    fn validate(&self, others: &[Self]) -> std::result::Result<(), ValidationErrors>;
}

/// REST client for one resource collection
#[derive(Clone)]
pub struct CrudClient<R: Resource> {
    api: ApiClient,
    _resource: std::marker::PhantomData<R>,
}

impl<R: Resource> CrudClient<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: std::marker::PhantomData,
        }
    }

    fn item_path(id: i64) -> String {
        format!("{}/{}", R::PATH, id)
    }

    pub async fn list(&self) -> Result<Vec<R>> {
        self.api.list(R::PATH).await
    }

    pub async fn create(&self, record: &R) -> Result<()> {
        self.api.post(R::PATH, record).await?;
        Ok(())
    }

    pub async fn update(&self, id: i64, record: &R) -> Result<()> {
        self.api.put(&Self::item_path(id), record).await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.api.delete(&Self::item_path(id)).await?;
        Ok(())
    }
}

/// The open create/edit modal
#[derive(Debug, Clone, PartialEq)]
pub struct Editor<R> {
    /// `Some` when editing an existing record
    pub editing_id: Option<i64>,
    pub draft: R,
    pub errors: ValidationErrors,
}

/// State behind one admin list screen
pub struct CrudScreen<R: Resource> {
    client: CrudClient<R>,
    records: Vec<R>,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
    editor: Option<Editor<R>>,
    pending_delete: Option<i64>,
    failure_message: String,
}

impl<R: Resource> CrudScreen<R> {
    pub fn new(client: CrudClient<R>) -> Self {
        let failure_message = client.api.options().generic_error_message.clone();
        Self {
            client,
            records: Vec::new(),
            loading: false,
            error: None,
            notice: None,
            editor: None,
            pending_delete: None,
            failure_message,
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// User-facing message of the last failed call
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// User-facing message of the last successful write
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn editor(&self) -> Option<&Editor<R>> {
        self.editor.as_ref()
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    fn fail(&mut self, action: &str, err: Error) -> Error {
        warn!("{} {} failed: {}", action, R::PATH, err);
        self.error = Some(err.user_message(&self.failure_message));
        err
    }

    /// Fetch the list. On failure the previous records stay on screen.
    pub async fn load(&mut self) -> Result<()> {
        self.loading = true;
        let result = self.client.list().await;
        self.loading = false;

        match result {
            Ok(records) => {
                self.records = records;
                self.error = None;
                Ok(())
            }
            Err(err) => Err(self.fail("loading", err)),
        }
    }

    pub fn open_create(&mut self) {
        self.notice = None;
        self.editor = Some(Editor {
            editing_id: None,
            draft: R::default(),
            errors: ValidationErrors::new(),
        });
    }

    /// Open the modal on a copy of an existing record
    pub fn open_edit(&mut self, id: i64) -> bool {
        self.notice = None;
        match self.records.iter().find(|r| r.id() == Some(id)) {
            Some(record) => {
                self.editor = Some(Editor {
                    editing_id: Some(id),
                    draft: record.clone(),
                    errors: ValidationErrors::new(),
                });
                true
            }
            None => false,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut R> {
        self.editor.as_mut().map(|e| &mut e.draft)
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Records other than the one being edited
    fn others(&self, editing_id: Option<i64>) -> Vec<R> {
        self.records
            .iter()
            .filter(|r| editing_id.is_none() || r.id() != editing_id)
            .cloned()
            .collect()
    }

    /// POST or PUT the draft, then reload.
    ///
    /// A draft that fails validation stays in the editor with its errors and
    /// nothing is sent. Once the write succeeds this returns `Ok`, even when
    /// the reload fails; that failure only shows in [`CrudScreen::error`].
    pub async fn save(&mut self) -> Result<()> {
        let (editing_id, draft) = match &self.editor {
            Some(editor) => (editor.editing_id, editor.draft.clone()),
            None => return Err(Error::general("nothing to save")),
        };

        if let Err(errors) = draft.validate(&self.others(editing_id)) {
            if let Some(editor) = self.editor.as_mut() {
                editor.errors = errors.clone();
            }
            return Err(Error::Validation(errors));
        }

        self.loading = true;
        let result = match editing_id {
            Some(id) => self.client.update(id, &draft).await,
            None => self.client.create(&draft).await,
        };
        self.loading = false;

        match result {
            Ok(()) => {
                info!(
                    "{} {}",
                    if editing_id.is_some() { "updated" } else { "created" },
                    R::PATH
                );
                self.editor = None;
                self.notice = Some(
                    if editing_id.is_some() { "Saved changes." } else { "Created." }.to_string(),
                );
                self.reload_after_write().await;
                Ok(())
            }
            // The modal stays open with the draft intact.
            Err(err) => Err(self.fail("saving", err)),
        }
    }

    async fn reload_after_write(&mut self) {
        // The banner is set by `load`; the list stays stale until the next load.
        if self.load().await.is_err() {
            warn!("{} changed but the list could not be reloaded", R::PATH);
        }
    }

    /// First step of a delete: ask for confirmation
    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// DELETE the confirmed record, then reload. A failed reload does not
    /// turn the delete into an error.
    pub async fn confirm_delete(&mut self) -> Result<()> {
        let id = match self.pending_delete.take() {
            Some(id) => id,
            None => return Err(Error::general("no delete awaiting confirmation")),
        };

        self.loading = true;
        let result = self.client.delete(id).await;
        self.loading = false;

        match result {
            Ok(()) => {
                info!("deleted {}/{}", R::PATH, id);
                self.notice = Some("Deleted.".to_string());
                self.reload_after_write().await;
                Ok(())
            }
            Err(err) => Err(self.fail("deleting", err)),
        }
    }
}
