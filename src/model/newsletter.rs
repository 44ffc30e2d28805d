//! Newsletter subscribers.
//!
//! Emails are unique regardless of case: the store compares the lowercased,
//! trimmed address.

use super::error::{require, RecordError};
use crate::resource::{Resource, ValidationErrors, Validator};
use crate::ui::{Badge, DisplayRow, FormModel, Formatter, Presentable, Tone};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use table_store::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterSubscriber {
    pub id: u64,
    pub email: String,
    pub name: Option<String>,
    /// Where the subscription came from ("footer", "checkout", ...).
    pub source: Option<String>,
    pub is_subscribed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriberDraft {
    pub email: String,
    pub name: Option<String>,
    pub source: Option<String>,
    pub is_subscribed: bool,
}

impl Default for SubscriberDraft {
    fn default() -> Self {
        Self {
            email: String::new(),
            name: None,
            source: None,
            is_subscribed: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriberPatch {
    pub email: Option<String>,
    pub name: Option<Option<String>>,
    pub source: Option<Option<String>>,
    pub is_subscribed: Option<bool>,
}

fn check_email(email: &str) -> Result<(), RecordError> {
    require("email", email)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.contains('@') => Ok(()),
        _ => Err(RecordError::Malformed("email")),
    }
}

#[async_trait]
impl Record for NewsletterSubscriber {
    const TABLE: &'static str = "newsletter_subscribers";
    type Id = u64;
    type Draft = SubscriberDraft;
    type Patch = SubscriberPatch;
    type Context = ();
    type Error = RecordError;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn from_draft(id: u64, draft: SubscriberDraft, created_at: DateTime<Utc>) -> Result<Self, RecordError> {
        let email = draft.email.trim().to_owned();
        check_email(&email)?;
        Ok(Self {
            id,
            email,
            name: draft.name,
            source: draft.source,
            is_subscribed: draft.is_subscribed,
            created_at,
        })
    }

    async fn on_update(&mut self, patch: SubscriberPatch, _ctx: &()) -> Result<(), RecordError> {
        apply_patch!(self, patch; email, name, source, is_subscribed);
        self.email = self.email.trim().to_owned();
        check_email(&self.email)
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.email.to_lowercase())
    }
}

impl Resource for NewsletterSubscriber {
    const LABEL: &'static str = "Abonné";

    fn list_order(a: &Self, b: &Self) -> Ordering {
        newest_first!(a, b)
    }

    fn validate_draft(d: &SubscriberDraft) -> Result<(), ValidationErrors> {
        Validator::new().required("email", &d.email).finish()
    }

    fn validate_patch(p: &SubscriberPatch) -> Result<(), ValidationErrors> {
        Validator::new()
            .required_opt("email", p.email.as_deref())
            .finish()
    }
}

impl FormModel for NewsletterSubscriber {
    fn blank_draft() -> SubscriberDraft {
        SubscriberDraft::default()
    }

    fn to_draft(&self) -> SubscriberDraft {
        draft_of!(SubscriberDraft from self; email, name, source, is_subscribed)
    }

    fn patch_from_draft(draft: SubscriberDraft) -> SubscriberPatch {
        full_patch!(SubscriberPatch from draft; email, name, source, is_subscribed)
    }
}

impl Presentable for NewsletterSubscriber {
    const COLUMNS: &'static [&'static str] = &["Email", "Nom", "Source", "Inscrit le", "Statut"];

    fn to_row(&self, fmt: &Formatter) -> DisplayRow<u64> {
        let status = if self.is_subscribed {
            Badge::new("Abonné", Tone::Positive)
        } else {
            Badge::new("Désabonné", Tone::Neutral)
        };
        DisplayRow::new(self.id)
            .text(&self.email)
            .optional(self.name.as_deref())
            .optional(self.source.as_deref())
            .text(fmt.timestamp(self.created_at))
            .badge(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use table_store::{sequential_ids, StoreError, TableActor};

    fn draft(email: &str) -> SubscriberDraft {
        SubscriberDraft {
            email: email.into(),
            ..SubscriberDraft::default()
        }
    }

    #[test]
    fn test_email_shape() {
        assert!(check_email("ana@example.fr").is_ok());
        assert_eq!(check_email("ana.example.fr"), Err(RecordError::Malformed("email")));
        assert_eq!(check_email("@example.fr"), Err(RecordError::Malformed("email")));
        assert_eq!(check_email("ana@localhost"), Err(RecordError::Malformed("email")));
        assert_eq!(check_email(""), Err(RecordError::Missing("email")));
    }

    #[tokio::test]
    async fn test_email_is_unique_ignoring_case() {
        let (table, client) = TableActor::<NewsletterSubscriber>::new(4, sequential_ids(1));
        tokio::spawn(table.run(()));

        let ana = client.insert(draft(" Ana@Example.fr ")).await.unwrap();
        assert_eq!(ana.email, "Ana@Example.fr");

        let duplicate = client.insert(draft("ana@example.FR")).await;
        assert!(matches!(duplicate, Err(StoreError::Conflict { .. })));

        let bob = client.insert(draft("bob@example.fr")).await.unwrap();
        let steal = SubscriberPatch {
            email: Some("ANA@example.fr".into()),
            ..SubscriberPatch::default()
        };
        assert!(matches!(client.update(bob.id, steal).await, Err(StoreError::Conflict { .. })));
    }
}
