//! Activities: guided tours, workshops, outdoor sports, ...

use super::error::{non_negative, require, RecordError};
use super::partner::{ensure_partner, PartnerDirectory, PartnerId};
use crate::gallery;
use crate::resource::{Resource, ValidationErrors, Validator};
use crate::ui::{Badge, DisplayRow, FormModel, Formatter, Presentable};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use table_store::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub price: f64,
    /// Free text, e.g. "2h30".
    pub duration: Option<String>,
    pub max_participants: Option<i32>,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub is_active: bool,
    pub partner_id: Option<PartnerId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub price: f64,
    pub duration: Option<String>,
    pub max_participants: Option<i32>,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub is_active: bool,
    pub partner_id: Option<PartnerId>,
}

impl Default for ActivityDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: String::new(),
            location: String::new(),
            price: 0.0,
            duration: None,
            max_participants: None,
            image_url: None,
            images: Vec::new(),
            is_active: true,
            partner_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub duration: Option<Option<String>>,
    pub max_participants: Option<Option<i32>>,
    pub image_url: Option<Option<String>>,
    pub images: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub partner_id: Option<Option<PartnerId>>,
}

impl_gallery!(Activity, ActivityDraft);
impl_owned!(Activity);

impl Activity {
    fn check(&self) -> Result<(), RecordError> {
        require("name", &self.name)?;
        require("location", &self.location)?;
        non_negative("price", self.price)?;
        if let Some(max) = self.max_participants {
            non_negative("max_participants", f64::from(max))?;
        }
        Ok(())
    }
}

#[async_trait]
impl Record for Activity {
    const TABLE: &'static str = "activities";
    type Id = u64;
    type Draft = ActivityDraft;
    type Patch = ActivityPatch;
    type Context = PartnerDirectory;
    type Error = RecordError;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn from_draft(id: u64, draft: ActivityDraft, created_at: DateTime<Utc>) -> Result<Self, RecordError> {
        let mut row = Self {
            id,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            location: draft.location,
            price: draft.price,
            duration: draft.duration,
            max_participants: draft.max_participants,
            image_url: draft.image_url,
            images: draft.images,
            is_active: draft.is_active,
            partner_id: draft.partner_id,
            created_at,
        };
        gallery::normalize(&mut row);
        row.check()?;
        Ok(row)
    }

    async fn on_insert(&mut self, partners: &PartnerDirectory) -> Result<(), RecordError> {
        ensure_partner(partners, self.partner_id.as_ref()).await
    }

    async fn on_update(&mut self, patch: ActivityPatch, partners: &PartnerDirectory) -> Result<(), RecordError> {
        let repointed = patch.partner_id.is_some();
        apply_patch!(self, patch; name, description, category, location, price, duration,
            max_participants, is_active, partner_id);
        gallery::patch(self, patch.image_url, patch.images);
        self.check()?;
        if repointed {
            ensure_partner(partners, self.partner_id.as_ref()).await?;
        }
        Ok(())
    }
}

impl Resource for Activity {
    const LABEL: &'static str = "Activité";

    fn list_order(a: &Self, b: &Self) -> Ordering {
        super::by_name(&a.name, &b.name).then_with(|| a.id.cmp(&b.id))
    }

    fn validate_draft(d: &ActivityDraft) -> Result<(), ValidationErrors> {
        Validator::new()
            .required("name", &d.name)
            .required("description", &d.description)
            .required("location", &d.location)
            .non_negative("price", d.price)
            .non_negative_opt("max_participants", d.max_participants.map(f64::from))
            .finish()
    }

    fn validate_patch(p: &ActivityPatch) -> Result<(), ValidationErrors> {
        Validator::new()
            .required_opt("name", p.name.as_deref())
            .required_opt("description", p.description.as_deref())
            .required_opt("location", p.location.as_deref())
            .non_negative_opt("price", p.price)
            .non_negative_opt("max_participants", p.max_participants.flatten().map(f64::from))
            .finish()
    }
}

impl FormModel for Activity {
    fn blank_draft() -> ActivityDraft {
        ActivityDraft::default()
    }

    fn to_draft(&self) -> ActivityDraft {
        let mut draft = draft_of!(ActivityDraft from self; name, description, category, location, price,
            duration, max_participants, image_url, images, is_active, partner_id);
        gallery::normalize(&mut draft);
        draft
    }

    fn patch_from_draft(draft: ActivityDraft) -> ActivityPatch {
        full_patch!(ActivityPatch from draft; name, description, category, location, price, duration,
            max_participants, image_url, images, is_active, partner_id)
    }

    fn attach_image(draft: &mut ActivityDraft, url: String) -> bool {
        gallery::add_image(draft, url);
        true
    }
}

impl Presentable for Activity {
    const COLUMNS: &'static [&'static str] = &["Image", "Nom", "Lieu", "Catégorie", "Prix", "Statut"];

    fn to_row(&self, fmt: &Formatter) -> DisplayRow<u64> {
        DisplayRow::new(self.id)
            .thumbnail(self.image_url.as_deref())
            .text(&self.name)
            .text(&self.location)
            .optional(Some(self.category.as_str()))
            .text(fmt.money(self.price))
            .badge(Badge::active(self.is_active))
    }
}
