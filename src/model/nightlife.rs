//! Bars, clubs and late-night venues.

use super::error::{require, RecordError};
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
pub struct Nightlife {
    pub id: u64,
    pub name: String,
    pub description: String,
    /// "Bar", "Club", "Rooftop", ...
    pub venue_type: String,
    pub location: String,
    pub music_style: Option<String>,
    pub opening_hours: Option<String>,
    pub price_range: Option<String>,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub is_active: bool,
    pub partner_id: Option<PartnerId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightlifeDraft {
    pub name: String,
    pub description: String,
    pub venue_type: String,
    pub location: String,
    pub music_style: Option<String>,
    pub opening_hours: Option<String>,
    pub price_range: Option<String>,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub is_active: bool,
    pub partner_id: Option<PartnerId>,
}

impl Default for NightlifeDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            venue_type: "Bar".to_owned(),
            location: String::new(),
            music_style: None,
            opening_hours: None,
            price_range: None,
            image_url: None,
            images: Vec::new(),
            is_active: true,
            partner_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NightlifePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub venue_type: Option<String>,
    pub location: Option<String>,
    pub music_style: Option<Option<String>>,
    pub opening_hours: Option<Option<String>>,
    pub price_range: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
    pub images: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub partner_id: Option<Option<PartnerId>>,
}

impl_gallery!(Nightlife, NightlifeDraft);
impl_owned!(Nightlife);

#[async_trait]
impl Record for Nightlife {
    const TABLE: &'static str = "nightlife_venues";
    type Id = u64;
    type Draft = NightlifeDraft;
    type Patch = NightlifePatch;
    type Context = PartnerDirectory;
    type Error = RecordError;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn from_draft(id: u64, draft: NightlifeDraft, created_at: DateTime<Utc>) -> Result<Self, RecordError> {
        require("name", &draft.name)?;
        let mut row = Self {
            id,
            name: draft.name,
            description: draft.description,
            venue_type: draft.venue_type,
            location: draft.location,
            music_style: draft.music_style,
            opening_hours: draft.opening_hours,
            price_range: draft.price_range,
            image_url: draft.image_url,
            images: draft.images,
            is_active: draft.is_active,
            partner_id: draft.partner_id,
            created_at,
        };
        gallery::normalize(&mut row);
        Ok(row)
    }

    async fn on_insert(&mut self, partners: &PartnerDirectory) -> Result<(), RecordError> {
        ensure_partner(partners, self.partner_id.as_ref()).await
    }

    async fn on_update(&mut self, patch: NightlifePatch, partners: &PartnerDirectory) -> Result<(), RecordError> {
        let repointed = patch.partner_id.is_some();
        apply_patch!(self, patch; name, description, venue_type, location, music_style, opening_hours,
            price_range, is_active, partner_id);
        gallery::patch(self, patch.image_url, patch.images);
        require("name", &self.name)?;
        if repointed {
            ensure_partner(partners, self.partner_id.as_ref()).await?;
        }
        Ok(())
    }
}

impl Resource for Nightlife {
    const LABEL: &'static str = "Établissement";

    fn list_order(a: &Self, b: &Self) -> Ordering {
        super::by_name(&a.name, &b.name).then_with(|| a.id.cmp(&b.id))
    }

    fn validate_draft(d: &NightlifeDraft) -> Result<(), ValidationErrors> {
        Validator::new()
            .required("name", &d.name)
            .required("venue_type", &d.venue_type)
            .required("location", &d.location)
            .finish()
    }

    fn validate_patch(p: &NightlifePatch) -> Result<(), ValidationErrors> {
        Validator::new()
            .required_opt("name", p.name.as_deref())
            .required_opt("venue_type", p.venue_type.as_deref())
            .required_opt("location", p.location.as_deref())
            .finish()
    }
}

impl FormModel for Nightlife {
    fn blank_draft() -> NightlifeDraft {
        NightlifeDraft::default()
    }

    fn to_draft(&self) -> NightlifeDraft {
        let mut draft = draft_of!(NightlifeDraft from self; name, description, venue_type, location, music_style,
            opening_hours, price_range, image_url, images, is_active, partner_id);
        gallery::normalize(&mut draft);
        draft
    }

    fn patch_from_draft(draft: NightlifeDraft) -> NightlifePatch {
        full_patch!(NightlifePatch from draft; name, description, venue_type, location, music_style,
            opening_hours, price_range, image_url, images, is_active, partner_id)
    }

    fn attach_image(draft: &mut NightlifeDraft, url: String) -> bool {
        gallery::add_image(draft, url);
        true
    }
}

impl Presentable for Nightlife {
    const COLUMNS: &'static [&'static str] = &["Image", "Nom", "Type", "Lieu", "Horaires", "Statut"];

    fn to_row(&self, _fmt: &Formatter) -> DisplayRow<u64> {
        DisplayRow::new(self.id)
            .thumbnail(self.image_url.as_deref())
            .text(&self.name)
            .text(&self.venue_type)
            .text(&self.location)
            .optional(self.opening_hours.as_deref())
            .badge(Badge::active(self.is_active))
    }
}
