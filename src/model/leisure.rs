//! Leisure venues: parks, spas, escape games, ...

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
pub struct Leisure {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub price: f64,
    pub duration: Option<String>,
    pub min_age: Option<i32>,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub is_active: bool,
    pub partner_id: Option<PartnerId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeisureDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub price: f64,
    pub duration: Option<String>,
    pub min_age: Option<i32>,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub is_active: bool,
    pub partner_id: Option<PartnerId>,
}

impl Default for LeisureDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: String::new(),
            location: String::new(),
            price: 0.0,
            duration: None,
            min_age: None,
            image_url: None,
            images: Vec::new(),
            is_active: true,
            partner_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeisurePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub duration: Option<Option<String>>,
    pub min_age: Option<Option<i32>>,
    pub image_url: Option<Option<String>>,
    pub images: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub partner_id: Option<Option<PartnerId>>,
}

impl_gallery!(Leisure, LeisureDraft);
impl_owned!(Leisure);

impl Leisure {
    fn check(&self) -> Result<(), RecordError> {
        require("name", &self.name)?;
        non_negative("price", self.price)?;
        match self.min_age {
            Some(age) => non_negative("min_age", f64::from(age)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Record for Leisure {
    const TABLE: &'static str = "leisures";
    type Id = u64;
    type Draft = LeisureDraft;
    type Patch = LeisurePatch;
    type Context = PartnerDirectory;
    type Error = RecordError;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn from_draft(id: u64, draft: LeisureDraft, created_at: DateTime<Utc>) -> Result<Self, RecordError> {
        let mut row = Self {
            id,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            location: draft.location,
            price: draft.price,
            duration: draft.duration,
            min_age: draft.min_age,
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

    async fn on_update(&mut self, patch: LeisurePatch, partners: &PartnerDirectory) -> Result<(), RecordError> {
        let repointed = patch.partner_id.is_some();
        apply_patch!(self, patch; name, description, category, location, price, duration, min_age,
            is_active, partner_id);
        gallery::patch(self, patch.image_url, patch.images);
        self.check()?;
        if repointed {
            ensure_partner(partners, self.partner_id.as_ref()).await?;
        }
        Ok(())
    }
}

impl Resource for Leisure {
    const LABEL: &'static str = "Loisir";

    fn list_order(a: &Self, b: &Self) -> Ordering {
        super::by_name(&a.name, &b.name).then_with(|| a.id.cmp(&b.id))
    }

    fn validate_draft(d: &LeisureDraft) -> Result<(), ValidationErrors> {
        Validator::new()
            .required("name", &d.name)
            .required("description", &d.description)
            .required("location", &d.location)
            .non_negative("price", d.price)
            .non_negative_opt("min_age", d.min_age.map(f64::from))
            .finish()
    }

    fn validate_patch(p: &LeisurePatch) -> Result<(), ValidationErrors> {
        Validator::new()
            .required_opt("name", p.name.as_deref())
            .required_opt("description", p.description.as_deref())
            .required_opt("location", p.location.as_deref())
            .non_negative_opt("price", p.price)
            .non_negative_opt("min_age", p.min_age.flatten().map(f64::from))
            .finish()
    }
}

impl FormModel for Leisure {
    fn blank_draft() -> LeisureDraft {
        LeisureDraft::default()
    }

    fn to_draft(&self) -> LeisureDraft {
        let mut draft = draft_of!(LeisureDraft from self; name, description, category, location, price,
            duration, min_age, image_url, images, is_active, partner_id);
        gallery::normalize(&mut draft);
        draft
    }

    fn patch_from_draft(draft: LeisureDraft) -> LeisurePatch {
        full_patch!(LeisurePatch from draft; name, description, category, location, price, duration,
            min_age, image_url, images, is_active, partner_id)
    }

    fn attach_image(draft: &mut LeisureDraft, url: String) -> bool {
        gallery::add_image(draft, url);
        true
    }
}

impl Presentable for Leisure {
    const COLUMNS: &'static [&'static str] = &["Image", "Nom", "Catégorie", "Lieu", "Prix", "Âge min.", "Statut"];

    fn to_row(&self, fmt: &Formatter) -> DisplayRow<u64> {
        let price = if self.price == 0.0 {
            "Gratuit".to_owned()
        } else {
            fmt.money(self.price)
        };
        DisplayRow::new(self.id)
            .thumbnail(self.image_url.as_deref())
            .text(&self.name)
            .optional(Some(self.category.as_str()))
            .text(&self.location)
            .text(price)
            .optional(self.min_age.map(|age| format!("{age} ans")).as_deref())
            .badge(Badge::active(self.is_active))
    }
}
