//! Voyance: the mediums bookable by the minute.

use super::error::{non_negative, require, within, RecordError};
use crate::resource::{Resource, ValidationErrors, Validator};
use crate::ui::{Badge, DisplayRow, FormModel, Formatter, Presentable};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use table_store::Record;

pub const DEFAULT_MEDIUM_RATING: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medium {
    pub id: u64,
    pub name: String,
    /// "Tarot", "Astrologie", "Médiumnité", ...
    pub specialty: String,
    pub description: String,
    pub price_per_minute: f64,
    pub rating: f64,
    pub years_experience: u32,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediumDraft {
    pub name: String,
    pub specialty: String,
    pub description: String,
    pub price_per_minute: f64,
    pub rating: f64,
    pub years_experience: u32,
    pub image_url: Option<String>,
    pub is_available: bool,
}

impl Default for MediumDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            specialty: String::new(),
            description: String::new(),
            price_per_minute: 0.0,
            rating: DEFAULT_MEDIUM_RATING,
            years_experience: 0,
            image_url: None,
            is_available: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediumPatch {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub description: Option<String>,
    pub price_per_minute: Option<f64>,
    pub rating: Option<f64>,
    pub years_experience: Option<u32>,
    pub image_url: Option<Option<String>>,
    pub is_available: Option<bool>,
}

impl Medium {
    fn check(&self) -> Result<(), RecordError> {
        require("name", &self.name)?;
        non_negative("price_per_minute", self.price_per_minute)?;
        within("rating", self.rating, 0.0, 5.0)
    }
}

#[async_trait]
impl Record for Medium {
    const TABLE: &'static str = "mediums";
    type Id = u64;
    type Draft = MediumDraft;
    type Patch = MediumPatch;
    type Context = ();
    type Error = RecordError;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn from_draft(id: u64, draft: MediumDraft, created_at: DateTime<Utc>) -> Result<Self, RecordError> {
        let row = Self {
            id,
            name: draft.name,
            specialty: draft.specialty,
            description: draft.description,
            price_per_minute: draft.price_per_minute,
            rating: draft.rating,
            years_experience: draft.years_experience,
            image_url: draft.image_url,
            is_available: draft.is_available,
            created_at,
        };
        row.check()?;
        Ok(row)
    }

    async fn on_update(&mut self, patch: MediumPatch, _ctx: &()) -> Result<(), RecordError> {
        apply_patch!(self, patch; name, specialty, description, price_per_minute, rating, years_experience,
            image_url, is_available);
        self.check()
    }
}

impl Resource for Medium {
    const LABEL: &'static str = "Médium";

    fn list_order(a: &Self, b: &Self) -> Ordering {
        super::by_name(&a.name, &b.name).then_with(|| a.id.cmp(&b.id))
    }

    fn validate_draft(d: &MediumDraft) -> Result<(), ValidationErrors> {
        Validator::new()
            .required("name", &d.name)
            .required("specialty", &d.specialty)
            .non_negative("price_per_minute", d.price_per_minute)
            .non_negative("rating", d.rating)
            .finish()
    }

    fn validate_patch(p: &MediumPatch) -> Result<(), ValidationErrors> {
        Validator::new()
            .required_opt("name", p.name.as_deref())
            .required_opt("specialty", p.specialty.as_deref())
            .non_negative_opt("price_per_minute", p.price_per_minute)
            .non_negative_opt("rating", p.rating)
            .finish()
    }
}

impl FormModel for Medium {
    fn blank_draft() -> MediumDraft {
        MediumDraft::default()
    }

    fn to_draft(&self) -> MediumDraft {
        draft_of!(MediumDraft from self; name, specialty, description, price_per_minute, rating,
            years_experience, image_url, is_available)
    }

    fn patch_from_draft(draft: MediumDraft) -> MediumPatch {
        full_patch!(MediumPatch from draft; name, specialty, description, price_per_minute, rating,
            years_experience, image_url, is_available)
    }

    fn attach_image(draft: &mut MediumDraft, url: String) -> bool {
        draft.image_url = Some(url);
        true
    }
}

impl Presentable for Medium {
    const COLUMNS: &'static [&'static str] = &["Photo", "Nom", "Spécialité", "Tarif", "Note", "Expérience", "Disponibilité"];

    fn to_row(&self, fmt: &Formatter) -> DisplayRow<u64> {
        DisplayRow::new(self.id)
            .thumbnail(self.image_url.as_deref())
            .text(&self.name)
            .text(&self.specialty)
            .text(format!("{}/min", fmt.money(self.price_per_minute)))
            .text(fmt.rating(self.rating))
            .text(format!("{} ans", self.years_experience))
            .badge(Badge::available(self.is_available))
    }
}
