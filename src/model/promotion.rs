//! Promotion codes.
//!
//! A promotion is live when it is active **and** today falls inside its optional
//! `[valid_from, valid_until]` window. The window is only evaluated for display;
//! the stored `is_active` flag is never rewritten by it.

use super::error::{require, within, RecordError};
use super::partner::{ensure_partner, PartnerDirectory, PartnerId};
use crate::resource::{Resource, ValidationErrors, Validator};
use crate::ui::{Badge, DisplayRow, FormModel, Formatter, Presentable, Tone};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use table_store::Record;

pub const DEFAULT_DISCOUNT_PERCENT: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: u64,
    pub title: String,
    pub description: String,
    /// Stored uppercase.
    pub code: String,
    pub discount_percent: f64,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub partner_id: Option<PartnerId>,
    pub created_at: DateTime<Utc>,
}

/// Where a promotion stands on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionStatus {
    Live,
    Inactive,
    Upcoming,
    Expired,
}

impl Promotion {
    pub fn status_on(&self, today: NaiveDate) -> PromotionStatus {
        if !self.is_active {
            PromotionStatus::Inactive
        } else if self.valid_until.is_some_and(|until| until < today) {
            PromotionStatus::Expired
        } else if self.valid_from.is_some_and(|from| from > today) {
            PromotionStatus::Upcoming
        } else {
            PromotionStatus::Live
        }
    }

    fn check(&self) -> Result<(), RecordError> {
        require("title", &self.title)?;
        require("code", &self.code)?;
        within("discount_percent", self.discount_percent, 0.0, 100.0)?;
        match (self.valid_from, self.valid_until) {
            (Some(from), Some(until)) if until < from => Err(RecordError::DateRange("promotion")),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionDraft {
    pub title: String,
    pub description: String,
    pub code: String,
    pub discount_percent: f64,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub partner_id: Option<PartnerId>,
}

impl Default for PromotionDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            code: String::new(),
            discount_percent: DEFAULT_DISCOUNT_PERCENT,
            valid_from: None,
            valid_until: None,
            image_url: None,
            is_active: true,
            partner_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromotionPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub discount_percent: Option<f64>,
    pub valid_from: Option<Option<NaiveDate>>,
    pub valid_until: Option<Option<NaiveDate>>,
    pub image_url: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub partner_id: Option<Option<PartnerId>>,
}

impl PromotionPatch {
    /// Patch flipping only the active flag.
    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }
}

impl_owned!(Promotion);

fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

#[async_trait]
impl Record for Promotion {
    const TABLE: &'static str = "promotions";
    type Id = u64;
    type Draft = PromotionDraft;
    type Patch = PromotionPatch;
    type Context = PartnerDirectory;
    type Error = RecordError;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn from_draft(id: u64, draft: PromotionDraft, created_at: DateTime<Utc>) -> Result<Self, RecordError> {
        let row = Self {
            id,
            title: draft.title,
            description: draft.description,
            code: normalize_code(&draft.code),
            discount_percent: draft.discount_percent,
            valid_from: draft.valid_from,
            valid_until: draft.valid_until,
            image_url: draft.image_url,
            is_active: draft.is_active,
            partner_id: draft.partner_id,
            created_at,
        };
        row.check()?;
        Ok(row)
    }

    async fn on_insert(&mut self, partners: &PartnerDirectory) -> Result<(), RecordError> {
        ensure_partner(partners, self.partner_id.as_ref()).await
    }

    async fn on_update(&mut self, patch: PromotionPatch, partners: &PartnerDirectory) -> Result<(), RecordError> {
        let repointed = patch.partner_id.is_some();
        apply_patch!(self, patch; title, description, code, discount_percent, valid_from, valid_until,
            image_url, is_active, partner_id);
        self.code = normalize_code(&self.code);
        self.check()?;
        if repointed {
            ensure_partner(partners, self.partner_id.as_ref()).await?;
        }
        Ok(())
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.code.clone())
    }
}

impl Resource for Promotion {
    const LABEL: &'static str = "Promotion";

    fn list_order(a: &Self, b: &Self) -> Ordering {
        newest_first!(a, b)
    }

    fn validate_draft(d: &PromotionDraft) -> Result<(), ValidationErrors> {
        Validator::new()
            .required("title", &d.title)
            .required("code", &d.code)
            .non_negative("discount_percent", d.discount_percent)
            .finish()
    }

    fn validate_patch(p: &PromotionPatch) -> Result<(), ValidationErrors> {
        Validator::new()
            .required_opt("title", p.title.as_deref())
            .required_opt("code", p.code.as_deref())
            .non_negative_opt("discount_percent", p.discount_percent)
            .finish()
    }
}

impl FormModel for Promotion {
    fn blank_draft() -> PromotionDraft {
        PromotionDraft::default()
    }

    fn to_draft(&self) -> PromotionDraft {
        draft_of!(PromotionDraft from self; title, description, code, discount_percent, valid_from, valid_until,
            image_url, is_active, partner_id)
    }

    fn patch_from_draft(draft: PromotionDraft) -> PromotionPatch {
        full_patch!(PromotionPatch from draft; title, description, code, discount_percent, valid_from,
            valid_until, image_url, is_active, partner_id)
    }

    fn attach_image(draft: &mut PromotionDraft, url: String) -> bool {
        draft.image_url = Some(url);
        true
    }
}

impl Presentable for Promotion {
    const COLUMNS: &'static [&'static str] = &["Image", "Titre", "Code", "Réduction", "Validité", "Statut"];

    fn to_row(&self, fmt: &Formatter) -> DisplayRow<u64> {
        let window = match (self.valid_from, self.valid_until) {
            (Some(from), Some(until)) => Some(format!("{} au {}", fmt.date(from), fmt.date(until))),
            (Some(from), None) => Some(format!("Dès le {}", fmt.date(from))),
            (None, Some(until)) => Some(format!("Jusqu'au {}", fmt.date(until))),
            (None, None) => None,
        };
        let status = match self.status_on(fmt.today()) {
            PromotionStatus::Live => Badge::active(true),
            PromotionStatus::Inactive => Badge::active(false),
            PromotionStatus::Upcoming => Badge::new("À venir", Tone::Neutral),
            PromotionStatus::Expired => Badge::new("Expirée", Tone::Warning),
        };
        DisplayRow::new(self.id)
            .thumbnail(self.image_url.as_deref())
            .text(&self.title)
            .text(&self.code)
            .text(fmt.percent(self.discount_percent))
            .optional(window.as_deref())
            .badge(status)
    }
}
