use super::error::{non_negative, require, RecordError};
use crate::gallery;
use crate::resource::{Resource, ValidationErrors, Validator};
use crate::ui::{Badge, DisplayRow, FormModel, Formatter, Presentable};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use table_store::Record;

/// A packaged trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelOffer {
    pub id: u64,
    pub title: String,
    pub destination: String,
    pub description: String,
    pub price: f64,
    pub duration_days: i32,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub included: Vec<String>,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelOfferDraft {
    pub title: String,
    pub destination: String,
    pub description: String,
    pub price: f64,
    pub duration_days: i32,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub included: Vec<String>,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub is_active: bool,
}

impl Default for TravelOfferDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            destination: String::new(),
            description: String::new(),
            price: 0.0,
            duration_days: 7,
            departure_date: None,
            return_date: None,
            included: Vec::new(),
            image_url: None,
            images: Vec::new(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TravelOfferPatch {
    pub title: Option<String>,
    pub destination: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration_days: Option<i32>,
    pub departure_date: Option<Option<NaiveDate>>,
    pub return_date: Option<Option<NaiveDate>>,
    pub included: Option<Vec<String>>,
    pub image_url: Option<Option<String>>,
    pub images: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl_gallery!(TravelOffer, TravelOfferDraft);

impl TravelOffer {
    fn check(&self) -> Result<(), RecordError> {
        require("title", &self.title)?;
        require("destination", &self.destination)?;
        non_negative("price", self.price)?;
        non_negative("duration_days", f64::from(self.duration_days))?;
        match (self.departure_date, self.return_date) {
            (Some(out), Some(back)) if back < out => Err(RecordError::DateRange("travel offer")),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl Record for TravelOffer {
    const TABLE: &'static str = "travel_offers";
    type Id = u64;
    type Draft = TravelOfferDraft;
    type Patch = TravelOfferPatch;
    type Context = ();
    type Error = RecordError;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn from_draft(id: u64, draft: TravelOfferDraft, created_at: DateTime<Utc>) -> Result<Self, RecordError> {
        let mut row = Self {
            id,
            title: draft.title,
            destination: draft.destination,
            description: draft.description,
            price: draft.price,
            duration_days: draft.duration_days,
            departure_date: draft.departure_date,
            return_date: draft.return_date,
            included: draft.included,
            image_url: draft.image_url,
            images: draft.images,
            is_active: draft.is_active,
            created_at,
        };
        gallery::normalize(&mut row);
        row.check()?;
        Ok(row)
    }

    async fn on_update(&mut self, patch: TravelOfferPatch, _ctx: &()) -> Result<(), RecordError> {
        apply_patch!(self, patch; title, destination, description, price, duration_days, departure_date,
            return_date, included, is_active);
        gallery::patch(self, patch.image_url, patch.images);
        self.check()
    }
}

impl Resource for TravelOffer {
    const LABEL: &'static str = "Offre de voyage";

    fn list_order(a: &Self, b: &Self) -> Ordering {
        newest_first!(a, b)
    }

    fn validate_draft(d: &TravelOfferDraft) -> Result<(), ValidationErrors> {
        Validator::new()
            .required("title", &d.title)
            .required("destination", &d.destination)
            .required("description", &d.description)
            .non_negative("price", d.price)
            .non_negative("duration_days", f64::from(d.duration_days))
            .finish()
    }

    fn validate_patch(p: &TravelOfferPatch) -> Result<(), ValidationErrors> {
        Validator::new()
            .required_opt("title", p.title.as_deref())
            .required_opt("destination", p.destination.as_deref())
            .required_opt("description", p.description.as_deref())
            .non_negative_opt("price", p.price)
            .non_negative_opt("duration_days", p.duration_days.map(f64::from))
            .finish()
    }
}

impl FormModel for TravelOffer {
    fn blank_draft() -> TravelOfferDraft {
        TravelOfferDraft::default()
    }

    fn to_draft(&self) -> TravelOfferDraft {
        let mut draft = draft_of!(TravelOfferDraft from self; title, destination, description, price,
            duration_days, departure_date, return_date, included, image_url, images, is_active);
        gallery::normalize(&mut draft);
        draft
    }

    fn patch_from_draft(draft: TravelOfferDraft) -> TravelOfferPatch {
        full_patch!(TravelOfferPatch from draft; title, destination, description, price, duration_days,
            departure_date, return_date, included, image_url, images, is_active)
    }

    fn attach_image(draft: &mut TravelOfferDraft, url: String) -> bool {
        gallery::add_image(draft, url);
        true
    }
}

impl Presentable for TravelOffer {
    const COLUMNS: &'static [&'static str] = &["Image", "Titre", "Destination", "Durée", "Départ", "Prix", "Statut"];

    fn to_row(&self, fmt: &Formatter) -> DisplayRow<u64> {
        let nights = match self.duration_days {
            1 => "1 jour".to_owned(),
            n => format!("{n} jours"),
        };
        DisplayRow::new(self.id)
            .thumbnail(self.image_url.as_deref())
            .text(&self.title)
            .text(&self.destination)
            .text(nights)
            .optional(self.departure_date.map(|d| fmt.date(d)).as_deref())
            .text(fmt.money(self.price))
            .badge(Badge::active(self.is_active))
    }
}
