//! Rental cars offered by partner agencies.

use super::error::{non_negative, require, within, RecordError};
use super::partner::{ensure_partner, PartnerDirectory, PartnerId};
use crate::gallery;
use crate::resource::{Resource, ValidationErrors, Validator};
use crate::ui::{Badge, DisplayRow, FormModel, Formatter, Presentable};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use table_store::Record;

const MAX_SEATS: i32 = 9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarRental {
    pub id: u64,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub category: String,
    pub description: String,
    pub location: String,
    pub price_per_day: f64,
    pub seats: i32,
    pub transmission: String,
    pub fuel_type: String,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub is_available: bool,
    pub partner_id: Option<PartnerId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarRentalDraft {
    pub name: String,
    pub brand: String,
    pub model: String,
    pub category: String,
    pub description: String,
    pub location: String,
    pub price_per_day: f64,
    pub seats: i32,
    pub transmission: String,
    pub fuel_type: String,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub is_available: bool,
    pub partner_id: Option<PartnerId>,
}

impl Default for CarRentalDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            brand: String::new(),
            model: String::new(),
            category: "Citadine".to_owned(),
            description: String::new(),
            location: String::new(),
            price_per_day: 0.0,
            seats: 5,
            transmission: "Manuelle".to_owned(),
            fuel_type: "Essence".to_owned(),
            image_url: None,
            images: Vec::new(),
            is_available: true,
            partner_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarRentalPatch {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub price_per_day: Option<f64>,
    pub seats: Option<i32>,
    pub transmission: Option<String>,
    pub fuel_type: Option<String>,
    pub image_url: Option<Option<String>>,
    pub images: Option<Vec<String>>,
    pub is_available: Option<bool>,
    pub partner_id: Option<Option<PartnerId>>,
}

impl_gallery!(CarRental, CarRentalDraft);
impl_owned!(CarRental);

impl CarRental {
    fn check(&self) -> Result<(), RecordError> {
        require("name", &self.name)?;
        require("brand", &self.brand)?;
        non_negative("price_per_day", self.price_per_day)?;
        within("seats", f64::from(self.seats), 1.0, f64::from(MAX_SEATS))
    }
}

#[async_trait]
impl Record for CarRental {
    const TABLE: &'static str = "car_rentals";
    type Id = u64;
    type Draft = CarRentalDraft;
    type Patch = CarRentalPatch;
    type Context = PartnerDirectory;
    type Error = RecordError;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn from_draft(id: u64, draft: CarRentalDraft, created_at: DateTime<Utc>) -> Result<Self, RecordError> {
        let mut row = Self {
            id,
            name: draft.name,
            brand: draft.brand,
            model: draft.model,
            category: draft.category,
            description: draft.description,
            location: draft.location,
            price_per_day: draft.price_per_day,
            seats: draft.seats,
            transmission: draft.transmission,
            fuel_type: draft.fuel_type,
            image_url: draft.image_url,
            images: draft.images,
            is_available: draft.is_available,
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

    async fn on_update(&mut self, patch: CarRentalPatch, partners: &PartnerDirectory) -> Result<(), RecordError> {
        let repointed = patch.partner_id.is_some();
        apply_patch!(self, patch; name, brand, model, category, description, location, price_per_day,
            seats, transmission, fuel_type, is_available, partner_id);
        gallery::patch(self, patch.image_url, patch.images);
        self.check()?;
        if repointed {
            ensure_partner(partners, self.partner_id.as_ref()).await?;
        }
        Ok(())
    }
}

impl Resource for CarRental {
    const LABEL: &'static str = "Véhicule";

    fn list_order(a: &Self, b: &Self) -> Ordering {
        super::by_name(&a.name, &b.name).then_with(|| a.id.cmp(&b.id))
    }

    fn validate_draft(d: &CarRentalDraft) -> Result<(), ValidationErrors> {
        Validator::new()
            .required("name", &d.name)
            .required("brand", &d.brand)
            .required("model", &d.model)
            .required("location", &d.location)
            .non_negative("price_per_day", d.price_per_day)
            .non_negative("seats", f64::from(d.seats))
            .finish()
    }

    fn validate_patch(p: &CarRentalPatch) -> Result<(), ValidationErrors> {
        Validator::new()
            .required_opt("name", p.name.as_deref())
            .required_opt("brand", p.brand.as_deref())
            .required_opt("model", p.model.as_deref())
            .required_opt("location", p.location.as_deref())
            .non_negative_opt("price_per_day", p.price_per_day)
            .non_negative_opt("seats", p.seats.map(f64::from))
            .finish()
    }
}

impl FormModel for CarRental {
    fn blank_draft() -> CarRentalDraft {
        CarRentalDraft::default()
    }

    fn to_draft(&self) -> CarRentalDraft {
        let mut draft = draft_of!(CarRentalDraft from self; name, brand, model, category, description, location,
            price_per_day, seats, transmission, fuel_type, image_url, images, is_available, partner_id);
        gallery::normalize(&mut draft);
        draft
    }

    fn patch_from_draft(draft: CarRentalDraft) -> CarRentalPatch {
        full_patch!(CarRentalPatch from draft; name, brand, model, category, description, location,
            price_per_day, seats, transmission, fuel_type, image_url, images, is_available, partner_id)
    }

    fn attach_image(draft: &mut CarRentalDraft, url: String) -> bool {
        gallery::add_image(draft, url);
        true
    }
}

impl Presentable for CarRental {
    const COLUMNS: &'static [&'static str] = &["Image", "Véhicule", "Places", "Boîte", "Prix / jour", "Disponibilité"];

    fn to_row(&self, fmt: &Formatter) -> DisplayRow<u64> {
        DisplayRow::new(self.id)
            .thumbnail(self.image_url.as_deref())
            .text(format!("{} ({} {})", self.name, self.brand, self.model))
            .text(self.seats.to_string())
            .text(&self.transmission)
            .text(fmt.money(self.price_per_day))
            .badge(Badge::available(self.is_available))
    }
}
