use super::error::{require, RecordError};
use super::partner::{ensure_partner, PartnerDirectory, PartnerId};
use crate::resource::{Resource, ValidationErrors, Validator};
use crate::ui::{Badge, DisplayRow, FormModel, Formatter, Presentable, Tone};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use table_store::Record;

/// A "bon plan": a short-lived deal published by a partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonPlan {
    pub id: u64,
    pub title: String,
    pub description: String,
    /// Free text, e.g. "-20 %" or "2 pour 1".
    pub discount: Option<String>,
    pub image_url: Option<String>,
    pub valid_until: Option<NaiveDate>,
    pub is_active: bool,
    pub partner_id: Option<PartnerId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonPlanDraft {
    pub title: String,
    pub description: String,
    pub discount: Option<String>,
    pub image_url: Option<String>,
    pub valid_until: Option<NaiveDate>,
    pub is_active: bool,
    pub partner_id: Option<PartnerId>,
}

impl Default for BonPlanDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            discount: None,
            image_url: None,
            valid_until: None,
            is_active: true,
            partner_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BonPlanPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub discount: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
    pub valid_until: Option<Option<NaiveDate>>,
    pub is_active: Option<bool>,
    pub partner_id: Option<Option<PartnerId>>,
}

impl_owned!(BonPlan);

#[async_trait]
impl Record for BonPlan {
    const TABLE: &'static str = "bons_plans";
    type Id = u64;
    type Draft = BonPlanDraft;
    type Patch = BonPlanPatch;
    type Context = PartnerDirectory;
    type Error = RecordError;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn from_draft(id: u64, draft: BonPlanDraft, created_at: DateTime<Utc>) -> Result<Self, RecordError> {
        require("title", &draft.title)?;
        Ok(Self {
            id,
            title: draft.title,
            description: draft.description,
            discount: draft.discount,
            image_url: draft.image_url,
            valid_until: draft.valid_until,
            is_active: draft.is_active,
            partner_id: draft.partner_id,
            created_at,
        })
    }

    async fn on_insert(&mut self, partners: &PartnerDirectory) -> Result<(), RecordError> {
        ensure_partner(partners, self.partner_id.as_ref()).await
    }

    async fn on_update(&mut self, patch: BonPlanPatch, partners: &PartnerDirectory) -> Result<(), RecordError> {
        let repointed = patch.partner_id.is_some();
        apply_patch!(self, patch; title, description, discount, image_url, valid_until, is_active, partner_id);
        require("title", &self.title)?;
        if repointed {
            ensure_partner(partners, self.partner_id.as_ref()).await?;
        }
        Ok(())
    }
}

impl Resource for BonPlan {
    const LABEL: &'static str = "Bon plan";

    fn list_order(a: &Self, b: &Self) -> Ordering {
        newest_first!(a, b)
    }

    fn validate_draft(d: &BonPlanDraft) -> Result<(), ValidationErrors> {
        Validator::new()
            .required("title", &d.title)
            .required("description", &d.description)
            .finish()
    }

    fn validate_patch(p: &BonPlanPatch) -> Result<(), ValidationErrors> {
        Validator::new()
            .required_opt("title", p.title.as_deref())
            .required_opt("description", p.description.as_deref())
            .finish()
    }
}

impl FormModel for BonPlan {
    fn blank_draft() -> BonPlanDraft {
        BonPlanDraft::default()
    }

    fn to_draft(&self) -> BonPlanDraft {
        draft_of!(BonPlanDraft from self; title, description, discount, image_url, valid_until, is_active, partner_id)
    }

    fn patch_from_draft(draft: BonPlanDraft) -> BonPlanPatch {
        full_patch!(BonPlanPatch from draft; title, description, discount, image_url, valid_until, is_active, partner_id)
    }

    fn attach_image(draft: &mut BonPlanDraft, url: String) -> bool {
        draft.image_url = Some(url);
        true
    }
}

impl Presentable for BonPlan {
    const COLUMNS: &'static [&'static str] = &["Image", "Titre", "Réduction", "Valable jusqu'au", "Statut"];

    fn to_row(&self, fmt: &Formatter) -> DisplayRow<u64> {
        let expired = self.valid_until.is_some_and(|until| until < fmt.today());
        let status = if self.is_active && expired {
            Badge::new("Expiré", Tone::Warning)
        } else {
            Badge::active(self.is_active)
        };
        DisplayRow::new(self.id)
            .thumbnail(self.image_url.as_deref())
            .text(&self.title)
            .optional(self.discount.as_deref())
            .optional(self.valid_until.map(|d| fmt.date(d)).as_deref())
            .badge(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_deal_is_flagged() {
        let fmt = Formatter::default().with_today(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        let mut plan = BonPlan::from_draft(
            1,
            BonPlanDraft {
                title: "Happy Hour".into(),
                description: "2-for-1".into(),
                valid_until: NaiveDate::from_ymd_opt(2026, 5, 31),
                ..BonPlanDraft::default()
            },
            Utc::now(),
        )
        .unwrap();

        let row = plan.to_row(&fmt);
        assert_eq!(row.label(3), Some("31/05/2026"));
        assert_eq!(row.label(4), Some("Expiré"));

        plan.is_active = false;
        assert_eq!(plan.to_row(&fmt).label(4), Some("Inactif"));
    }
}
