//! Partners: the businesses that own activities, bons plans, promotions, ...
//!
//! Partners are the only entity keyed by a UUID. Their table is started first
//! and its client, the [`PartnerDirectory`], is handed to every table whose rows
//! reference a partner.

use super::error::{require, RecordError};
use crate::resource::{Resource, ValidationErrors, Validator};
use crate::ui::{Badge, DisplayRow, FormModel, Formatter, Presentable};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use table_store::{Record, TableClient};
use uuid::Uuid;

pub type PartnerId = Uuid;

/// Read access to the partner table, injected into partner-owned tables.
pub type PartnerDirectory = TableClient<Partner>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: PartnerId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
}

impl Default for PartnerDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: String::new(),
            logo_url: None,
            website: None,
            contact_email: None,
            phone: None,
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartnerPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub logo_url: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub contact_email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub is_active: Option<bool>,
}

/// Checks that a referenced partner exists. Rows without a partner pass.
pub async fn ensure_partner(
    directory: &PartnerDirectory,
    partner_id: Option<&PartnerId>,
) -> Result<(), RecordError> {
    let Some(id) = partner_id else {
        return Ok(());
    };
    match directory.get(*id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(RecordError::UnknownPartner(*id)),
        Err(e) => Err(RecordError::PartnerLookup(e.to_string())),
    }
}

#[async_trait]
impl Record for Partner {
    const TABLE: &'static str = "partners";
    type Id = PartnerId;
    type Draft = PartnerDraft;
    type Patch = PartnerPatch;
    type Context = ();
    type Error = RecordError;

    fn id(&self) -> &PartnerId {
        &self.id
    }

    fn from_draft(id: PartnerId, draft: PartnerDraft, created_at: DateTime<Utc>) -> Result<Self, RecordError> {
        require("name", &draft.name)?;
        Ok(Self {
            id,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            logo_url: draft.logo_url,
            website: draft.website,
            contact_email: draft.contact_email,
            phone: draft.phone,
            is_active: draft.is_active,
            created_at,
        })
    }

    async fn on_update(&mut self, patch: PartnerPatch, _ctx: &()) -> Result<(), RecordError> {
        apply_patch!(self, patch; name, description, category, logo_url, website, contact_email, phone, is_active);
        require("name", &self.name)
    }
}

impl Resource for Partner {
    const LABEL: &'static str = "Partenaire";

    fn list_order(a: &Self, b: &Self) -> Ordering {
        super::by_name(&a.name, &b.name).then_with(|| a.id.cmp(&b.id))
    }

    fn validate_draft(draft: &PartnerDraft) -> Result<(), ValidationErrors> {
        Validator::new().required("name", &draft.name).finish()
    }

    fn validate_patch(patch: &PartnerPatch) -> Result<(), ValidationErrors> {
        Validator::new()
            .required_opt("name", patch.name.as_deref())
            .finish()
    }
}

impl FormModel for Partner {
    fn blank_draft() -> PartnerDraft {
        PartnerDraft::default()
    }

    fn to_draft(&self) -> PartnerDraft {
        draft_of!(PartnerDraft from self; name, description, category, logo_url, website, contact_email, phone, is_active)
    }

    fn patch_from_draft(draft: PartnerDraft) -> PartnerPatch {
        full_patch!(PartnerPatch from draft; name, description, category, logo_url, website, contact_email, phone, is_active)
    }

    fn attach_image(draft: &mut PartnerDraft, url: String) -> bool {
        draft.logo_url = Some(url);
        true
    }
}

fn filled(text: Option<&str>) -> Option<&str> {
    text.filter(|text| !text.trim().is_empty())
}

impl Presentable for Partner {
    const COLUMNS: &'static [&'static str] = &["Logo", "Nom", "Catégorie", "Contact", "Statut"];

    fn to_row(&self, _fmt: &Formatter) -> DisplayRow<PartnerId> {
        DisplayRow::new(self.id)
            .thumbnail(self.logo_url.as_deref())
            .text(&self.name)
            .optional(Some(self.category.as_str()))
            .optional(filled(self.contact_email.as_deref()).or(filled(self.phone.as_deref())))
            .badge(Badge::active(self.is_active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use table_store::TableActor;

    fn draft(name: &str) -> PartnerDraft {
        PartnerDraft {
            name: name.into(),
            ..PartnerDraft::default()
        }
    }

    #[tokio::test]
    async fn test_ensure_partner() {
        let (table, directory) = TableActor::<Partner>::new(4, Uuid::new_v4);
        tokio::spawn(table.run(()));

        let partner = directory.insert(draft("Cap Soleil")).await.unwrap();
        assert!(ensure_partner(&directory, Some(&partner.id)).await.is_ok());
        assert!(ensure_partner(&directory, None).await.is_ok());

        let ghost = Uuid::new_v4();
        assert_eq!(
            ensure_partner(&directory, Some(&ghost)).await,
            Err(RecordError::UnknownPartner(ghost))
        );
    }

    #[tokio::test]
    async fn test_lookup_failure_is_reported() {
        let (table, directory) = TableActor::<Partner>::new(4, Uuid::new_v4);
        drop(table);

        let result = ensure_partner(&directory, Some(&Uuid::new_v4())).await;
        assert!(matches!(result, Err(RecordError::PartnerLookup(_))));
    }

    #[test]
    fn test_logo_upload_and_row() {
        let mut d = Partner::blank_draft();
        assert!(d.is_active);
        assert!(Partner::attach_image(&mut d, "https://cdn/logo.png".into()));

        let p = Partner::from_draft(Uuid::new_v4(), PartnerDraft { name: "Azur".into(), ..d }, Utc::now()).unwrap();
        let row = p.to_row(&Formatter::default());
        assert_eq!(row.cells.len(), Partner::COLUMNS.len());
        assert_eq!(row.label(0), Some("https://cdn/logo.png"));
        assert_eq!(row.label(3), Some("-"));
        assert_eq!(row.label(4), Some("Actif"));

        assert_eq!(
            Partner::from_draft(Uuid::new_v4(), draft(" "), Utc::now()),
            Err(RecordError::Missing("name"))
        );
    }

    #[test]
    fn test_contact_falls_back_to_phone_when_email_is_blank() {
        let p = Partner::from_draft(
            Uuid::new_v4(),
            PartnerDraft {
                contact_email: Some("  ".into()),
                phone: Some("04 93 00 00 00".into()),
                ..draft("Azur")
            },
            Utc::now(),
        )
        .unwrap();
        assert_eq!(p.to_row(&Formatter::default()).label(3), Some("04 93 00 00 00"));

        let reachable = Partner {
            contact_email: Some("contact@azur.fr".into()),
            ..p
        };
        assert_eq!(reachable.to_row(&Formatter::default()).label(3), Some("contact@azur.fr"));
    }
}
