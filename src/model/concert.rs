use super::error::{non_negative, require, within, RecordError};
use crate::gallery;
use crate::resource::{Resource, ValidationErrors, Validator};
use crate::ui::{Badge, DisplayRow, FormModel, Formatter, Presentable, Tone};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use table_store::Record;

pub const DEFAULT_CONCERT_RATING: f64 = 4.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concert {
    pub id: u64,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub description: String,
    pub venue: String,
    pub location: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub price: f64,
    pub rating: f64,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcertDraft {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub description: String,
    pub venue: String,
    pub location: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub price: f64,
    pub rating: f64,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub is_active: bool,
}

impl Default for ConcertDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            artist: String::new(),
            genre: String::new(),
            description: String::new(),
            venue: String::new(),
            location: String::new(),
            date: Utc::now().date_naive(),
            time: None,
            price: 0.0,
            rating: DEFAULT_CONCERT_RATING,
            image_url: None,
            images: Vec::new(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConcertPatch {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub location: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<Option<NaiveTime>>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub image_url: Option<Option<String>>,
    pub images: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl_gallery!(Concert, ConcertDraft);

impl Concert {
    fn check(&self) -> Result<(), RecordError> {
        require("title", &self.title)?;
        require("artist", &self.artist)?;
        non_negative("price", self.price)?;
        within("rating", self.rating, 0.0, 5.0)
    }
}

#[async_trait]
impl Record for Concert {
    const TABLE: &'static str = "concerts";
    type Id = u64;
    type Draft = ConcertDraft;
    type Patch = ConcertPatch;
    type Context = ();
    type Error = RecordError;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn from_draft(id: u64, draft: ConcertDraft, created_at: DateTime<Utc>) -> Result<Self, RecordError> {
        let mut row = Self {
            id,
            title: draft.title,
            artist: draft.artist,
            genre: draft.genre,
            description: draft.description,
            venue: draft.venue,
            location: draft.location,
            date: draft.date,
            time: draft.time,
            price: draft.price,
            rating: draft.rating,
            image_url: draft.image_url,
            images: draft.images,
            is_active: draft.is_active,
            created_at,
        };
        gallery::normalize(&mut row);
        row.check()?;
        Ok(row)
    }

    async fn on_update(&mut self, patch: ConcertPatch, _ctx: &()) -> Result<(), RecordError> {
        apply_patch!(self, patch; title, artist, genre, description, venue, location, date, time, price,
            rating, is_active);
        gallery::patch(self, patch.image_url, patch.images);
        self.check()
    }
}

impl Resource for Concert {
    const LABEL: &'static str = "Concert";

    /// Soonest first. Concerts without a time sort after timed ones on the same day.
    fn list_order(a: &Self, b: &Self) -> Ordering {
        a.date
            .cmp(&b.date)
            .then_with(|| match (a.time, b.time) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| a.id.cmp(&b.id))
    }

    fn validate_draft(d: &ConcertDraft) -> Result<(), ValidationErrors> {
        Validator::new()
            .required("title", &d.title)
            .required("artist", &d.artist)
            .required("venue", &d.venue)
            .non_negative("price", d.price)
            .non_negative("rating", d.rating)
            .finish()
    }

    fn validate_patch(p: &ConcertPatch) -> Result<(), ValidationErrors> {
        Validator::new()
            .required_opt("title", p.title.as_deref())
            .required_opt("artist", p.artist.as_deref())
            .required_opt("venue", p.venue.as_deref())
            .non_negative_opt("price", p.price)
            .non_negative_opt("rating", p.rating)
            .finish()
    }
}

impl FormModel for Concert {
    fn blank_draft() -> ConcertDraft {
        ConcertDraft::default()
    }

    fn to_draft(&self) -> ConcertDraft {
        let mut draft = draft_of!(ConcertDraft from self; title, artist, genre, description, venue, location,
            date, time, price, rating, image_url, images, is_active);
        gallery::normalize(&mut draft);
        draft
    }

    fn patch_from_draft(draft: ConcertDraft) -> ConcertPatch {
        full_patch!(ConcertPatch from draft; title, artist, genre, description, venue, location, date, time,
            price, rating, image_url, images, is_active)
    }

    fn attach_image(draft: &mut ConcertDraft, url: String) -> bool {
        gallery::add_image(draft, url);
        true
    }
}

impl Presentable for Concert {
    const COLUMNS: &'static [&'static str] = &["Affiche", "Concert", "Lieu", "Date", "Prix", "Note", "Statut"];

    fn to_row(&self, fmt: &Formatter) -> DisplayRow<u64> {
        let date = match self.time {
            Some(time) => format!("{} {}", fmt.date(self.date), time.format("%H:%M")),
            None => fmt.date(self.date),
        };
        let status = if self.is_active && self.date < fmt.today() {
            Badge::new("Passé", Tone::Neutral)
        } else {
            Badge::active(self.is_active)
        };
        DisplayRow::new(self.id)
            .thumbnail(self.image_url.as_deref())
            .text(format!("{} - {}", self.artist, self.title))
            .text(format!("{}, {}", self.venue, self.location))
            .text(date)
            .text(fmt.money(self.price))
            .text(fmt.rating(self.rating))
            .badge(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concert(id: u64, day: u32, time: Option<(u32, u32)>) -> Concert {
        let draft = ConcertDraft {
            title: "Live".into(),
            artist: "Nova".into(),
            venue: "Zénith".into(),
            location: "Paris".into(),
            date: NaiveDate::from_ymd_opt(2026, 7, day).unwrap(),
            time: time.and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0)),
            ..ConcertDraft::default()
        };
        Concert::from_draft(id, draft, Utc::now()).unwrap()
    }

    #[test]
    fn test_default_rating() {
        assert_eq!(Concert::blank_draft().rating, 4.5);
        assert!(Concert::blank_draft().is_active);
    }

    #[test]
    fn test_soonest_first() {
        let mut rows = vec![
            concert(1, 20, None),
            concert(2, 10, Some((21, 0))),
            concert(3, 10, Some((18, 30))),
            concert(4, 10, None),
        ];
        rows.sort_by(Concert::list_order);
        let ids: Vec<_> = rows.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 2, 4, 1]);
    }

    #[test]
    fn test_row() {
        let fmt = Formatter::default().with_today(NaiveDate::from_ymd_opt(2026, 7, 15).unwrap());
        let past = concert(1, 10, Some((20, 30))).to_row(&fmt);
        assert_eq!(past.label(3), Some("10/07/2026 20:30"));
        assert_eq!(past.label(5), Some("4,5/5"));
        assert_eq!(past.label(6), Some("Passé"));
        assert_eq!(concert(2, 20, None).to_row(&fmt).label(6), Some("Actif"));
    }
}
