//! Row presentation: entity → display cells.
//!
//! Everything here is pure. A [`Presentable`] entity turns itself into a
//! [`DisplayRow`] using a [`Formatter`] that carries the locale settings and the
//! date "today" is evaluated against (promotion windows, upcoming concerts).

use crate::config::Config;
use crate::resource::{ListStore, Resource};
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt::Write;

/// Locale settings for dates, prices and percentages.
#[derive(Debug, Clone, PartialEq)]
pub struct Formatter {
    currency: String,
    date_format: String,
    decimal_separator: char,
    /// `None` follows the wall clock.
    today: Option<NaiveDate>,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Formatter {
    pub fn new(currency: impl Into<String>, date_format: impl Into<String>, decimal_separator: char) -> Self {
        Self {
            currency: currency.into(),
            date_format: date_format.into(),
            decimal_separator,
            today: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.currency, &config.date_format, config.decimal_separator)
    }

    /// Pins the date used for derived availability.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The pinned date, or the current UTC date read at each call.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Formats a date with the configured pattern. An unusable pattern falls back
    /// to ISO 8601 rather than failing.
    pub fn date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        match write!(out, "{}", date.format(&self.date_format)) {
            Ok(()) => out,
            Err(_) => date.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn timestamp(&self, at: DateTime<Utc>) -> String {
        self.date(at.date_naive())
    }

    /// `45` → `"45"`, `12.5` → `"12,50"`; whole amounts drop the decimals.
    fn amount(&self, value: f64) -> String {
        let cents = (value * 100.0).round() as i64;
        let sign = if cents < 0 { "-" } else { "" };
        let cents = cents.abs();
        if cents % 100 == 0 {
            format!("{sign}{}", cents / 100)
        } else {
            format!("{sign}{}{}{:02}", cents / 100, self.decimal_separator, cents % 100)
        }
    }

    /// `45.0` → `"45 €"`, `12.5` → `"12,50 €"`.
    pub fn money(&self, value: f64) -> String {
        format!("{} {}", self.amount(value), self.currency)
    }

    /// Plain number with one decimal when needed: `4.5` → `"4,5"`, `5.0` → `"5"`.
    pub fn number(&self, value: f64) -> String {
        let tenths = (value * 10.0).round() as i64;
        if tenths % 10 == 0 {
            format!("{}", tenths / 10)
        } else {
            let sign = if tenths < 0 { "-" } else { "" };
            let tenths = tenths.abs();
            format!("{sign}{}{}{}", tenths / 10, self.decimal_separator, tenths % 10)
        }
    }

    pub fn percent(&self, value: f64) -> String {
        format!("{} %", self.number(value))
    }

    pub fn rating(&self, value: f64) -> String {
        format!("{}/5", self.number(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Neutral,
    Warning,
    Negative,
}

/// A short coloured label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
}

impl Badge {
    pub fn new(label: impl Into<String>, tone: Tone) -> Self {
        Self {
            label: label.into(),
            tone,
        }
    }

    /// The two-state active flag.
    pub fn active(active: bool) -> Self {
        if active {
            Self::new("Actif", Tone::Positive)
        } else {
            Self::new("Inactif", Tone::Neutral)
        }
    }

    pub fn available(available: bool) -> Self {
        if available {
            Self::new("Disponible", Tone::Positive)
        } else {
            Self::new("Indisponible", Tone::Negative)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Badge(Badge),
    /// Thumbnail of an image URL.
    Image(String),
    /// Shown where a row has no image.
    Placeholder,
}

/// One rendered table row, keyed by the entity id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow<Id> {
    pub id: Id,
    pub cells: Vec<Cell>,
}

impl<Id> DisplayRow<Id> {
    pub fn new(id: Id) -> Self {
        Self { id, cells: Vec::new() }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.cells.push(Cell::Text(text.into()));
        self
    }

    /// Text, or `-` when absent or blank.
    pub fn optional(self, text: Option<&str>) -> Self {
        match text.filter(|t| !t.trim().is_empty()) {
            Some(text) => self.text(text),
            None => self.text("-"),
        }
    }

    pub fn badge(mut self, badge: Badge) -> Self {
        self.cells.push(Cell::Badge(badge));
        self
    }

    pub fn thumbnail(mut self, url: Option<&str>) -> Self {
        self.cells.push(match url.filter(|u| !u.trim().is_empty()) {
            Some(url) => Cell::Image(url.to_owned()),
            None => Cell::Placeholder,
        });
        self
    }

    /// Text of the cell at `index`, badges included.
    pub fn label(&self, index: usize) -> Option<&str> {
        match self.cells.get(index)? {
            Cell::Text(text) => Some(text),
            Cell::Badge(badge) => Some(&badge.label),
            Cell::Image(url) => Some(url),
            Cell::Placeholder => None,
        }
    }

    pub fn badges(&self) -> impl Iterator<Item = &Badge> {
        self.cells.iter().filter_map(|cell| match cell {
            Cell::Badge(badge) => Some(badge),
            _ => None,
        })
    }
}

/// An entity that knows how to render itself as a table row.
pub trait Presentable: Resource {
    /// Column headers, one per cell of [`Presentable::to_row`].
    const COLUMNS: &'static [&'static str];

    /// Never mutates the entity.
    fn to_row(&self, fmt: &Formatter) -> DisplayRow<Self::Id>;
}

/// What a list view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView<Id> {
    Loading,
    /// The read succeeded (or failed) and there is nothing to show.
    Empty,
    Rows(Vec<DisplayRow<Id>>),
}

impl<Id> ListView<Id> {
    pub fn render<T>(store: &ListStore<T>, fmt: &Formatter) -> Self
    where
        T: Presentable<Id = Id>,
    {
        if store.is_loading() {
            ListView::Loading
        } else if store.is_empty() {
            ListView::Empty
        } else {
            ListView::Rows(store.read().iter().map(|row| row.to_row(fmt)).collect())
        }
    }

    pub fn rows(&self) -> &[DisplayRow<Id>] {
        match self {
            ListView::Rows(rows) => rows,
            ListView::Loading | ListView::Empty => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt() -> Formatter {
        Formatter::default().with_today(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap())
    }

    #[test]
    fn test_money_drops_cents_on_whole_amounts() {
        let fmt = fmt();
        assert_eq!(fmt.money(45.0), "45 €");
        assert_eq!(fmt.money(12.5), "12,50 €");
        assert_eq!(fmt.money(0.05), "0,05 €");
        assert_eq!(fmt.money(-0.5), "-0,50 €");
        assert_eq!(Formatter::new("EUR", "%d/%m/%Y", '.').money(9.99), "9.99 EUR");
    }

    #[test]
    fn test_numbers_and_dates() {
        let fmt = fmt();
        assert_eq!(fmt.date(NaiveDate::from_ymd_opt(2026, 7, 4).unwrap()), "04/07/2026");
        assert_eq!(fmt.rating(4.5), "4,5/5");
        assert_eq!(fmt.rating(5.0), "5/5");
        assert_eq!(fmt.percent(10.0), "10 %");
        assert_eq!(fmt.today(), NaiveDate::from_ymd_opt(2026, 3, 15).unwrap());
    }

    #[test]
    fn test_unpinned_today_follows_the_clock() {
        let before = Utc::now().date_naive();
        let today = Formatter::default().today();
        let after = Utc::now().date_naive();
        assert!(before <= today && today <= after);
        assert_eq!(Formatter::default(), Formatter::default());
    }

    #[test]
    fn test_bad_date_pattern_falls_back_to_iso() {
        let fmt = Formatter::new("€", "%Q", ',');
        assert_eq!(fmt.date(NaiveDate::from_ymd_opt(2026, 7, 4).unwrap()), "2026-07-04");
    }

    #[test]
    fn test_row_builder() {
        let row = DisplayRow::new(1_u64)
            .thumbnail(None)
            .thumbnail(Some("https://cdn/x.png"))
            .optional(None)
            .optional(Some("Nice"))
            .badge(Badge::active(false));

        assert_eq!(row.cells[0], Cell::Placeholder);
        assert_eq!(row.cells[1], Cell::Image("https://cdn/x.png".into()));
        assert_eq!(row.label(2), Some("-"));
        assert_eq!(row.label(3), Some("Nice"));
        assert_eq!(row.badges().next().map(|b| b.label.as_str()), Some("Inactif"));
    }
}
