//! Business entities managed by the back-office.
//!
//! Every entity is a flat row implementing [`Record`](table_store::Record) (how the
//! data store builds, updates and checks it), [`Resource`](crate::resource::Resource)
//! (display ordering and shallow validation), [`FormModel`](crate::ui::FormModel)
//! (draft defaults and edit seeding) and [`Presentable`](crate::ui::Presentable)
//! (table columns).

/// Copies every `Some` field of a patch onto a row.
macro_rules! apply_patch {
    ($row:expr, $patch:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $row.$field = value;
            }
        )+
    };
}

/// Builds a patch setting every listed field from a draft.
macro_rules! full_patch {
    ($patch:ident from $draft:expr; $($field:ident),+ $(,)?) => {
        $patch {
            $( $field: Some($draft.$field), )+
        }
    };
}

/// Builds a draft by cloning the listed fields of a row.
macro_rules! draft_of {
    ($draft:ident from $row:expr; $($field:ident),+ $(,)?) => {
        $draft {
            $( $field: $row.$field.clone(), )+
        }
    };
}

/// Implements [`Gallery`](crate::gallery::Gallery) for a type with `image_url` and
/// `images` fields.
macro_rules! impl_gallery {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl crate::gallery::Gallery for $ty {
                fn gallery_parts(&mut self) -> (&mut Option<String>, &mut Vec<String>) {
                    (&mut self.image_url, &mut self.images)
                }
            }
        )+
    };
}

/// Implements [`Owned`](crate::resource::Owned) for a type with a `partner_id` field.
macro_rules! impl_owned {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl crate::resource::Owned for $ty {
                fn partner_id(&self) -> Option<&crate::model::PartnerId> {
                    self.partner_id.as_ref()
                }
            }
        )+
    };
}

/// Case-insensitive name order used by every alphabetical list.
pub(crate) fn by_name(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Newest first, ties broken by the higher id.
macro_rules! newest_first {
    ($a:expr, $b:expr) => {
        $b.created_at.cmp(&$a.created_at).then_with(|| $b.id.cmp(&$a.id))
    };
}

pub mod activity;
pub mod bon_plan;
pub mod car_rental;
pub mod concert;
pub mod error;
pub mod leisure;
pub mod medium;
pub mod newsletter;
pub mod nightlife;
pub mod partner;
pub mod promotion;
pub mod travel_offer;

pub use activity::*;
pub use bon_plan::*;
pub use car_rental::*;
pub use concert::*;
pub use error::RecordError;
pub use leisure::*;
pub use medium::*;
pub use newsletter::*;
pub use nightlife::*;
pub use partner::*;
pub use promotion::*;
pub use travel_offer::*;
