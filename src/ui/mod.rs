//! View layer: what a back-office screen holds and shows.

pub mod confirm;
pub mod display;
pub mod form;
pub mod notify;
pub mod page;

pub use confirm::DeleteConfirmation;
pub use display::{Badge, Cell, DisplayRow, Formatter, ListView, Presentable, Tone};
pub use form::{FormMode, FormModel, FormState};
pub use notify::{Level, Notification, Toasts, TOAST_CAPACITY};
pub use page::ResourcePage;
