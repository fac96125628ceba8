//! Data models
//!
//! Wire-level document shapes for events, designs, templates and
//! organizations. All models serialize with camelCase names.

pub mod design;
pub mod event;
pub mod organization;
pub mod template;

pub use design::{
    DateMutable, DateRange, Design, DesignBody, LocationMutable, OrganizerMutable, TextMutable,
};
pub use event::{
    CalendarPatchRequest, DeleteOutcome, EventPatch, EventQuery, EventRecord, StartHour,
};
pub use organization::Organization;
pub use template::Template;
