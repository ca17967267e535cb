//! The sea-orm entities of the meetup database: events, the cities and venues hosting them,
//! the talks given there, their speakers, and the links attached to events and talks.
//!
//! Besides the table definitions, the models carry the derived read-only accessors used
//! by the presentation layer, like [`events::Model::title`] or [`talks::youtube_id`].

mod entities;
pub use entities::*;

pub mod slug;
pub mod types;

pub use slug::slugify;
