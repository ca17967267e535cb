pub mod prelude;

pub mod cities;
pub mod event_links;
pub mod events;
pub mod speakers;
pub mod talk_links;
pub mod talk_speakers;
pub mod talks;
pub mod venues;
