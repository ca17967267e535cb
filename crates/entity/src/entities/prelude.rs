pub use super::cities::Entity as Cities;
pub use super::event_links::Entity as EventLinks;
pub use super::events::Entity as Events;
pub use super::speakers::Entity as Speakers;
pub use super::talk_links::Entity as TalkLinks;
pub use super::talk_speakers::Entity as TalkSpeakers;
pub use super::talks::Entity as Talks;
pub use super::venues::Entity as Venues;
