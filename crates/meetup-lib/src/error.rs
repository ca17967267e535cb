//! A module containing the [`MeetupError`] enum, which contains the errors of this crate.

use sea_orm::TransactionError;

use crate::ordering::OrderingError;

/// Represents any type of error that could happen when using this crate.
#[derive(thiserror::Error, Debug)]
#[rustfmt::skip]
pub enum MeetupError {
    // --------
    // --- Storage errors
    // --------

    /// An error from the database, like a violated unique or foreign key constraint.
    #[error(transparent)]
    DbError(#[from] sea_orm::DbErr),

    // --------
    // --- Logical errors
    // --------

    /// An invalid change of an ordered collection.
    #[error(transparent)]
    Ordering(#[from] OrderingError),
    /// The city with the provided slug was not found.
    #[error("city with slug `{0}` not found in database")]
    CityNotFound(
        /// The city slug.
        String,
    ),
    /// The venue with the provided slug was not found.
    #[error("venue with slug `{0}` not found in database")]
    VenueNotFound(
        /// The venue slug.
        String,
    ),
    /// The event with the provided ID was not found.
    #[error("event with id {0} not found in database")]
    EventNotFound(
        /// The event ID.
        i32,
    ),
    /// The talk with the provided ID was not found.
    #[error("talk with id {0} not found in database")]
    TalkNotFound(
        /// The talk ID.
        i32,
    ),
    /// The speaker with the provided ID was not found.
    #[error("speaker with id {0} not found in database")]
    SpeakerNotFound(
        /// The speaker ID.
        i32,
    ),
    /// The talk isn't given at the provided event.
    #[error("talk {0} is not given at event {1}")]
    TalkNotInEvent(
        /// The talk ID.
        i32,
        /// The event ID.
        i32,
    ),
    /// The talk is already given at an event.
    #[error("talk {0} is already given at event {1}")]
    TalkAlreadyAssigned(
        /// The talk ID.
        i32,
        /// The ID of the event the talk is given at.
        i32,
    ),
    /// The speaker isn't a speaker of the provided talk.
    #[error("speaker {1} is not a speaker of talk {0}")]
    SpeakerNotInTalk(
        /// The talk ID.
        i32,
        /// The speaker ID.
        i32,
    ),
    /// The event doesn't link the provided URL.
    #[error("event {0} has no link to `{1}`")]
    EventLinkNotFound(
        /// The event ID.
        i32,
        /// The URL.
        String,
    ),
    /// The talk doesn't link the provided URL.
    #[error("talk {0} has no link to `{1}`")]
    TalkLinkNotFound(
        /// The talk ID.
        i32,
        /// The URL.
        String,
    ),
    /// The provided year, month or day doesn't form a valid date.
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

impl<E> From<TransactionError<E>> for MeetupError
where
    MeetupError: From<E>,
{
    fn from(value: TransactionError<E>) -> Self {
        match value {
            TransactionError::Connection(db_err) => From::from(db_err),
            TransactionError::Transaction(e) => From::from(e),
        }
    }
}

/// Represents the result of a computation that could return a [`MeetupError`].
pub type MeetupResult<T = ()> = Result<T, MeetupError>;
