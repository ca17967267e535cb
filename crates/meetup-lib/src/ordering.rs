//! Ordered child collections.
//!
//! The talks of an event, the links of an event or a talk and the speakers of a talk are
//! stored with an index column. An [`OrderingList`] holds the members of such a collection
//! and renumbers them after every mutation, so that the index of each member always equals
//! its offset in the list. Once mutated, [`save_positions`] writes back the members whose
//! index changed.

use entity::{event_links, talk_links, talk_speakers, talks};
use sea_orm::{
    ColumnTrait as _, ConnectionTrait, DbErr, EntityTrait, QueryFilter as _, UpdateMany,
    prelude::Expr,
};

/// A member of an ordered collection.
pub trait Ordered {
    /// The entity of the members.
    type Entity: EntityTrait;

    /// Returns the stored index of the member.
    fn position(&self) -> Option<i32>;

    /// Sets the index of the member.
    fn set_position(&mut self, position: i32);

    /// Returns the statement updating the stored index of this member to its current value.
    fn position_update(&self) -> UpdateMany<Self::Entity>;
}

/// The error emitted when mutating an [`OrderingList`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OrderingError {
    /// The provided position is outside of the list.
    #[error("position {position} is out of range for a collection of {len} members")]
    OutOfRange {
        /// The requested position.
        position: usize,
        /// The length of the list.
        len: usize,
    },
    /// The new order doesn't list every member exactly once.
    #[error("the new order must list every member of the collection exactly once")]
    NotAPermutation,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    item: T,
    stored: Option<i32>,
}

/// A list of ordered members, keeping their index equal to their position.
#[derive(Debug, Clone)]
pub struct OrderingList<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for OrderingList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Ordered> OrderingList<T> {
    /// Builds the list from the members as stored in the database.
    ///
    /// The members are sorted by their stored index, those without any going last in their
    /// current order. They are renumbered right away, so gaps in the stored indexes show up
    /// in [`changed()`](Self::changed).
    pub fn from_stored(mut items: Vec<T>) -> Self {
        sort_stored(&mut items);
        let entries = items
            .into_iter()
            .map(|item| Entry {
                stored: item.position(),
                item,
            })
            .collect();
        let mut list = Self { entries };
        list.renumber();
        list
    }

    fn renumber(&mut self) {
        for (position, entry) in self.entries.iter_mut().enumerate() {
            entry.item.set_position(position as _);
        }
    }

    fn check_position(&self, position: usize, len: usize) -> Result<(), OrderingError> {
        if position < len {
            Ok(())
        } else {
            Err(OrderingError::OutOfRange {
                position,
                len: self.entries.len(),
            })
        }
    }

    /// The amount of members in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the list has no member.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the members, in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|entry| &entry.item)
    }

    /// Returns the position of the first member matching the predicate.
    pub fn position_of<F>(&self, mut predicate: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.entries.iter().position(|entry| predicate(&entry.item))
    }

    /// Appends a member at the end of the list, and returns its position.
    pub fn push(&mut self, item: T) -> usize {
        let position = self.entries.len();
        self.entries.push(Entry {
            stored: item.position(),
            item,
        });
        self.renumber();
        position
    }

    /// Inserts a member at the provided position, shifting the following ones.
    ///
    /// The position can be equal to the length of the list, which appends the member.
    pub fn insert(&mut self, position: usize, item: T) -> Result<(), OrderingError> {
        self.check_position(position, self.entries.len() + 1)?;
        self.entries.insert(
            position,
            Entry {
                stored: item.position(),
                item,
            },
        );
        self.renumber();
        Ok(())
    }

    /// Removes the member at the provided position, and returns it.
    pub fn remove(&mut self, position: usize) -> Result<T, OrderingError> {
        self.check_position(position, self.entries.len())?;
        let entry = self.entries.remove(position);
        self.renumber();
        Ok(entry.item)
    }

    /// Moves the member at the `from` position to the `to` position.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), OrderingError> {
        self.check_position(from, self.entries.len())?;
        self.check_position(to, self.entries.len())?;
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        self.renumber();
        Ok(())
    }

    /// Reorders the whole list, following the order of the provided keys.
    ///
    /// The keys must identify every member of the list exactly once.
    pub fn reorder<K, F>(&mut self, keys: &[K], mut key: F) -> Result<(), OrderingError>
    where
        K: PartialEq,
        F: FnMut(&T) -> K,
    {
        if keys.len() != self.entries.len() {
            return Err(OrderingError::NotAPermutation);
        }

        let mut remaining: Vec<Option<Entry<T>>> =
            std::mem::take(&mut self.entries).into_iter().map(Some).collect();
        let mut reordered = Vec::with_capacity(remaining.len());

        for k in keys {
            let found = remaining
                .iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|entry| key(&entry.item) == *k))
                .and_then(Option::take);
            match found {
                Some(entry) => reordered.push(entry),
                None => {
                    // Put everything back as it was.
                    self.entries = reordered
                        .into_iter()
                        .chain(remaining.into_iter().flatten())
                        .collect();
                    self.entries.sort_by_key(|entry| entry.item.position());
                    return Err(OrderingError::NotAPermutation);
                }
            }
        }

        self.entries = reordered;
        self.renumber();
        Ok(())
    }

    /// Returns the members whose index differs from the stored one.
    pub fn changed(&self) -> impl Iterator<Item = &T> {
        self.entries
            .iter()
            .filter(|entry| entry.stored != entry.item.position())
            .map(|entry| &entry.item)
    }

    /// Returns the members of the list, in order.
    pub fn into_vec(self) -> Vec<T> {
        self.entries.into_iter().map(|entry| entry.item).collect()
    }
}

/// Sorts the members by their stored index, those without any going last in their current
/// order.
///
/// Unlike [`OrderingList::from_stored`], the members keep their index as stored.
pub fn sort_stored<T: Ordered>(items: &mut [T]) {
    items.sort_by_key(|item| match item.position() {
        Some(position) => (false, position),
        None => (true, 0),
    });
}

/// Writes the index of the members of the list that changed since they were loaded.
///
/// Returns the amount of updated rows.
pub async fn save_positions<C, T>(conn: &C, list: &OrderingList<T>) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
    T: Ordered,
{
    let mut updated = 0;
    for item in list.changed() {
        updated += item.position_update().exec(conn).await?.rows_affected;
    }
    Ok(updated)
}

impl Ordered for talks::Model {
    type Entity = talks::Entity;

    fn position(&self) -> Option<i32> {
        Some(self.index)
    }

    fn set_position(&mut self, position: i32) {
        self.index = position;
    }

    fn position_update(&self) -> UpdateMany<Self::Entity> {
        talks::Entity::update_many()
            .col_expr(talks::Column::Index, Expr::value(self.index))
            .filter(talks::Column::Id.eq(self.id))
    }
}

impl Ordered for event_links::Model {
    type Entity = event_links::Entity;

    fn position(&self) -> Option<i32> {
        self.index
    }

    fn set_position(&mut self, position: i32) {
        self.index = Some(position);
    }

    fn position_update(&self) -> UpdateMany<Self::Entity> {
        event_links::Entity::update_many()
            .col_expr(event_links::Column::Index, Expr::value(self.index))
            .filter(event_links::Column::EventId.eq(self.event_id))
            .filter(event_links::Column::Url.eq(self.url.as_str()))
    }
}

impl Ordered for talk_speakers::Model {
    type Entity = talk_speakers::Entity;

    fn position(&self) -> Option<i32> {
        self.index
    }

    fn set_position(&mut self, position: i32) {
        self.index = Some(position);
    }

    fn position_update(&self) -> UpdateMany<Self::Entity> {
        talk_speakers::Entity::update_many()
            .col_expr(talk_speakers::Column::Index, Expr::value(self.index))
            .filter(talk_speakers::Column::TalkId.eq(self.talk_id))
            .filter(talk_speakers::Column::SpeakerId.eq(self.speaker_id))
    }
}

impl Ordered for talk_links::Model {
    type Entity = talk_links::Entity;

    fn position(&self) -> Option<i32> {
        self.index
    }

    fn set_position(&mut self, position: i32) {
        self.index = Some(position);
    }

    fn position_update(&self) -> UpdateMany<Self::Entity> {
        talk_links::Entity::update_many()
            .col_expr(talk_links::Column::Index, Expr::value(self.index))
            .filter(talk_links::Column::TalkId.eq(self.talk_id))
            .filter(talk_links::Column::Url.eq(self.url.as_str()))
    }
}
