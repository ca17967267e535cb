use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A venue to hold events in.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "venues")]
pub struct Model {
    /// An internal numeric ID.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The name of the venue.
    pub name: String,
    /// The city of the venue.
    ///
    /// This is free text, unrelated to the `cities` table.
    pub city: String,
    /// The address of the venue, possibly spanning several lines.
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,
    /// The longitude of the location.
    pub longitude: String,
    /// The latitude of the location.
    pub latitude: String,
    /// The unique identifier of the venue for use in URLs.
    #[sea_orm(unique)]
    pub slug: String,
}

impl Model {
    /// Returns the first line of the address, if any.
    pub fn short_address(&self) -> Option<&str> {
        self.address.as_deref().and_then(|address| address.lines().next())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::events::Entity")]
    Events,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::Model;

    fn venue(address: Option<&str>) -> Model {
        Model {
            id: 1,
            name: "Národní technická knihovna".to_owned(),
            city: "Praha".to_owned(),
            address: address.map(str::to_owned),
            longitude: "14.3906".to_owned(),
            latitude: "50.1036".to_owned(),
            slug: "ntk".to_owned(),
        }
    }

    #[test]
    fn short_address_first_line() {
        let v = venue(Some("Technická 2710/6\n160 80 Praha 6"));
        assert_eq!(v.short_address(), Some("Technická 2710/6"));
    }

    #[test]
    fn short_address_single_line() {
        let v = venue(Some("Technická 2710/6"));
        assert_eq!(v.short_address(), Some("Technická 2710/6"));
    }

    #[test]
    fn short_address_missing() {
        assert_eq!(venue(None).short_address(), None);
        assert_eq!(venue(Some("")).short_address(), None);
    }
}
