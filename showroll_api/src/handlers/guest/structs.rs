use serde::Serialize;

use crate::models::Guest;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct GuestSimpleView {
    pub id: i32,
    pub name: String,
    pub occupation: String,
}

impl From<Guest> for GuestSimpleView {
    fn from(guest: Guest) -> Self {
        Self {
            id: guest.id,
            name: guest.name,
            occupation: guest.occupation,
        }
    }
}
