use std::fmt;

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use thiserror::Error;

use crate::schema::{appearances, episodes, guests};

/// A guest's score for a single appearance, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(i32);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("rating {0} is outside the allowed range 1..=5")]
pub struct RatingError(pub i32);

impl Rating {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    /// # Errors
    /// If `value` is below [`Rating::MIN`] or above [`Rating::MAX`].
    pub const fn new(value: i32) -> Result<Self, RatingError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(RatingError(value));
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Rating {
    type Error = RatingError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Queryable, Selectable, Identifiable, Clone, PartialEq, Eq)]
#[diesel(table_name = episodes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Episode {
    pub id: i32,
    pub date: String,
    pub number: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = episodes)]
pub struct NewEpisode {
    pub date: String,
    pub number: String,
}

impl fmt::Debug for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Episode")
            .field("id", &self.id)
            .field("date", &self.date)
            .field("number", &self.number)
            .finish_non_exhaustive()
    }
}

impl Episode {
    pub fn all(conn: &mut SqliteConnection) -> QueryResult<Vec<Self>> {
        episodes::table
            .order(episodes::id.asc())
            .select(Self::as_select())
            .load(conn)
    }

    pub fn find(conn: &mut SqliteConnection, id: i32) -> QueryResult<Option<Self>> {
        episodes::table
            .find(id)
            .select(Self::as_select())
            .first(conn)
            .optional()
    }

    pub fn create(
        conn: &mut SqliteConnection,
        record: &NewEpisode,
    ) -> QueryResult<Self> {
        diesel::insert_into(episodes::table)
            .values(record)
            .returning(Self::as_returning())
            .get_result(conn)
    }

    pub fn appearances(
        &self,
        conn: &mut SqliteConnection,
    ) -> QueryResult<Vec<Appearance>> {
        Appearance::belonging_to(self)
            .order(appearances::id.asc())
            .select(Appearance::as_select())
            .load(conn)
    }

    /// The guests reached through this episode's appearances, in appearance
    /// order. A guest rated twice on the episode is listed twice.
    pub fn guests(&self, conn: &mut SqliteConnection) -> QueryResult<Vec<Guest>> {
        Appearance::belonging_to(self)
            .inner_join(guests::table)
            .order(appearances::id.asc())
            .select(Guest::as_select())
            .load(conn)
    }

    /// Removes the episode together with all of its appearances.
    pub fn delete(self, conn: &mut SqliteConnection) -> QueryResult<()> {
        let removed = diesel::delete(
            appearances::table.filter(appearances::episode_id.eq(self.id)),
        )
        .execute(conn)?;

        diesel::delete(episodes::table.find(self.id)).execute(conn)?;

        tracing::debug!("deleted {self:?} and {removed} appearance(s)");

        Ok(())
    }
}

#[derive(Queryable, Selectable, Identifiable, Clone, PartialEq, Eq)]
#[diesel(table_name = guests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Guest {
    pub id: i32,
    pub name: String,
    pub occupation: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = guests)]
pub struct NewGuest {
    pub name: String,
    pub occupation: String,
}

impl fmt::Debug for Guest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guest")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("occupation", &self.occupation)
            .finish_non_exhaustive()
    }
}

impl Guest {
    pub fn all(conn: &mut SqliteConnection) -> QueryResult<Vec<Self>> {
        guests::table
            .order(guests::id.asc())
            .select(Self::as_select())
            .load(conn)
    }

    pub fn find(conn: &mut SqliteConnection, id: i32) -> QueryResult<Option<Self>> {
        guests::table
            .find(id)
            .select(Self::as_select())
            .first(conn)
            .optional()
    }

    pub fn create(
        conn: &mut SqliteConnection,
        record: &NewGuest,
    ) -> QueryResult<Self> {
        diesel::insert_into(guests::table)
            .values(record)
            .returning(Self::as_returning())
            .get_result(conn)
    }

    pub fn appearances(
        &self,
        conn: &mut SqliteConnection,
    ) -> QueryResult<Vec<Appearance>> {
        Appearance::belonging_to(self)
            .order(appearances::id.asc())
            .select(Appearance::as_select())
            .load(conn)
    }

    /// The episodes this guest appeared on, in appearance order.
    pub fn episodes(
        &self,
        conn: &mut SqliteConnection,
    ) -> QueryResult<Vec<Episode>> {
        Appearance::belonging_to(self)
            .inner_join(episodes::table)
            .order(appearances::id.asc())
            .select(Episode::as_select())
            .load(conn)
    }
}

#[derive(
    Queryable, Selectable, Identifiable, Associations, Clone, PartialEq, Eq,
)]
#[diesel(belongs_to(Episode))]
#[diesel(belongs_to(Guest))]
#[diesel(table_name = appearances)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Appearance {
    pub id: i32,
    rating: i32,
    pub episode_id: i32,
    pub guest_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// An appearance that has not been stored yet. It can only be built from a
/// [`Rating`], so an out of range value never reaches the insert.
#[derive(Insertable, Debug, Clone, Copy, PartialEq, Eq)]
#[diesel(table_name = appearances)]
pub struct NewAppearance {
    rating: i32,
    episode_id: i32,
    guest_id: i32,
}

impl NewAppearance {
    pub const fn new(rating: Rating, episode_id: i32, guest_id: i32) -> Self {
        Self {
            rating: rating.get(),
            episode_id,
            guest_id,
        }
    }

    pub const fn rating(&self) -> i32 {
        self.rating
    }

    pub const fn episode_id(&self) -> i32 {
        self.episode_id
    }

    pub const fn guest_id(&self) -> i32 {
        self.guest_id
    }
}

impl fmt::Debug for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Appearance")
            .field("id", &self.id)
            .field("rating", &self.rating)
            .field("episode_id", &self.episode_id)
            .field("guest_id", &self.guest_id)
            .finish_non_exhaustive()
    }
}

impl Appearance {
    pub const fn rating(&self) -> i32 {
        self.rating
    }

    pub fn find(conn: &mut SqliteConnection, id: i32) -> QueryResult<Option<Self>> {
        appearances::table
            .find(id)
            .select(Self::as_select())
            .first(conn)
            .optional()
    }

    pub fn create(
        conn: &mut SqliteConnection,
        record: &NewAppearance,
    ) -> QueryResult<Self> {
        diesel::insert_into(appearances::table)
            .values(record)
            .returning(Self::as_returning())
            .get_result(conn)
    }

    pub fn episode(&self, conn: &mut SqliteConnection) -> QueryResult<Episode> {
        episodes::table
            .find(self.episode_id)
            .select(Episode::as_select())
            .first(conn)
    }

    pub fn guest(&self, conn: &mut SqliteConnection) -> QueryResult<Guest> {
        guests::table
            .find(self.guest_id)
            .select(Guest::as_select())
            .first(conn)
    }

    /// Stores a new rating and stamps `updated_at`.
    pub fn update_rating(
        &mut self,
        conn: &mut SqliteConnection,
        rating: Rating,
    ) -> QueryResult<()> {
        *self = diesel::update(appearances::table.find(self.id))
            .set((
                appearances::rating.eq(rating.get()),
                appearances::updated_at.eq(Some(Utc::now().naive_utc())),
            ))
            .returning(Self::as_returning())
            .get_result(conn)?;

        Ok(())
    }
}
