use serde::Serialize;

use crate::handlers::guest::structs::GuestSimpleView;
use crate::models::{Episode, Guest};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct EpisodeSimpleView {
    pub id: i32,
    pub date: String,
    pub number: String,
}

impl From<Episode> for EpisodeSimpleView {
    fn from(episode: Episode) -> Self {
        Self {
            id: episode.id,
            date: episode.date,
            number: episode.number,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EpisodeDetailView {
    pub id: i32,
    pub date: String,
    pub number: String,

    pub guests: Vec<GuestSimpleView>,
}

impl From<(Episode, Vec<Guest>)> for EpisodeDetailView {
    fn from((episode, guests): (Episode, Vec<Guest>)) -> Self {
        Self {
            id: episode.id,
            date: episode.date,
            number: episode.number,

            guests: guests.into_iter().map(GuestSimpleView::from).collect(),
        }
    }
}
