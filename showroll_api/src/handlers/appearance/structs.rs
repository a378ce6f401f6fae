use serde::{Deserialize, Serialize};

use crate::handlers::{
    episode::structs::EpisodeSimpleView, guest::structs::GuestSimpleView,
};
use crate::models::{Appearance, Episode, Guest};

#[derive(Debug, Deserialize)]
pub struct CreateAppearanceRequest {
    pub rating: i32,
    pub episode_id: i32,
    pub guest_id: i32,
}

#[derive(Debug, Serialize)]
pub struct AppearanceDetailView {
    pub id: i32,
    pub rating: i32,
    pub episode_id: i32,
    pub guest_id: i32,

    pub episode: EpisodeSimpleView,
    pub guest: GuestSimpleView,
}

impl From<(Appearance, Episode, Guest)> for AppearanceDetailView {
    fn from((appearance, episode, guest): (Appearance, Episode, Guest)) -> Self {
        Self {
            id: appearance.id,
            rating: appearance.rating(),
            episode_id: appearance.episode_id,
            guest_id: appearance.guest_id,

            episode: EpisodeSimpleView::from(episode),
            guest: GuestSimpleView::from(guest),
        }
    }
}
