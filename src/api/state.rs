use std::sync::Arc;

use crate::calculate::Analytics;
use crate::storage::ClubStore;
use crate::voting::HighlightVoting;

#[derive(Clone)]
pub struct AppState {
    pub analytics: Analytics,
    pub voting: HighlightVoting,
    pub cors_origin: String,
}

impl AppState {
    pub fn new(store: Arc<dyn ClubStore>, cors_origin: impl Into<String>) -> Self {
        Self {
            analytics: Analytics::new(store.clone()),
            voting: HighlightVoting::new(store),
            cors_origin: cors_origin.into(),
        }
    }
}
