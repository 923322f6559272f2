use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{KeyValueStore, load_state, save_state};
use crate::error::Result;

pub const UI_STATE_KEY: &str = "admin-ui";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiState {
    pub theme: Theme,
    pub sidebar_collapsed: bool,
}

/// Console layout preferences. Every mutation is persisted before it returns.
pub struct UiStore {
    store: Arc<dyn KeyValueStore>,
    state: UiState,
}

impl UiStore {
    pub fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let state = load_state(store.as_ref(), UI_STATE_KEY)?;
        Ok(Self { store, state })
    }

    pub fn save(&self) -> Result<()> {
        save_state(self.store.as_ref(), UI_STATE_KEY, &self.state)
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.state.sidebar_collapsed
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let theme = self.state.theme.toggled();
        self.commit(UiState { theme, ..self.state })?;
        Ok(theme)
    }

    pub fn toggle_sidebar(&mut self) -> Result<bool> {
        let collapsed = !self.state.sidebar_collapsed;
        self.commit(UiState {
            sidebar_collapsed: collapsed,
            ..self.state
        })?;
        Ok(collapsed)
    }

    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) -> Result<()> {
        self.commit(UiState {
            sidebar_collapsed: collapsed,
            ..self.state
        })
    }

    // In-memory state only moves once the write has landed.
    fn commit(&mut self, next: UiState) -> Result<()> {
        save_state(self.store.as_ref(), UI_STATE_KEY, &next)?;
        self.state = next;
        Ok(())
    }
}
