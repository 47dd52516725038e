use super::ConfigStore;
use crate::model::Location;
use crate::state::{ViewField, ViewState};

/// Decides where a tab's view state comes from and where its changes go.
///
/// A per-folder override always wins over the global default. Tabs whose
/// state is not owned write through to the global default.
pub struct ConfigResolver;

impl ConfigResolver {
    pub fn resolve(store: &dyn ConfigStore, location: &Location) -> ViewState {
        match store.get_override(location) {
            Some(mut state) => {
                state.owns_config = true;
                state
            }
            None => store.default_view_state().inherited(),
        }
    }

    /// Persist one changed field of `state`. Returns whether the store changed.
    pub fn commit(
        store: &mut dyn ConfigStore,
        location: &Location,
        state: &ViewState,
        field: &ViewField,
    ) -> bool {
        let changed = if state.owns_config {
            let mut stored = store
                .get_override(location)
                .unwrap_or_else(|| state.clone());
            stored.owns_config = true;
            stored.apply(field);
            store.set_override(location, &stored)
        } else {
            store.set_default_field(field)
        };
        if changed {
            log::debug!("Committed {:?} for {}", field, location);
            store.request_save();
        }
        changed
    }

    /// Start saving the folder's view separately, seeded from the global
    /// default as it stands now.
    pub fn enable_per_folder(
        store: &mut dyn ConfigStore,
        location: &Location,
        state: &mut ViewState,
    ) -> bool {
        if state.owns_config {
            return false;
        }
        *state = store.default_view_state().inherited();
        state.owns_config = true;
        state.columns = Some(store.default_columns());
        if store.set_override(location, state) {
            store.request_save();
        }
        true
    }

    /// Drop the folder's override; the tab falls back to the global default.
    pub fn disable_per_folder(
        store: &mut dyn ConfigStore,
        location: &Location,
        state: &mut ViewState,
    ) -> bool {
        if !state.owns_config {
            return false;
        }
        if store.clear_override(location) {
            store.request_save();
        }
        *state = store.default_view_state().inherited();
        true
    }
}
