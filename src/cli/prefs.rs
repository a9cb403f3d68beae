//! Prefs command: show or change the persisted preferences.

use super::{load_config, PrefsArgs};
use crate::prefs;
use crate::store::{Store, Transition, UiPref};

/// Handle prefs command
pub fn handle_prefs(args: &PrefsArgs) -> anyhow::Result<String> {
    let config = load_config(&args.config, None)?;
    let ui_prefs = prefs::load(
        &config.prefs_path,
        config.refresh.interval_ms,
        config.refresh.enabled,
    );
    let store = Store::new(ui_prefs);

    if let Some(on) = args.dark_mode {
        store.dispatch(Transition::SetUiPref(UiPref::DarkMode(on)));
    }
    if let Some(on) = args.auto_refresh {
        store.dispatch(Transition::SetUiPref(UiPref::AutoRefresh(on)));
    }

    let current = store.snapshot().ui_prefs;
    if args.dark_mode.is_some() || args.auto_refresh.is_some() {
        prefs::save(&config.prefs_path, &current)?;
        tracing::debug!(path = %config.prefs_path.display(), "preferences saved");
    }

    Ok(format!(
        "dark_mode: {}\nauto_refresh: {}\nrefresh_interval_ms: {}",
        current.dark_mode, current.auto_refresh, current.refresh_interval_ms
    ))
}
