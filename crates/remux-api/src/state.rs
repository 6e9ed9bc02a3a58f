//! Application state.

use remux_core::Config;
use remux_processing::{ScratchArea, TranscoderLocator};

/// Main application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub scratch: ScratchArea,
    pub locator: TranscoderLocator,
    pub is_production: bool,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
