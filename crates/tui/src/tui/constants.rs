use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const TICK_RATE: Duration = Duration::from_millis(200);
pub(crate) const STATUS_TTL: Duration = Duration::from_secs(5);

pub(crate) const STATUS_COMPOSE: &str =
    "New reminder • Tab/Shift+Tab move focus • ↑/↓ change value • Enter save • Esc cancel";
pub(crate) const STATUS_HELP: &str = "Keyboard reference • Enter/Esc to close";
pub(crate) const STATUS_CONFIRM_DELETE: &str =
    "Confirm deletion • arrows choose, Enter confirms, Esc cancels";
