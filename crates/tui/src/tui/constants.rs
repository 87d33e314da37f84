use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const TICK_RATE: Duration = Duration::from_millis(200);
pub(crate) const SIDEBAR_WIDTH: u16 = 34;
pub(crate) const ASIDE_WIDTH: u16 = 24;

pub(crate) const HINT_SIDEBAR: &str =
    "j/k move • Enter open • Tab filter • a new • r reload • s rescan • h help • q quit";
pub(crate) const HINT_SIDEBAR_EDITING: &str =
    "j/k move • Enter open • e edit • Esc close note • Ctrl+S save • Ctrl+D delete • h help";
pub(crate) const HINT_EDITOR: &str =
    "Ctrl+S save • Ctrl+D delete • Tab title/content • Esc back to list";
pub(crate) const HINT_PICKER: &str = "↑/↓ choose • Enter create • Esc cancel";
pub(crate) const HINT_FORM: &str = "Tab next field • Enter submit • Esc cancel";
pub(crate) const HINT_CONFIRM: &str = "←/→ choose • y/n • Enter confirm • Esc cancel";
pub(crate) const HINT_HELP: &str = "Enter/Esc to close";
