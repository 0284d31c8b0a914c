use crate::config::ConnectionConfig;

/// Results handed from dialogs back to the app.
#[derive(Debug, Clone)]
pub enum DialogAction {
    /// Connect with these details and remember them.
    Connect(ConnectionConfig),
}
