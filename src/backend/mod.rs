//! Network backend.
//!
//! - `connection`: TCP/TLS setup and the JSON-lines gateway session
//! - `handlers`: UI action handling and gateway event translation
//! - `main_loop`: the polling loop tying both together
//!
//! The backend owns a Tokio runtime on its own thread. The typing
//! aggregator is spawned on the same runtime so the process has a single
//! async executor.

mod connection;
mod handlers;
mod main_loop;

pub use connection::{create_tls_connector, establish_connection, GatewaySession, GatewayStream};
pub use handlers::{handle_backend_action, handle_gateway_event};
pub use main_loop::run;

use crossbeam_channel::{unbounded, Sender};
use std::thread;
use tokio::runtime::Runtime;

use crate::error::Result;
use crate::protocol::{BackendAction, GuiEvent};
use crate::typing::{RenderDispatch, TypingAggregator};

/// What the UI holds on to after starting the backend.
pub struct BackendHandle {
    pub action_tx: Sender<BackendAction>,
    pub typing: TypingAggregator,
}

/// Start the runtime, the typing aggregator and the backend thread.
///
/// The thread exits, taking the runtime and the aggregator with it, once
/// `action_tx` is dropped.
pub fn start<D: RenderDispatch>(event_tx: Sender<GuiEvent>, dispatch: D) -> Result<BackendHandle> {
    let runtime = Runtime::new()?;
    let typing = TypingAggregator::spawn(runtime.handle(), dispatch);

    let (action_tx, action_rx) = unbounded::<BackendAction>();
    thread::Builder::new()
        .name("cordial-backend".into())
        .spawn(move || {
            runtime.block_on(run(action_rx, event_tx));
        })?;

    Ok(BackendHandle { action_tx, typing })
}
