//! # ragdesk
//!
//! Session and authorization core of a knowledge-base admin console.
//!
//! The console's pages are declarative UI; the part with real state is
//! here: reconciling OAuth redirects into a persisted credential store,
//! deriving "is the user logged in", choosing between full and simple
//! (chat-only) chrome, and rooting every navigation under one base path.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ragdesk::prelude::*;
//!
//! # async fn run() -> Result<(), ConsoleError> {
//! let router = MemoryRouter::at("/rag/?auth=abc");
//! let mut console = Console::builder().build(MemoryStore::new(), router)?;
//!
//! let frame = console.render();
//! assert_eq!(frame.shell, Shell::Admin);
//! # Ok(())
//! # }
//! ```

mod config;
mod console;
mod error;
pub mod settings;
mod shell;

pub use config::ConsoleConfig;
pub use console::{Console, ConsoleBuilder, Frame};
pub use error::ConsoleError;
pub use shell::Shell;

pub mod prelude {
    pub use crate::settings::{SettingsAction, SettingsKey};
    pub use crate::{Console, ConsoleBuilder, ConsoleConfig, ConsoleError, Frame, Shell};
    pub use ragdesk_route::{
        BasePath, Location, MemoryRouter, NavigateOptions, Navigator, QueryParams, Router,
        normalize,
    };
    pub use ragdesk_session::{
        CallbackAction, LogNotifier, LoginState, Mode, Notifier, ProfileSummary, TenantEntry,
        TenantRole, TenantSource, UserInfoSource,
    };
    pub use ragdesk_store::{CredentialStore, FileStore, KeyValueStore, MemoryStore, UserInfo};
}
