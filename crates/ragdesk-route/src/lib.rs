//! Routing primitives for ragdesk.
//!
//! - **Query** ([`QueryParams`], [`Location`]): what the URL says right now.
//! - **Paths** ([`BasePath`], [`normalize`]): the rule that roots every
//!   programmatic navigation under the console's base path.
//! - **Navigation** ([`Router`] trait, [`Navigator`]): the single
//!   navigation primitive and the wrapper everyone else calls.
//!
//! ```text
//! Session / shell (above)  → Navigator::navigate("/login")
//!                                 │ normalize → "/rag/login"
//!                                 ▼
//!                          Router::navigate (the one primitive)
//! ```

mod error;
mod location;
mod navigator;
mod path;
mod query;
mod router;

pub use error::RouteError;
pub use location::Location;
pub use navigator::Navigator;
pub use path::{BasePath, DEFAULT_BASE_PATH, base_path, build_path, normalize};
pub use query::QueryParams;
pub use router::{HistoryEntry, MemoryRouter, NavigateOptions, Router};
