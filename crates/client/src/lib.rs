//! BurgerFy client
//!
//! [`ApiClient`] talks to the BurgerFy API over HTTP and keeps the session
//! cookie between calls. [`BuilderSession`] drives a composer state against
//! it: the catalog is loaded into the builder, finished burgers are saved,
//! and failures are queued as [`Notice`]s for display.

pub mod api_client;
pub mod notice;
pub mod session;

pub use api_client::{ApiClient, Registration, RequestError};
pub use notice::{Notice, NoticeKind};
pub use session::BuilderSession;
