//! Backend plumbing for the editor shell: the authenticated session
//! context, the typed REST client, and the debounced auto-save coordinator.

pub mod api;
pub mod autosave;
pub mod errors;
pub mod session;

pub use api::{ApiClient, CreateCampaignRequest, RecipientSelection, SaveBackend, Template};
pub use autosave::{format_last_saved, AutoSaveCoordinator};
pub use errors::ApiError;
pub use session::{AccountUser, Session, SharedSession};
