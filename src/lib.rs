//! awxlib - A typed client for the AWX / Ansible Tower REST API
//!
//! The crate revolves around two pieces: a lazy cursor over the API's
//! paginated list endpoints, and typed entity managers layered on top of
//! it for the common resources (organizations, inventories, hosts, job
//! templates and so on).
//!
//! # Features
//!
//! - Listing, filtering and keyword search over every modeled collection
//! - Strictly on-demand page fetching; abandoning a cursor stops the traffic
//! - Create, merge-aware update, and delete operations
//! - Filter and payload validation against field descriptors before any
//!   request goes out
//! - Pluggable transport, so tests run against scripted responses
//!
//! # Example
//!
//! ```no_run
//! use awxlib::{Auth, AwxClient, Filter};
//!
//! # async fn run() -> awxlib::Result<()> {
//! let client = AwxClient::new("awx.example.com", Auth::Token("t0ken".into()));
//!
//! // Walk the enabled hosts one page at a time
//! let hosts = client.hosts();
//! let mut cursor = hosts.filter(Filter::new().field("enabled", true))?;
//! while let Some(host) = cursor.try_next().await? {
//!     println!("{}", host.name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod awx;
pub mod config;
pub mod error;

pub use awx::resources::{
    Credential, Group, Host, Inventory, Job, JobTemplate, Organization, Project, Schedule, Team,
    User,
};
pub use awx::{
    Auth, AwxClient, Entity, EntityCursor, EntityManager, EntityType, FieldKind, FieldSpec,
    Filter, HttpTransport, Locator, Method, Page, Patch, Record, RecordCursor, Resource,
    Transport, TransportResponse,
};
pub use error::{AwxError, Result};
