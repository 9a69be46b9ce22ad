//! Typed resource modules
//!
//! One module per remote collection. Each declares the collection's field
//! layout, a wrapper struct with typed accessors, and a manager accessor
//! on the client.

pub mod credentials;
pub mod groups;
pub mod hosts;
pub mod inventories;
pub mod job_templates;
pub mod jobs;
pub mod organizations;
pub mod projects;
pub mod schedules;
pub mod teams;
pub mod users;

pub use credentials::Credential;
pub use groups::Group;
pub use hosts::Host;
pub use inventories::Inventory;
pub use job_templates::JobTemplate;
pub use jobs::Job;
pub use organizations::Organization;
pub use projects::Project;
pub use schedules::Schedule;
pub use teams::Team;
pub use users::User;
