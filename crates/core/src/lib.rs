//! # BECC Core
//!
//! Core logic for the BECC nonprofit site.
//!
//! This crate contains the site records and everything needed to edit and present them:
//! - Record types (pillars, projects, events, ...) stored as YAML in sharded directories
//!   under `SITE_DATA_DIR`
//! - Form binding, including list fields carried as JSON transport strings
//! - Dashboard operations (create, update, delete, statistics)
//! - Public page contexts
//!
//! **No API concerns**: HTTP routing, authentication and media upload handling belong in
//! `api-rest` and `api-shared`.

pub mod config;
pub mod constants;
pub mod entities;
mod error;
pub mod forms;
pub mod pages;
pub mod service;
pub mod store;

pub use config::{CoreConfig, ListLimits};
pub use error::{SiteError, SiteResult};
pub use forms::{Choice, FormData, FormErrors, FormRejection};
pub use service::{DashboardStats, SiteService};
pub use store::{OrganisationStore, Record, RecordStore};

pub use becc_types::MediaRef;
pub use becc_uuid::RecordId;
pub use list_field::{ListField, ListFieldDef, ListFieldError, ListItem};
