//! Core logic for the admin console: record stores, search filtering,
//! selection tracking, the dashboard aggregator, and the mutation
//! orchestration shared by the user and SVC management pages. Rendering is
//! someone else's job; everything here is plain state in, derived state out.

pub mod aggregate;
pub mod auth;
pub mod export;
pub mod filter;
pub mod gateway;
pub mod notice;
pub mod pages;
pub mod selection;
pub mod store;

pub use aggregate::{summarize, DashboardSnapshot, GroupCount, MonthBucket};
pub use auth::{AuthError, Authenticator, ConfiguredAuthenticator, Credentials, Session};
pub use export::ReportSheet;
pub use filter::filter;
pub use gateway::{GatewayError, HttpGateway, SvcDirectory, UserDirectory};
pub use notice::{Notice, NoticeBus};
pub use pages::{DashboardPage, Page, SvcPage, UserPage};
pub use selection::SelectionTracker;
pub use store::RecordStore;
