pub mod categories;
pub mod credentials;
pub mod database;
pub mod error;
pub mod row_helpers;
pub mod schema;
pub mod tasks;

pub use categories::CategoryRepo;
pub use credentials::CredentialRepo;
pub use database::Database;
pub use error::StoreError;
pub use tasks::{SaveOutcome, TaskRepo};
