mod open;
mod models;
mod catalog;
mod details;
mod errors;
mod query;
mod schema;

pub use open::Db;
pub use models::*;
pub use schema::{CATALOG_TABLE, DETAILS_TABLE, ERROR_TABLE};
