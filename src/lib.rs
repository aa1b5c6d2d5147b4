pub mod engine;
pub mod error;
pub mod field;
pub mod layout;
pub mod record;
pub mod report;
pub mod resolve;
