pub mod csv_handler;
pub mod error;
pub mod generator;
pub mod processor;
pub mod storage;
pub mod transaction;
