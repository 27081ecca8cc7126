//! vitals-storage
//!
//! Load-all / save-all persistence for the patient collection. The JSON file
//! store is the production backing; the memory store stands in for it in
//! tests and embedded use.

pub mod error;
pub mod file;
pub mod memory;
pub mod store;
