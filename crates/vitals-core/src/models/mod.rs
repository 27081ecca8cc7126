pub mod collection;
pub mod patient;
