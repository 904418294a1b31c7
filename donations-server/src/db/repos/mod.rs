//! Repository implementations for database access
//!
//! Each repository borrows the pool and issues one statement per call,
//! except where a method says it uses a transaction.

pub mod donations;

pub use donations::DonationRepo;
