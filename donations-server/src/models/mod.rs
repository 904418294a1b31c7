//! Domain models with validation at construction
//!
//! Inbound submissions are parsed leniently from JSON and then validated
//! into `NewDonation`. Nothing reaches the store without passing through
//! `NewDonation::validate`.

pub mod validation;
pub mod donation;
pub mod item;

pub use validation::ValidationError;
pub use donation::{DonationRequest, DonorFields, NewDonation};
pub use item::{NewDonationItem, Quantity};
