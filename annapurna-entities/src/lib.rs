#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # annapurna-entities
//!
//! Reusable, agnostic domain entities for matching food donors with NGOs.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod address;
pub mod geo;
pub mod id;
pub mod ngo;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
