//! Core domain models for vehicle listings.
//!
//! This module defines the record shapes used throughout the crate: the raw
//! row as read from the CSV, the cleaned listing, and the column vocabulary
//! shared by the filtering and aggregation steps.

pub mod domain;

pub use domain::{Column, Listing, ListingTable, NumericColumn, RawListing, RawTable};
