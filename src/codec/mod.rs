//! Conversion between the JSON wire payload and [`crate::Timeline`].

pub mod payload;
