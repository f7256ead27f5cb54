//! Geoapify Places outbound adapter.
//!
//! Provides a thin HTTP implementation of the `HospitalLocator` port.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_GEOAPIFY_BASE_URL, GeoapifyHospitalLocator, GeoapifySearch};
