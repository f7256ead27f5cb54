//! DTOs for decoding Geoapify Places responses.

use serde::Deserialize;

use crate::domain::Hospital;

const UNKNOWN_NAME: &str = "N/A";
const UNKNOWN_ADDRESS: &str = "Address not available";

#[derive(Debug, Deserialize)]
pub(super) struct PlacesResponseDto {
    #[serde(default)]
    pub(super) features: Vec<FeatureDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FeatureDto {
    #[serde(default)]
    pub(super) properties: PropertiesDto,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct PropertiesDto {
    pub(super) name: Option<String>,
    pub(super) address_line2: Option<String>,
    pub(super) formatted: Option<String>,
    pub(super) distance: Option<f64>,
}

impl PlacesResponseDto {
    pub(super) fn into_hospitals(self) -> Vec<Hospital> {
        self.features
            .into_iter()
            .map(|feature| feature.properties.into_hospital())
            .collect()
    }
}

impl PropertiesDto {
    fn into_hospital(self) -> Hospital {
        Hospital {
            name: self.name.unwrap_or_else(|| UNKNOWN_NAME.to_owned()),
            address: self
                .address_line2
                .or(self.formatted)
                .unwrap_or_else(|| UNKNOWN_ADDRESS.to_owned()),
            distance_meters: whole_metres(self.distance),
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "distance is finite and positive; float-to-int casts saturate"
)]
fn whole_metres(distance: Option<f64>) -> u64 {
    match distance {
        Some(metres) if metres.is_finite() && metres > 0.0 => metres.floor() as u64,
        _ => 0,
    }
}
