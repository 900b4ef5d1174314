use serde::{Deserialize, Serialize};

use crate::value::{Gain, ScreenEdgeLock};

/// Exactly one coordinate system is ever populated for a decoded position;
/// the variant is picked by sniffing the `coordinate` attributes of the
/// position element set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "camelCase")]
pub enum Position {
    Spherical(SphericalPosition),
    Cartesian(CartesianPosition),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SphericalPosition {
    pub azimuth: Option<f64>,
    pub elevation: Option<f64>,
    pub distance: Option<f64>,
    pub screen_edge_lock: Option<ScreenEdgeLock>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartesianPosition {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "camelCase")]
pub enum PositionOffset {
    Spherical(SphericalPositionOffset),
    Cartesian(CartesianPositionOffset),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SphericalPositionOffset {
    pub azimuth: Option<f64>,
    pub elevation: Option<f64>,
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartesianPositionOffset {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

/// Speaker positions additionally route every axis through an optional
/// `bound` attribute into base/min/max fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "camelCase")]
pub enum SpeakerPosition {
    Spherical(SphericalSpeakerPosition),
    Cartesian(CartesianSpeakerPosition),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SphericalSpeakerPosition {
    pub azimuth: Option<f64>,
    pub azimuth_min: Option<f64>,
    pub azimuth_max: Option<f64>,
    pub elevation: Option<f64>,
    pub elevation_min: Option<f64>,
    pub elevation_max: Option<f64>,
    pub distance: Option<f64>,
    pub distance_min: Option<f64>,
    pub distance_max: Option<f64>,
    pub screen_edge_lock: Option<ScreenEdgeLock>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartesianSpeakerPosition {
    pub x: Option<f64>,
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub y: Option<f64>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub z: Option<f64>,
    pub z_min: Option<f64>,
    pub z_max: Option<f64>,
    pub screen_edge_lock: Option<ScreenEdgeLock>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GainInteractionRange {
    pub min: Option<Gain>,
    pub max: Option<Gain>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "camelCase")]
pub enum PositionInteractionRange {
    Spherical(SphericalInteractionRange),
    Cartesian(CartesianInteractionRange),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SphericalInteractionRange {
    pub azimuth_min: Option<f64>,
    pub azimuth_max: Option<f64>,
    pub elevation_min: Option<f64>,
    pub elevation_max: Option<f64>,
    pub distance_min: Option<f64>,
    pub distance_max: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CartesianInteractionRange {
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub z_min: Option<f64>,
    pub z_max: Option<f64>,
}
