use common::geo::Coordinate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body for start-session and verify-location: the reporter's coordinates.
#[derive(Debug, Deserialize, Validate)]
pub struct CoordsRequest {
    #[validate(required(message = "Coordinates are required."))]
    pub coords: Option<Coordinate>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MarkRequest {
    #[validate(required(message = "Missing class code or user ID."))]
    pub student_id: Option<String>,
}

#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MarkResponse {
    pub already_marked: bool,
}
