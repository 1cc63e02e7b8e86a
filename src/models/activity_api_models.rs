use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub alternate_key: String,
    pub activity: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub participants: i64,
    pub price: f64,
    pub accessibility: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    #[serde(default)]
    pub activity: String,
    #[serde(rename = "type", default)]
    pub activity_type: String,
    #[serde(default)]
    pub participants: i64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub accessibility: f64,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub alternate_key: String,
    /// Owning activity; exposed through the `activity` link rather than as a field.
    #[serde(skip)]
    pub activity_alternate_key: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}
