use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domains::attendance;
use crate::domains::sea_orm_active_enums::AttendanceStatus;

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSchema {
    pub team_id: String,
    pub team_name: String,
    pub leader_name: Option<String>,
    pub leader_phone: Option<String>,
    pub status: AttendanceStatus,
    pub entry_time: Option<DateTime<FixedOffset>>,
}

impl From<attendance::Model> for AttendanceSchema {
    fn from(row: attendance::Model) -> Self {
        Self {
            team_id: row.team_id,
            team_name: row.team_name,
            leader_name: row.leader_name,
            leader_phone: row.leader_phone,
            status: row.status,
            entry_time: row.entry_time,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceSchema {
    pub attendance: AttendanceSchema,
    /// Set when the team had already been checked in before this scan.
    pub already_present: bool,
}

/// Contents of the gate QR code.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    pub team_id: String,
    pub team_name: String,
    pub leader_name: Option<String>,
    pub leader_phone: Option<String>,
}

impl From<&attendance::Model> for QrPayload {
    fn from(row: &attendance::Model) -> Self {
        Self {
            team_id: row.team_id.clone(),
            team_name: row.team_name.clone(),
            leader_name: row.leader_name.clone(),
            leader_phone: row.leader_phone.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVerifiedSchema {
    pub qr: QrPayload,
    /// `data:image/png;base64,...` rendering of `qr`.
    pub qr_image: String,
}
