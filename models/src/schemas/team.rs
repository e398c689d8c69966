use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domains::sea_orm_active_enums::{MemberRole, TeamStatus};
use crate::domains::{members, teams};

/// Team row as exposed over the API. The password hash never leaves the server.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamSchema {
    pub id: i32,
    pub team_id: String,
    pub name: String,
    pub email: String,
    pub event: Option<String>,
    pub transaction_id: Option<String>,
    pub payment_proof: Option<String>,
    pub payment_verified: bool,
    pub status: TeamStatus,
    pub created_at: DateTime<FixedOffset>,
}

impl From<teams::Model> for TeamSchema {
    fn from(team: teams::Model) -> Self {
        Self {
            id: team.id,
            team_id: team.team_id,
            name: team.name,
            email: team.email,
            event: team.event,
            transaction_id: team.transaction_id,
            payment_proof: team.payment_proof,
            payment_verified: team.payment_verified,
            status: team.status,
            created_at: team.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberSchema {
    pub id: i32,
    pub name: String,
    pub age: Option<i32>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub college: Option<String>,
    pub address: Option<String>,
    pub role: MemberRole,
}

impl From<members::Model> for MemberSchema {
    fn from(member: members::Model) -> Self {
        Self {
            id: member.id,
            name: member.name,
            age: member.age,
            email: member.email,
            phone: member.phone,
            whatsapp: member.whatsapp,
            college: member.college,
            address: member.address,
            role: member.role,
        }
    }
}

/// Dashboard payload.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct DashboardSchema {
    pub team: TeamSchema,
    pub members: Vec<MemberSchema>,
}

impl From<(teams::Model, Vec<members::Model>)> for DashboardSchema {
    fn from((team, members): (teams::Model, Vec<members::Model>)) -> Self {
        Self {
            team: TeamSchema::from(team),
            members: members.into_iter().map(MemberSchema::from).collect(),
        }
    }
}

/// Admin listing entry: team fields flattened next to its roster.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct TeamWithMembersSchema {
    #[serde(flatten)]
    pub team: TeamSchema,
    pub members: Vec<MemberSchema>,
}

impl From<(teams::Model, Vec<members::Model>)> for TeamWithMembersSchema {
    fn from(pair: (teams::Model, Vec<members::Model>)) -> Self {
        let DashboardSchema { team, members } = DashboardSchema::from(pair);
        Self { team, members }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredTeamSchema {
    pub team_id: String,
    pub team_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct TeamSummarySchema {
    pub id: String,
    pub name: String,
    pub email: String,
    pub event: Option<String>,
}

impl From<teams::Model> for TeamSummarySchema {
    fn from(team: teams::Model) -> Self {
        Self {
            id: team.team_id,
            name: team.name,
            email: team.email,
            event: team.event,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct LoginSchema {
    pub team: TeamSummarySchema,
    pub token: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct AdminLoginSchema {
    pub token: String,
}

/// Identity carried inside a team token.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamSession {
    pub team_id: String,
}

/// Identity carried inside an admin token.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AdminSession {
    pub admin: bool,
}
