use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait, sea_query::OnConflict,
};

use models::domains::sea_orm_active_enums::{AttendanceStatus, TeamStatus};
use models::domains::{attendance, members, teams};

use super::teams::{find_leader, get_team};
use crate::error::TeamError;

#[derive(Debug)]
pub struct VerifiedPayment {
    pub team: teams::Model,
    pub leader: Option<members::Model>,
    pub attendance: attendance::Model,
}

/// Confirms the team's payment and opens its attendance record. Running it
/// again is harmless: the flag stays set and the existing row is kept.
pub async fn verify_payment(db: &DbConn, team_id: &str) -> Result<VerifiedPayment, anyhow::Error> {
    let txn = db.begin().await?;

    let team = get_team(&txn, team_id).await?;
    let leader = find_leader(&txn, team.id).await?;

    let team = if team.payment_verified && team.status == TeamStatus::Confirmed {
        team
    } else {
        let mut active = team.into_active_model();
        active.payment_verified = Set(true);
        active.status = Set(TeamStatus::Confirmed);
        active.update(&txn).await?
    };

    let row = attendance::ActiveModel {
        team_db_id: Set(team.id),
        team_id: Set(team.team_id.clone()),
        team_name: Set(team.name.clone()),
        leader_name: Set(leader.as_ref().map(|l| l.name.clone())),
        leader_phone: Set(leader.as_ref().and_then(|l| l.phone.clone())),
        status: Set(AttendanceStatus::Absent),
        entry_time: Set(None),
        created_at: Set(Utc::now().fixed_offset()),
        ..Default::default()
    };
    let inserted = attendance::Entity::insert(row)
        .on_conflict(
            OnConflict::column(attendance::Column::TeamDbId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

    let attendance = attendance::Entity::find()
        .filter(attendance::Column::TeamDbId.eq(team.id))
        .one(&txn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("attendance for {}", team.team_id)))?;

    txn.commit().await?;

    tracing::info!(
        team_id = %team.team_id,
        new_attendance = inserted > 0,
        "Payment verified"
    );
    Ok(VerifiedPayment {
        team,
        leader,
        attendance,
    })
}

/// Checks a team in. Returns the row and whether it was already PRESENT;
/// the entry time is that of the first scan.
pub async fn mark_present(
    db: &DbConn,
    team_id: &str,
) -> Result<(attendance::Model, bool), anyhow::Error> {
    let row = attendance::Entity::find()
        .filter(attendance::Column::TeamId.eq(team_id.trim()))
        .one(db)
        .await?
        .ok_or(TeamError::NoAttendance)?;

    if row.status == AttendanceStatus::Present {
        tracing::debug!(%team_id, "Team already checked in");
        return Ok((row, true));
    }

    let mut active = row.into_active_model();
    active.status = Set(AttendanceStatus::Present);
    active.entry_time = Set(Some(Utc::now().fixed_offset()));
    let row = active.update(db).await?;

    tracing::info!(%team_id, "Team checked in");
    Ok((row, false))
}

pub async fn list_attendance(db: &DbConn) -> Result<Vec<attendance::Model>, DbErr> {
    attendance::Entity::find()
        .order_by_asc(attendance::Column::Id)
        .all(db)
        .await
}
