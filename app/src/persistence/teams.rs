use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbConn, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use models::domains::sea_orm_active_enums::{MemberRole, TeamStatus};
use models::domains::{members, teams};
use models::params::admin::AdminUpdateTeamParams;
use models::params::team::{LoginParams, MemberParams, RegisterTeamParams};

use super::map_unique_violation;
use crate::error::TeamError;
use crate::utils::password::{hash_password, verify_password};

pub const UTR_NOT_PROVIDED: &str = "NOT_PROVIDED";

/// Display id derived from the row's primary key, e.g. `Xctf26te0042`.
pub fn format_team_id(prefix: &str, id: i32) -> String {
    format!("{prefix}{id:04}")
}

fn member_active_model(
    team_db_id: i32,
    role: MemberRole,
    params: MemberParams,
) -> members::ActiveModel {
    members::ActiveModel {
        team_db_id: Set(team_db_id),
        name: Set(params.name.trim().to_string()),
        age: Set(params.age),
        email: Set(params.email),
        phone: Set(params.phone),
        whatsapp: Set(params.whatsapp),
        college: Set(params.college),
        address: Set(params.address),
        role: Set(role),
        ..Default::default()
    }
}

async fn insert_members<C: ConnectionTrait>(
    db: &C,
    team_db_id: i32,
    roster: Vec<members::ActiveModel>,
) -> Result<Vec<members::Model>, DbErr> {
    if !roster.is_empty() {
        members::Entity::insert_many(roster)
            .exec_without_returning(db)
            .await?;
    }
    find_members(db, team_db_id).await
}

pub async fn find_members<C: ConnectionTrait>(
    db: &C,
    team_db_id: i32,
) -> Result<Vec<members::Model>, DbErr> {
    members::Entity::find()
        .filter(members::Column::TeamDbId.eq(team_db_id))
        .order_by_asc(members::Column::Id)
        .all(db)
        .await
}

pub async fn find_team<C: ConnectionTrait>(
    db: &C,
    team_id: &str,
) -> Result<Option<teams::Model>, DbErr> {
    teams::Entity::find()
        .filter(teams::Column::TeamId.eq(team_id))
        .one(db)
        .await
}

pub async fn get_team<C: ConnectionTrait>(db: &C, team_id: &str) -> Result<teams::Model, anyhow::Error> {
    find_team(db, team_id)
        .await?
        .ok_or_else(|| TeamError::NotFound.into())
}

pub async fn find_leader<C: ConnectionTrait>(
    db: &C,
    team_db_id: i32,
) -> Result<Option<members::Model>, DbErr> {
    members::Entity::find()
        .filter(members::Column::TeamDbId.eq(team_db_id))
        .filter(members::Column::Role.eq(MemberRole::Leader))
        .order_by_asc(members::Column::Id)
        .one(db)
        .await
}

pub async fn email_registered(db: &DbConn, email: &str) -> Result<bool, DbErr> {
    Ok(teams::Entity::find()
        .filter(teams::Column::Email.eq(email.trim()))
        .one(db)
        .await?
        .is_some())
}

async fn ensure_name_available<C: ConnectionTrait>(
    db: &C,
    name: &str,
    exclude_team: Option<i32>,
) -> Result<(), anyhow::Error> {
    let mut query = teams::Entity::find().filter(teams::Column::Name.eq(name));
    if let Some(id) = exclude_team {
        query = query.filter(teams::Column::Id.ne(id));
    }
    if query.one(db).await?.is_some() {
        return Err(TeamError::Duplicate("Team Name is already taken.".to_string()).into());
    }
    Ok(())
}

/// Member phone numbers are unique across teams and within one roster.
async fn ensure_phones_available<C: ConnectionTrait>(
    db: &C,
    roster: &[MemberParams],
    exclude_team: Option<i32>,
) -> Result<(), anyhow::Error> {
    let mut seen = HashSet::new();
    for phone in roster.iter().filter_map(|m| m.phone.as_deref()) {
        if !seen.insert(phone) {
            return Err(TeamError::Duplicate(format!(
                "Phone number {phone} is repeated within the team."
            ))
            .into());
        }
    }
    if seen.is_empty() {
        return Ok(());
    }

    let mut query =
        members::Entity::find().filter(members::Column::Phone.is_in(seen.iter().copied()));
    if let Some(id) = exclude_team {
        query = query.filter(members::Column::TeamDbId.ne(id));
    }
    if let Some(taken) = query.one(db).await? {
        return Err(TeamError::Duplicate(format!(
            "Phone number {} is already registered with another team.",
            taken.phone.unwrap_or_default()
        ))
        .into());
    }
    Ok(())
}

/// Registers a team and its roster in one transaction. The display id is
/// derived from the primary key, so the row is first written with a
/// placeholder id and then renamed.
pub async fn create_team(
    db: &DbConn,
    team_id_prefix: &str,
    params: RegisterTeamParams,
) -> Result<(teams::Model, Vec<members::Model>), anyhow::Error> {
    let name = params.team_name.trim().to_string();
    let email = params.email.trim().to_string();

    ensure_name_available(db, &name, None).await?;
    if email_registered(db, &email).await? {
        return Err(TeamError::Duplicate(
            "This Team Leader Email ID is already registered.".to_string(),
        )
        .into());
    }
    ensure_phones_available(db, &params.members, None).await?;
    if let Some(utr) = params.transaction_id.as_deref() {
        ensure_utr_available(db, utr, None).await?;
    }

    let password_hash = hash_password(&params.password)?;
    let placeholder = format!("TEMP_{}", uuid::Uuid::new_v4().simple());

    let txn = db.begin().await?;

    let team = teams::ActiveModel {
        team_id: Set(placeholder),
        name: Set(name),
        email: Set(email),
        password_hash: Set(password_hash),
        event: Set(params.event),
        transaction_id: Set(params.transaction_id),
        payment_proof: Set(None),
        payment_verified: Set(false),
        status: Set(TeamStatus::Pending),
        created_at: Set(Utc::now().fixed_offset()),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(map_unique_violation)?;

    let display_id = format_team_id(team_id_prefix, team.id);
    let mut renamed = team.into_active_model();
    renamed.team_id = Set(display_id);
    let team = renamed.update(&txn).await.map_err(map_unique_violation)?;

    let roster = params
        .members
        .into_iter()
        .enumerate()
        .map(|(i, m)| member_active_model(team.id, MemberRole::by_position(i), m))
        .collect();
    let members = insert_members(&txn, team.id, roster)
        .await
        .map_err(map_unique_violation)?;

    txn.commit().await?;

    tracing::info!(team_id = %team.team_id, members = members.len(), "Team registered");
    Ok((team, members))
}

/// Looks a team up by display id, team name or leader email and checks the password.
pub async fn login_team(
    db: &DbConn,
    LoginParams { login_id, password }: LoginParams,
) -> Result<teams::Model, anyhow::Error> {
    let login_id = login_id.trim();
    let team = teams::Entity::find()
        .filter(
            Condition::any()
                .add(teams::Column::TeamId.eq(login_id))
                .add(teams::Column::Name.eq(login_id))
                .add(teams::Column::Email.eq(login_id)),
        )
        .order_by_asc(teams::Column::Id)
        .one(db)
        .await?
        .ok_or(TeamError::UnknownLogin)?;

    if !verify_password(&password, &team.password_hash) {
        return Err(TeamError::WrongPassword.into());
    }
    Ok(team)
}

/// Confirms `password` is the team's current one, for flows that change it.
pub async fn check_current_password(
    db: &DbConn,
    team_id: &str,
    password: &str,
) -> Result<teams::Model, anyhow::Error> {
    let team = get_team(db, team_id).await?;
    if !verify_password(password, &team.password_hash) {
        return Err(TeamError::WrongOldPassword.into());
    }
    Ok(team)
}

pub async fn update_password(
    db: &DbConn,
    team_id: &str,
    new_password: &str,
) -> Result<(), anyhow::Error> {
    let team = get_team(db, team_id).await?;
    let mut team = team.into_active_model();
    team.password_hash = Set(hash_password(new_password)?);
    team.update(db).await?;

    tracing::info!(%team_id, "Team password updated");
    Ok(())
}

pub async fn get_team_with_members(
    db: &DbConn,
    team_id: &str,
) -> Result<(teams::Model, Vec<members::Model>), anyhow::Error> {
    let team = get_team(db, team_id).await?;
    let members = find_members(db, team.id).await?;
    Ok((team, members))
}

pub async fn list_teams_with_members(
    db: &DbConn,
) -> Result<Vec<(teams::Model, Vec<members::Model>)>, DbErr> {
    teams::Entity::find()
        .order_by_asc(teams::Column::Id)
        .find_with_related(members::Entity)
        .order_by_asc(members::Column::Id)
        .all(db)
        .await
}

async fn replace_roster<C: ConnectionTrait>(
    db: &C,
    team_db_id: i32,
    roster: Vec<MemberParams>,
) -> Result<Vec<members::Model>, DbErr> {
    members::Entity::delete_many()
        .filter(members::Column::TeamDbId.eq(team_db_id))
        .exec(db)
        .await?;

    let roster = roster
        .into_iter()
        .enumerate()
        .map(|(i, m)| {
            let role = m.role.unwrap_or_else(|| MemberRole::by_position(i));
            member_active_model(team_db_id, role, m)
        })
        .collect();
    insert_members(db, team_db_id, roster).await
}

/// Replaces the whole roster atomically. An empty list leaves the team with
/// no members.
pub async fn replace_members(
    db: &DbConn,
    team_id: &str,
    roster: Vec<MemberParams>,
) -> Result<Vec<members::Model>, anyhow::Error> {
    let team = get_team(db, team_id).await?;
    ensure_phones_available(db, &roster, Some(team.id)).await?;

    let txn = db.begin().await?;
    let members = replace_roster(&txn, team.id, roster).await?;
    txn.commit().await?;

    tracing::info!(%team_id, members = members.len(), "Roster replaced");
    Ok(members)
}

pub async fn admin_update_team(
    db: &DbConn,
    params: AdminUpdateTeamParams,
) -> Result<(teams::Model, Vec<members::Model>), anyhow::Error> {
    let team = get_team(db, &params.team_id).await?;
    let name = params.name.trim().to_string();

    ensure_name_available(db, &name, Some(team.id)).await?;
    ensure_phones_available(db, &params.members, Some(team.id)).await?;
    let password_hash = params.password.as_deref().map(hash_password).transpose()?;

    let txn = db.begin().await?;

    let team_db_id = team.id;
    let mut active = team.into_active_model();
    active.name = Set(name);
    active.event = Set(params.event);
    if let Some(hash) = password_hash {
        active.password_hash = Set(hash);
    }
    let team = active.update(&txn).await.map_err(map_unique_violation)?;
    let members = replace_roster(&txn, team_db_id, params.members).await?;

    txn.commit().await?;

    tracing::info!(team_id = %team.team_id, "Team updated by admin");
    Ok((team, members))
}

/// A UTR can back only one team's payment claim.
/// Rejects a UTR already recorded against a different team. The
/// `NOT_PROVIDED` placeholder is never treated as a claim.
pub async fn ensure_utr_available<C: ConnectionTrait>(
    db: &C,
    utr: &str,
    exclude_team: Option<i32>,
) -> Result<(), anyhow::Error> {
    let utr = utr.trim();
    if utr.is_empty() || utr == UTR_NOT_PROVIDED {
        return Ok(());
    }
    let mut query = teams::Entity::find().filter(teams::Column::TransactionId.eq(utr));
    if let Some(id) = exclude_team {
        query = query.filter(teams::Column::Id.ne(id));
    }
    if query.one(db).await?.is_some() {
        return Err(TeamError::Duplicate(
            "This UTR number has already been used by another team.".to_string(),
        )
        .into());
    }
    Ok(())
}

pub async fn record_payment_proof(
    db: &DbConn,
    team: teams::Model,
    utr: Option<String>,
    proof_path: String,
) -> Result<teams::Model, anyhow::Error> {
    let mut active = team.into_active_model();
    active.payment_proof = Set(Some(proof_path));
    active.transaction_id = Set(Some(utr.unwrap_or_else(|| UTR_NOT_PROVIDED.to_string())));
    let team = active.update(db).await?;

    tracing::info!(team_id = %team.team_id, "Payment proof recorded");
    Ok(team)
}
