use models::params::team::{MemberParams, RegisterTeamParams};
use sea_orm::DatabaseConnection;
use utils::testing::setup_test_db;

mod otp;

pub const PREFIX: &str = "Xctf26te";
pub const PASSWORD: &str = "secret123";

pub async fn setup() -> DatabaseConnection {
    setup_test_db("sqlite::memory:")
        .await
        .expect("Set up db failed!")
}

pub fn member(name: &str, phone: Option<&str>) -> MemberParams {
    MemberParams {
        name: name.to_string(),
        email: Some(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
        phone: phone.map(str::to_string),
        ..Default::default()
    }
}

pub fn registration(team: &str, email: &str, phones: &[&str]) -> RegisterTeamParams {
    RegisterTeamParams {
        team_name: team.to_string(),
        email: email.to_string(),
        password: PASSWORD.to_string(),
        event: Some("CTF".to_string()),
        transaction_id: None,
        members: phones
            .iter()
            .enumerate()
            .map(|(i, phone)| member(&format!("{team} {i}"), Some(phone)))
            .collect(),
    }
}
