pub mod attendance;
pub mod team;
