pub mod attendance;
pub mod members;
pub mod sea_orm_active_enums;
pub mod teams;
