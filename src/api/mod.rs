pub mod attendance;
pub mod shift;
pub mod staff;
