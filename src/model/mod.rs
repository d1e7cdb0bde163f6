pub mod fixture;
pub mod match_state;
pub mod team;
