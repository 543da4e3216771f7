//! Native build orchestration

pub mod cmake;
