//! Port traits between the domain and its collaborators.

pub mod chart_port;
pub mod config_port;
pub mod data_port;
