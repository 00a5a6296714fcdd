//! Types shared between the mcontrol API server and its tooling.

pub mod params;
pub mod views;
