//! Outbound HTTP clients.

pub mod reqwest_probe;

pub use reqwest_probe::ReqwestProbe;
