pub mod api;
pub mod cli;
pub mod cluster;
pub mod command;
pub mod config;
pub mod error;
pub mod grace_period;
pub mod http_client;
pub mod identity;
pub mod interactive;
pub mod model;
pub mod revoke;
pub mod schedule;
pub mod upgrade;
pub mod validation;
pub mod versions;

#[cfg(test)]
mod fake_api;

#[cfg(test)]
mod schedule_test;
