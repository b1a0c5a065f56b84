//! TFT match tracker: enrolls Riot accounts, polls them for finished games
//! and rank moves, and posts result cards to Discord.

pub mod config;
pub mod db;
pub mod discord;
pub mod error;
pub mod logging;
pub mod notify;
pub mod poller;
pub mod riot;
pub mod tracking;
