//! verifies the email address of accounts held in a remote identity
//! directory, one at a time or in batches read from csv files.

pub mod error;
pub mod config;
pub mod input;
pub mod lookup;
pub mod verify;
pub mod batch;
pub mod scan;
pub mod output;
pub mod commands;
pub mod cli;
