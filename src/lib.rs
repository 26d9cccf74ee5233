//! Message board service: a small actix-web JSON API over a pooled MySQL
//! store, plus the static web client it serves and a terminal CLI.

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
