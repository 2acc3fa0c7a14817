// src/handlers/mod.rs

pub mod admin;
pub mod auth;
pub mod game;
pub mod hero;
pub mod jobs;
pub mod leaderboard;
