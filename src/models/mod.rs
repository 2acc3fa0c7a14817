// src/models/mod.rs

pub mod game;
pub mod hero;
pub mod job;
pub mod leaderboard;
pub mod question;
pub mod user;
