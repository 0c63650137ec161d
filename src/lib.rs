//! Waifu API - a conversational relay in front of a text-generation backend.
//!
//! Each (tenant, user) pair owns one bounded rolling transcript. A turn
//! sanitizes the caller's message, optionally translates it into English,
//! folds it into the transcript under a fixed character budget, asks the
//! completion backend to continue, stores the result and translates the
//! reply back.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
