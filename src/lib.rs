//! Administrative core of the Arca By Olimpo app: form-backed entity editors,
//! filtered list screens and the use cases that reach the backend.

pub mod actor_framework;
pub mod app_system;
pub mod beneficiary;
pub mod config;
pub mod domain;
pub mod editor;
pub mod error;
pub mod forms;
pub mod listing;
pub mod product;
pub mod supply;
pub mod use_case;
pub mod user;
pub mod workshop;

#[cfg(test)]
mod mock_framework;
