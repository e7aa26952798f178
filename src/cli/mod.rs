//! CLI operation mode handlers.
//!
//! This module contains the implementations for the two operation modes:
//! - [`one_shot`]: Analyse a single review and print the table
//! - [`interactive`]: Terminal interface for analysing reviews repeatedly
//!
//! Output helpers shared by both modes are in [`output`].

pub mod interactive;
pub mod one_shot;
pub mod output;
