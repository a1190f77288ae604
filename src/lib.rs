//! Employee Management Console
//!
//! This crate provides a role-based employee management system for HR staff,
//! employees and a manager, backed by SQLite. Shared workflows (attendance,
//! leave review, salary administration, job postings, ratings and reports)
//! live in [`domain`]; [`console`] presents them as interactive menus.

#![warn(missing_docs)]

pub mod clock;
pub mod config;
pub mod console;
pub mod domain;
pub mod error;
pub mod models;
pub mod store;
pub mod validation;
