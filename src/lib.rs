//! HR engine for restaurant crew: attendance, payroll and churn risk.
//!
//! This crate aggregates monthly attendance from roster uploads, drafts
//! payroll with tenure-tiered salaries and first-month pro-ration, scores
//! employee churn risk with a logistic model, and runs the cash advance and
//! probation contract workflows around them. The calculators are pure; the
//! [`service`] layer moves data between them and an [`store::HrStore`].

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
