//! # Dentcrm Architecture
//!
//! Dentcrm is the **client-side record store** of a dental-clinic CRM. The clinic's full
//! record lifecycle (appointments, invoices, UDI traceability, staff) lives in a relational
//! backend; this library mirrors the read-mostly subset a front end needs for fast local
//! rendering (patients and inventory) plus the current login session, and keeps it on the
//! local device between runs.
//!
//! Like any front-end state container it is UI-agnostic: the bundled CLI is one view layer,
//! a desktop or web shell could be another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders tables, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, returns `CmdResult`           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Assigns ids, builds records, reports what happened       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Record Store (store/)                                      │
//! │  - Owns the current snapshot, lifecycle, listeners          │
//! │  - Persists through an injected `StorageBackend`            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  State (state/)                                             │
//! │  - `StoreState` aggregate, one sub-struct per slice         │
//! │  - Pure transitions, no I/O                                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshots
//!
//! Readers get a [`state::Snapshot`], an `Arc` over the whole state. Mutations never touch a
//! value somebody else can see: the store copies on write, so a snapshot taken before a
//! mutation stays exactly as it was.
//!
//! ## Persistence
//!
//! The whole state is written after every mutation as one JSON object:
//!
//! ```text
//! { "patients": [...], "inventory": [...], "session": {...} | null }
//! ```
//!
//! A missing or unreadable blob is never an error; the store starts from the empty default.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Per-operation logic and `CmdResult`
//! - [`store`]: `RecordStore` and the storage backends
//! - [`state`]: The state aggregate and its slices
//! - [`model`]: Record types (`Session`, `PatientSummary`, `ProductSummary`)
//! - [`config`]: `config.json` and data directory resolution
//! - [`logging`]: tracing subscriber setup for binaries
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod state;
pub mod store;
