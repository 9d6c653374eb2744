//! # Log Cabinet Architecture
//!
//! `logcabinet` keeps ordered, numbered, append-only text logs for evaluation
//! runs. A **cabinet** is a directory holding any number of **sheets** (one log
//! file each) and a control file that records the cabinet's name, description
//! and how many sheets it has issued.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Parses arguments, prints results, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API + Commands (api.rs, commands/*.rs)                     │
//! │  - One function per command, returning `CmdResult`          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (cabinet.rs, sheet.rs)                                │
//! │  - LogCabinet: directory lifecycle, sheet factory           │
//! │  - LogSheet: staging buffer, numbered entries, sync         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/)                                           │
//! │  - CabinetStore trait, control file, atomic replace, names  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Using the Library
//!
//! ```no_run
//! use logcabinet::cabinet::LogCabinet;
//! use std::fmt::Write;
//!
//! # fn main() -> logcabinet::error::Result<()> {
//! let mut cabinet = LogCabinet::create("run-42", "Nightly matcher run", "/var/log/eval")?;
//! let mut sheet = cabinet.new_log_sheet("matcher", "Matcher timings")?;
//! sheet.set_auto_sync(true);
//!
//! sheet.write("started")?;
//! write!(sheet, "compared {} pairs", 1000).unwrap();
//! sheet.new_entry()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Threading
//!
//! Nothing in here spawns threads or takes locks in memory. A sheet is
//! mutated through `&mut self`; share one across threads behind a `Mutex`.
//! Separate processes may share a cabinet: sheet registration holds an
//! advisory lock on `.lclock` around the control-file update.
//!
//! ## Module Overview
//!
//! - [`cabinet`]: `LogCabinet`
//! - [`sheet`]: `LogSheet` and the `SheetContents` reader
//! - [`store`]: on-disk layout, control file, name validation
//! - [`image`]: the decoder boundary evaluation code logs through
//! - [`api`] / [`commands`]: command layer behind the `lcab` binary
//! - [`config`] / [`init`]: front-end configuration
//! - [`error`]: error types

pub mod api;
pub mod cabinet;
pub mod commands;
pub mod config;
pub mod error;
pub mod image;
pub mod init;
pub mod sheet;
pub mod store;
