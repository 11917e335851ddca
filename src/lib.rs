// SPDX-License-Identifier: MPL-2.0
//! `toastline` manages the lifecycle of transient UI notifications
//! (toasts/alerts): a bounded set of active notifications with pausable
//! auto-expiry timers, a FIFO overflow queue, and a synchronous
//! subscribe/notify contract for the rendering layer.
//!
//! The crate is rendering-agnostic. It exposes data and callbacks; how a
//! notification is painted, animated, or positioned is entirely up to the
//! consumer, which subscribes to the active list and re-renders on change.
//!
//! # Example
//!
//! ```
//! use toastline::config::ManagerConfig;
//! use toastline::manager::Manager;
//! use toastline::notification::{Expiry, Notification};
//!
//! let mut manager = Manager::with_config(ManagerConfig {
//!     limit: 2,
//!     duration: Expiry::from_millis(6000),
//!     static_mode: false,
//! });
//!
//! manager.subscribe(|notifications| {
//!     // Repaint the toast area from this snapshot.
//!     let _ = notifications.len();
//! });
//!
//! let id = manager.add(Notification::success("Image saved"));
//!
//! // Pump expiry from the host's event loop (e.g. every 100-500ms):
//! manager.tick();
//!
//! // Hover-to-pause, then resume on mouse-out:
//! manager.pause(&id);
//! manager.resume(&id);
//! ```

#![doc(html_root_url = "https://docs.rs/toastline/0.1.0")]

pub mod config;
pub mod error;
pub mod id;
pub mod manager;
pub mod notification;
pub mod store;
pub mod timer;
