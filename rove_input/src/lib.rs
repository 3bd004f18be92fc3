// Copyright 2025 the Rove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rove Input: the input event model for the Rove focus controllers.
//!
//! Hosts translate their platform's keyboard events into [`KeyEvent`]s and
//! feed them to `rove_zone`. The crate also provides the two timing
//! primitives the focus layer needs on a single-threaded event loop:
//!
//! - [`NavQuiet`]: a debounce that suppresses mouse-hover-driven focus
//!   changes while keyboard/wheel navigation is in flight. Timestamps come
//!   from the caller; nothing here owns a clock.
//! - [`Deferred`]: a one-shot "next tick" action, armed by a controller and
//!   drained by the host after the platform has finished its own update.
//!   Cancelled on teardown so stale containers are never touched.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod key;
mod timing;

pub use key::{CaretInfo, Key, KeyEvent, Modifiers};
pub use timing::{Deferred, NavQuiet};
