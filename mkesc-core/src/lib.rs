//! Board-agnostic core logic for the MK ESC buzzer and power button
//!
//! This crate contains the logic that does not depend on a specific
//! timer, ADC or GPIO implementation:
//!
//! - Note notation parser and melody sequencing
//! - Shutdown button debouncer (edge detection, baseline tracking,
//!   speed-gated normal/emergency shutdown)
//! - Hardware abstraction traits (tone output, voltage sampling, speed)
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

mod fmt;

pub mod config;
pub mod melody;
pub mod shutdown;
pub mod traits;
