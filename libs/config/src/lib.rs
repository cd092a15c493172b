//! # vAMM Configuration
//!
//! Centralized numeric scales and repeg policy for the vAMM pricing core.
//! The defaults reproduce the constants of the on-chain clearing house, so
//! an empty configuration prices exactly like the program it previews.
//!
//! ## Features
//!
//! - **Precision**: mark price, peg, AMM reserve, quote and price-spread scales
//! - **Repeg Policy**: budget caps and fee-share ratios for peg adjustments
//! - **Settings Loader**: TOML files with environment-specific overrides
//!
//! ## Usage
//!
//! ```rust
//! use vamm_config::{PrecisionConfig, VammSettings};
//!
//! let settings = VammSettings::default();
//! assert_eq!(settings.precision, PrecisionConfig::default());
//! assert_eq!(settings.precision.mark_price, 10_000_000_000);
//! ```

pub mod precision;
pub mod repeg;
pub mod settings;

// Re-export commonly used types
pub use precision::PrecisionConfig;
pub use repeg::RepegConfig;
pub use settings::{load_settings, VammSettings};
