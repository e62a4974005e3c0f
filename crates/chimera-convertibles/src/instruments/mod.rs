//! Instrument definitions for convertible hybrid securities.
//!
//! - [`HybridSecurity`]: the immutable security specification
//! - [`HybridSecurityBuilder`]: fluent construction with market defaults
//! - [`IpoRefixing`]: the optional IPO-conditional refixing event
//! - [`SecurityType`]: RCPS / CB / CPS classification

mod hybrid;

pub use hybrid::{HybridSecurity, HybridSecurityBuilder, IpoRefixing, SecurityType};
