//! Action parsing
//!
//! Turns the raw text of an agent action into a structured [`Action`].
//! Parsing is strict: no fence stripping or JSON repair is attempted,
//! because a malformed call is exactly what the evaluation must record.
//!
//! # Example
//!
//! ```rust
//! use toolproof_core::parsing::{parse_action, is_well_formed};
//!
//! let action = parse_action(r#"{"tool": "get_price_alpha", "arguments": {"ticker": "IBM"}}"#)?;
//! is_well_formed(&action)?;
//! assert_eq!(action.tool, "get_price_alpha");
//! # Ok::<(), toolproof_core::parsing::ActionError>(())
//! ```

mod action;
mod parser;

pub use action::{Action, ActionError, ActionParser, is_well_formed, parse_action};
pub use parser::OutputParser;
