//! Gitignore-style exclusion rules
//!
//! Patterns are compiled one line at a time into [`IgnoreRule`]s and evaluated
//! as an ordered [`IgnoreRuleSet`] where the last matching rule decides.

pub mod builtin;
pub mod rule;
pub mod rule_set;

pub use builtin::BuiltinRules;
pub use rule::{IgnoreRule, SourceLocation};
pub use rule_set::{IgnoreRuleSet, build_rule_set};
