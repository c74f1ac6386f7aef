//! Command handlers for the `mane` CLI.

mod resolve;

pub use resolve::{
    parse_resolve_args, render_outcomes, resolve_targets, run_resolve, ResolveOptions, Target,
    TargetOutcome,
};
