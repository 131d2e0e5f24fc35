//! CLI subcommands.

pub mod check;
pub mod prerender;
pub mod slugs;
