pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use frameworks::server::{run, run_with_config};
