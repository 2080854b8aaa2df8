//! Client side of the Anchor workspace: a provider configured from the
//! environment, a registry of the workspace's programs, and helpers to invoke
//! their instructions.

mod error;
pub mod fib;
pub mod invoke;
pub mod provider;
pub mod registry;

pub use error::{Error, Result};
pub use invoke::{call_no_args, initialize, instruction_discriminator};
pub use provider::{Provider, ProviderConfig};
pub use registry::Workspace;
