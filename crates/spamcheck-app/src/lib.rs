pub mod cli;
pub mod config;
pub mod interaction;
pub mod report;
pub mod server;
pub mod state;
pub mod telemetry;

pub use cli::*;
pub use config::*;
pub use interaction::*;
pub use report::*;
pub use server::*;
pub use state::*;
