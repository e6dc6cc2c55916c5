pub mod commands;
pub mod config;
pub mod session;
pub mod translate;

pub use commands::{Interpreter, Outcome};
pub use config::Config;
pub use session::{Reply, Session};
pub use translate::Translator;
