mod bridge;
mod session;

pub use bridge::TestBridge;
pub use session::{BrowserConfig, BrowserKind, new_session};
