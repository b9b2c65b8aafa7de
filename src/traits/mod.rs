mod provider;
mod session;

pub use provider::SessionProvider;
pub use session::{Connector, Session};
