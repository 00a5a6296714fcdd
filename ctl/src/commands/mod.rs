mod hash_password;
mod state;

pub use hash_password::*;
pub use state::*;
