//! Admin session handling: the storage abstraction and the login gate.

pub mod gate;
pub mod storage;

pub use gate::{Clock, SessionGate, SessionStatus, SystemClock};
pub use storage::{CookieSessionStorage, MemoryStorage, SessionStorage};
