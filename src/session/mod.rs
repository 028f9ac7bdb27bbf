mod controller;
mod loop_worker;

pub use controller::SessionController;
pub use loop_worker::{run_session, SessionOutcome};
