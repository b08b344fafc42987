pub mod login_outcome;

pub use login_outcome::{LoginOutcome, LoginSession};
