pub mod alive_state;
pub mod issue;
