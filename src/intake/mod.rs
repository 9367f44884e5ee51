//! Patient intake: case files, the interactive form, and form-range checks.

pub mod case;
pub mod prompt;
pub mod validation;

pub use case::{labs_entered, load_case, meld3_from_labs, parse_case, LiverInput, PatientCase};
pub use prompt::{run_interactive, Prompter};
pub use validation::{validate_case, FormRange};
