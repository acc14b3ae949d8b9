//! Shared types for the Formrun form submission handler.
//!
//! These types describe the data that flows through a single submission:
//! the [`Payload`] built from form fields, the [`ResponseEnvelope`] returned by
//! the workflow service, the classified [`SubmitOutcome`], and the per-form
//! [`UiState`]. [`FormVariant`] records which of the two handler flavors a
//! form is bound to and knows the endpoint it posts to.

pub mod envelope;
pub mod payload;
pub mod state;
pub mod variant;

pub use envelope::{ResponseEnvelope, UNKNOWN_ERROR};
pub use payload::{DEFAULT_NAME, NAME_FIELD, Payload};
pub use state::{SubmitOutcome, UiState};
pub use variant::FormVariant;
