//! Domain model for the "domain for sale" landing page.
//!
//! Everything here is transport-free: the app crate renders the view and the
//! relay crate performs the single outbound request.

pub mod form;
pub mod inquiry;
pub mod mailto;
pub mod starfield;
pub mod submission;

pub use form::{validate, ContactFormData, Field, ValidationErrors};
pub use inquiry::{Inquiry, InquiryRouting};
pub use mailto::{MailtoLink, FALLBACK_SUBJECT};
pub use starfield::{generate_points, generate_starfield, DecorativePoint, STAR_COUNT};
pub use submission::{ContactForm, SubmissionOutcome, SubmissionState, SubmitAttempt};
