use crate::form::{validate, ContactFormData, Field, ValidationErrors};
use crate::inquiry::{Inquiry, InquiryRouting};
use crate::mailto::MailtoLink;

/// Lifecycle of the contact form submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

impl SubmissionState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::InFlight => "in_flight",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

/// Result of asking the form to start a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Validation failed; errors are recorded on the form.
    Invalid,
    /// A submission is already outstanding.
    Busy,
    /// The form moved to in-flight; send this record to the relay.
    Ready(Inquiry),
}

/// How the relay answered an in-flight submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted,
    Failed,
}

impl<T, E> From<&Result<T, E>> for SubmissionOutcome {
    fn from(result: &Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::Accepted,
            Err(_) => Self::Failed,
        }
    }
}

/// State of one contact form view: values, errors and submission lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    data: ContactFormData,
    errors: ValidationErrors,
    state: SubmissionState,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an idle form with already-entered values.
    pub fn with_data(data: ContactFormData) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    pub fn data(&self) -> &ContactFormData {
        &self.data
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Returns `true` while the submit control must stay disabled.
    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::InFlight
    }

    /// Overwrites one field and drops its recorded error, if any.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        self.data.set(field, value);
        self.errors.clear(field);
    }

    /// Recomputes every field error and returns whether the form is valid.
    pub fn validate(&mut self) -> bool {
        self.errors = validate(&self.data);
        self.errors.is_empty()
    }

    /// Validates and, when possible, moves the form to in-flight.
    ///
    /// A form that is already in flight is left untouched, so a second
    /// trigger never yields a second outbound request.
    pub fn begin_submit(&mut self, routing: &InquiryRouting) -> SubmitAttempt {
        if self.is_submitting() {
            return SubmitAttempt::Busy;
        }
        if !self.validate() {
            return SubmitAttempt::Invalid;
        }

        self.state = SubmissionState::InFlight;
        SubmitAttempt::Ready(Inquiry::new(&self.data, routing))
    }

    /// Applies the relay outcome to an in-flight form.
    ///
    /// Acceptance clears the fields. Failure keeps them and returns the
    /// compose link the view must navigate to. Calls made while no submission
    /// is in flight are ignored.
    pub fn complete_submit(
        &mut self,
        outcome: SubmissionOutcome,
        routing: &InquiryRouting,
    ) -> Option<MailtoLink> {
        if !self.is_submitting() {
            return None;
        }

        match outcome {
            SubmissionOutcome::Accepted => {
                self.state = SubmissionState::Succeeded;
                self.data = ContactFormData::default();
                None
            }
            SubmissionOutcome::Failed => {
                self.state = SubmissionState::Failed;
                Some(MailtoLink::fallback(&routing.support_email, &self.data))
            }
        }
    }
}
