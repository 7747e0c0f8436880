use std::time::Instant;

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use metrics::{counter, histogram};
use tracing::{info, warn};
use uuid::Uuid;

use forsale_core::{
    ContactForm, ContactFormData, InquiryRouting, MailtoLink, SubmissionOutcome, SubmitAttempt,
};
use forsale_relay::RelayClient;

use crate::page::{render_page, PageView};
use crate::problem::ProblemResponse;
use crate::router::AppState;

/// Serves the landing page with an empty, idle form.
pub async fn index(State(state): State<AppState>) -> Response {
    let form = ContactForm::new();
    render(&state, &form, None, StatusCode::OK)
}

/// Receives the posted form and runs one submission for it.
///
/// Every post seeds a fresh idle `ContactForm`, so the server never observes
/// an in-flight form here. Double submits are prevented in the browser by the
/// page's `onsubmit` guard, not by this handler.
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Form<ContactFormData>, FormRejection>,
) -> Result<Response, ProblemResponse> {
    let Form(data) = payload.map_err(|err| {
        ProblemResponse::new(StatusCode::BAD_REQUEST, "invalid_form", err.body_text())
    })?;

    let mut form = ContactForm::with_data(data);
    let fallback = drive_submission(state.relay(), state.routing(), &mut form).await;

    let status = if form.errors().is_empty() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    Ok(render(&state, &form, fallback.as_ref(), status))
}

/// Validates, posts to the relay once, and applies the outcome to `form`.
///
/// Returns the compose link the browser must be sent to when the relay did
/// not accept the inquiry. A form that is already in flight is left alone and
/// no request is sent; `submit` always passes an idle form, so that branch
/// only matters to callers that keep one form across triggers.
pub async fn drive_submission(
    relay: &RelayClient,
    routing: &InquiryRouting,
    form: &mut ContactForm,
) -> Option<MailtoLink> {
    let submission_id = Uuid::new_v4();
    let inquiry = match form.begin_submit(routing) {
        SubmitAttempt::Ready(inquiry) => inquiry,
        SubmitAttempt::Invalid => {
            counter!("contact_submissions_total", "result" => "invalid").increment(1);
            let fields: Vec<&str> = form.errors().iter().map(|(field, _)| field.as_str()).collect();
            info!(stage = "contact", %submission_id, ?fields, "contact form failed validation");
            return None;
        }
        SubmitAttempt::Busy => {
            warn!(stage = "contact", %submission_id, "submission already in flight; ignoring trigger");
            return None;
        }
    };

    info!(
        stage = "contact",
        %submission_id,
        name_len = inquiry.name.len(),
        message_len = inquiry.message.len(),
        "relaying inquiry"
    );

    let start = Instant::now();
    let result = relay.submit(&inquiry).await;
    histogram!("relay_request_seconds").record(start.elapsed().as_secs_f64());

    match &result {
        Ok(()) => info!(stage = "contact", %submission_id, "relay accepted inquiry"),
        Err(err) => warn!(
            stage = "contact",
            %submission_id,
            kind = err.kind(),
            error = %err,
            "relay submission failed; handing off to mail client"
        ),
    }

    let fallback = form.complete_submit(SubmissionOutcome::from(&result), routing);
    counter!("contact_submissions_total", "result" => form.state().as_str()).increment(1);
    fallback
}

fn render(
    state: &AppState,
    form: &ContactForm,
    fallback: Option<&MailtoLink>,
    status: StatusCode,
) -> Response {
    let markup = render_page(&PageView {
        stars: state.stars(),
        routing: state.routing(),
        form,
        fallback,
    });
    (status, markup).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use forsale_core::{Field, SubmissionState, FALLBACK_SUBJECT};
    use httpmock::prelude::*;

    fn routing() -> InquiryRouting {
        InquiryRouting::new("owner@example.com", "forsale.test")
    }

    fn relay(server: &MockServer) -> RelayClient {
        RelayClient::from_endpoint(&server.url("/f/test")).expect("relay client")
    }

    fn alice() -> ContactFormData {
        ContactFormData::new("Alice", "alice@example.com", "Interested")
    }

    #[tokio::test]
    async fn accepted_inquiry_resets_form_without_fallback() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/f/test");
                then.status(200);
            })
            .await;

        let mut form = ContactForm::with_data(alice());
        let fallback = drive_submission(&relay(&server), &routing(), &mut form).await;

        mock.assert_hits_async(1).await;
        assert!(fallback.is_none());
        assert_eq!(form.state(), SubmissionState::Succeeded);
        assert!(form.data().is_empty());
    }

    #[tokio::test]
    async fn rejected_inquiry_keeps_values_and_falls_back_once() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/f/test");
                then.status(500).body("down");
            })
            .await;

        let mut form = ContactForm::with_data(alice());
        let fallback = drive_submission(&relay(&server), &routing(), &mut form)
            .await
            .expect("failure yields fallback");

        mock.assert_hits_async(1).await;
        assert_eq!(form.state(), SubmissionState::Failed);
        assert_eq!(form.data(), &alice());
        assert_eq!(fallback.subject.as_deref(), Some(FALLBACK_SUBJECT));
        assert_eq!(
            fallback.body.as_deref(),
            Some("Name: Alice\nEmail: alice@example.com\nMessage: Interested")
        );
    }

    #[tokio::test]
    async fn transport_error_is_treated_like_rejection() {
        let relay = RelayClient::from_endpoint("http://127.0.0.1:1/f/none").expect("relay client");
        let mut form = ContactForm::with_data(alice());

        let fallback = drive_submission(&relay, &routing(), &mut form).await;
        assert!(fallback.is_some());
        assert_eq!(form.state(), SubmissionState::Failed);
    }

    #[tokio::test]
    async fn empty_form_never_reaches_relay() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200);
            })
            .await;

        let mut form = ContactForm::new();
        let fallback = drive_submission(&relay(&server), &routing(), &mut form).await;

        mock.assert_hits_async(0).await;
        assert!(fallback.is_none());
        assert_eq!(form.state(), SubmissionState::Idle);
        assert_eq!(form.errors().len(), 3);
        assert!(form.errors().contains(Field::Name));
    }

    #[tokio::test]
    async fn trigger_while_in_flight_sends_nothing() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200);
            })
            .await;

        let mut form = ContactForm::with_data(alice());
        assert!(matches!(form.begin_submit(&routing()), SubmitAttempt::Ready(_)));

        let fallback = drive_submission(&relay(&server), &routing(), &mut form).await;
        mock.assert_hits_async(0).await;
        assert!(fallback.is_none());
        assert_eq!(form.state(), SubmissionState::InFlight);
    }
}
