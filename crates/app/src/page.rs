use maud::{html, Markup, PreEscaped, DOCTYPE};

use forsale_core::{
    ContactForm, DecorativePoint, Field, InquiryRouting, MailtoLink, SubmissionState,
};

const FONT_STYLESHEET: &str =
    "https://fonts.googleapis.com/css2?family=Roboto:wght@300;400;500;700&display=swap";

const MESSAGE_PLACEHOLDER: &str = "Tell us why you're interested in this domain...";

// Re-entrancy guard for the browser: once the form is posted the button stays
// disabled until the next page arrives. This is the only double-submit guard
// on the HTTP path; server renders never show an in-flight form.
const SUBMIT_GUARD_SCRIPT: &str = "var b=this.querySelector('button[type=submit]');\
if(b.disabled){return false;}b.disabled=true;b.textContent='Sending...';";

/// Everything the landing page needs for one render.
pub struct PageView<'a> {
    pub stars: &'a [DecorativePoint],
    pub routing: &'a InquiryRouting,
    pub form: &'a ContactForm,
    /// Compose link the browser is sent to after a failed submission.
    pub fallback: Option<&'a MailtoLink>,
}

pub fn render_page(view: &PageView<'_>) -> Markup {
    let support = view.routing.support_email.as_str();
    let contact_href = MailtoLink::to(support).href();

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                @if let Some(link) = view.fallback {
                    meta http-equiv="refresh" content=(format!("0; url={}", link.href()));
                }
                title { (view.routing.site_domain) " is for sale" }
                link href=(FONT_STYLESHEET) rel="stylesheet";
                style { (PreEscaped(STYLESHEET)) }
            }
            body {
                div.starfield aria-hidden="true" {
                    @for star in view.stars {
                        div.star style=(star_style(star)) {}
                    }
                }
                main {
                    section.hero {
                        div.hero-inner {
                            h1 { "This Domain is Available for Purchase" }
                            p { "If you're interested in buying this domain, get in touch with us today." }
                        }
                    }
                    section.contact-button {
                        a.email-button href=(contact_href) {
                            (PreEscaped(MAIL_ICON))
                            "Contact Us via Email"
                        }
                    }
                    section.contact-form {
                        div.form-inner {
                            h3 { "Send Us a Message" }
                            p.form-intro { "Fill out the form below and we'll get back to you as soon as possible." }
                            (status_banner(view))
                            (contact_form(view.form))
                        }
                    }
                }
                footer {
                    div.footer-inner {
                        p.footer-contact {
                            "Contact us at "
                            a href=(contact_href) { (support) }
                        }
                        p.footer-rights { "All rights reserved." }
                    }
                }
            }
        }
    }
}

fn status_banner(view: &PageView<'_>) -> Markup {
    let support = view.routing.support_email.as_str();
    match view.form.state() {
        SubmissionState::Succeeded => html! {
            div.banner.banner-success role="status" {
                "Thank you! Your message has been sent successfully."
            }
        },
        SubmissionState::Failed => {
            let href = view
                .fallback
                .map(MailtoLink::href)
                .unwrap_or_else(|| MailtoLink::to(support).href());
            html! {
                div.banner.banner-error role="status" {
                    "Your default email client should open. If not, please email us directly at "
                    a href=(href) { (support) }
                }
            }
        }
        SubmissionState::Idle | SubmissionState::InFlight => html! {},
    }
}

/// The disabled "Sending..." button is rendered for in-flight forms only,
/// which `POST /contact` never produces.
fn contact_form(form: &ContactForm) -> Markup {
    let data = form.data();
    let errors = form.errors();
    let submitting = form.is_submitting();

    html! {
        form #contact-form method="post" action="/contact" onsubmit=(SUBMIT_GUARD_SCRIPT) {
            div.field {
                (field_label(Field::Name, "Name"))
                input #name .invalid[errors.contains(Field::Name)]
                    type="text" name="name" value=(data.name);
                (field_error(form, Field::Name))
            }
            div.field {
                (field_label(Field::Email, "Email"))
                input #email .invalid[errors.contains(Field::Email)]
                    type="email" name="email" value=(data.email);
                (field_error(form, Field::Email))
            }
            div.field.field-last {
                (field_label(Field::Message, "Message"))
                textarea #message .invalid[errors.contains(Field::Message)]
                    name="message" rows="6" placeholder=(MESSAGE_PLACEHOLDER) {
                    (data.message)
                }
                (field_error(form, Field::Message))
            }
            button type="submit" disabled[submitting] {
                @if submitting { "Sending..." } @else { "Send Message" }
            }
        }
    }
}

fn field_label(field: Field, text: &str) -> Markup {
    html! {
        label for=(field.as_str()) {
            (text) " " span.required { "*" }
        }
    }
}

fn field_error(form: &ContactForm, field: Field) -> Markup {
    html! {
        @if let Some(message) = form.errors().get(field) {
            p.field-error { (message) }
        }
    }
}

fn star_style(star: &DecorativePoint) -> String {
    format!(
        "left:{:.3}%;top:{:.3}%;width:{size:.3}px;height:{size:.3}px;\
         box-shadow:0 0 {:.3}px {:.3}px rgba(224,170,255,0.3);\
         animation:twinkle {:.3}s infinite {:.3}s",
        star.left_pct,
        star.top_pct,
        star.glow_blur_px(),
        star.glow_spread_px(),
        star.duration_secs,
        star.delay_secs,
        size = star.size_px,
    )
}

const MAIL_ICON: &str = r#"<svg width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><rect x="2" y="4" width="20" height="16" rx="2"/><path d="m22 7-8.97 5.7a1.94 1.94 0 0 1-2.06 0L2 7"/></svg>"#;

const STYLESHEET: &str = r#"
*{box-sizing:border-box}
body{margin:0;font-family:'Roboto',sans-serif;min-height:100vh;display:flex;flex-direction:column;background-color:#10002b;position:relative;overflow-x:hidden}
.starfield{position:fixed;top:0;left:0;width:100%;height:100%;z-index:0;background:radial-gradient(ellipse at bottom,#240046 0%,#10002b 100%)}
.star{position:absolute;background-color:#e0aaff;border-radius:50%}
main{flex:1;position:relative;z-index:1}
.hero{padding:6rem 2rem 4rem;text-align:center}
.hero-inner{max-width:900px;margin:0 auto}
.hero h1{font-size:4rem;margin:0 0 1.5rem 0;color:#e0aaff;line-height:1.2;font-weight:700;text-shadow:0 0 40px rgba(224,170,255,0.5),0 0 80px rgba(157,78,221,0.3);letter-spacing:-0.02em}
.hero p{font-size:1.5rem;color:#c77dff;margin:0;font-weight:300;line-height:1.6}
.contact-button{padding:3rem 2rem;text-align:center}
.email-button{display:inline-flex;align-items:center;justify-content:center;gap:0.75rem;background-color:rgba(157,78,221,0.2);color:#e0aaff;padding:1.25rem 3rem;text-decoration:none;border-radius:50px;font-size:1.25rem;font-weight:500;transition:all 0.3s;border:2px solid rgba(157,78,221,0.5);backdrop-filter:blur(10px);box-shadow:0 8px 32px rgba(157,78,221,0.2)}
.email-button:hover{background-color:rgba(157,78,221,0.3);border-color:#9d4edd;box-shadow:0 12px 48px rgba(157,78,221,0.4);transform:translateY(-2px)}
.contact-form{padding:4rem 2rem 6rem}
.form-inner{max-width:600px;margin:0 auto}
.form-inner h3{font-size:2.5rem;margin:0 0 1rem 0;color:#e0aaff;text-align:center;font-weight:600;text-shadow:0 0 30px rgba(224,170,255,0.3)}
.form-intro{text-align:center;color:#c77dff;margin-bottom:3rem;font-size:1.125rem;font-weight:300}
.banner{color:#e0aaff;padding:1rem;border-radius:12px;margin-bottom:1.5rem;text-align:center;backdrop-filter:blur(10px)}
.banner a{color:#e0aaff}
.banner-success{background-color:rgba(157,78,221,0.2);border:1px solid rgba(157,78,221,0.5)}
.banner-error{background-color:rgba(199,125,255,0.15);border:1px solid rgba(199,125,255,0.4)}
form{background-color:rgba(36,0,70,0.4);padding:2.5rem;border-radius:20px;border:1px solid rgba(157,78,221,0.3);backdrop-filter:blur(20px);box-shadow:0 8px 32px rgba(0,0,0,0.3)}
.field{margin-bottom:1.75rem}
.field-last{margin-bottom:2rem}
label{display:block;margin-bottom:0.75rem;color:#e0aaff;font-weight:500;font-size:1rem}
.required{color:#c77dff}
input,textarea{width:100%;padding:1rem;background-color:rgba(16,0,43,0.6);border:1px solid rgba(157,78,221,0.4);border-radius:12px;font-size:1rem;outline:none;transition:all 0.3s;color:#e0aaff;font-family:'Roboto',sans-serif}
textarea{resize:vertical}
input:focus:not(.invalid),textarea:focus:not(.invalid){border-color:#9d4edd;box-shadow:0 0 0 3px rgba(157,78,221,0.1)}
input.invalid,textarea.invalid{border:2px solid #c77dff}
input::placeholder,textarea::placeholder{color:rgba(157,78,221,0.5)}
.field-error{color:#c77dff;font-size:0.875rem;margin-top:0.5rem;margin-bottom:0}
button{width:100%;background-color:rgba(157,78,221,0.4);color:#e0aaff;padding:1.25rem;border:2px solid #9d4edd;border-radius:12px;font-size:1.125rem;font-weight:600;cursor:pointer;transition:all 0.3s;backdrop-filter:blur(10px);box-shadow:0 4px 20px rgba(157,78,221,0.3)}
button:hover:not(:disabled){background-color:rgba(157,78,221,0.6);box-shadow:0 6px 30px rgba(157,78,221,0.5);transform:translateY(-2px)}
button:disabled{background-color:rgba(157,78,221,0.3);border-color:rgba(157,78,221,0.4);cursor:not-allowed;box-shadow:none}
footer{background-color:rgba(16,0,43,0.8);border-top:1px solid rgba(157,78,221,0.2);color:#c77dff;padding:2rem;text-align:center;position:relative;z-index:1;backdrop-filter:blur(10px)}
.footer-inner{max-width:1200px;margin:0 auto}
.footer-contact{margin:0 0 0.5rem 0;font-size:1rem;font-weight:300}
.footer-contact a{color:#e0aaff;text-decoration:none;border-bottom:1px solid rgba(224,170,255,0.5);transition:all 0.3s}
.footer-rights{margin:0.5rem 0 0 0;color:#9d4edd;font-size:0.875rem}
@keyframes twinkle{0%,100%{opacity:0.3;transform:scale(1)}50%{opacity:1;transform:scale(1.2)}}
@media (max-width:768px){.hero h1{font-size:2.5rem;padding:0 1rem}.hero p{font-size:1.125rem;padding:0 1rem}.form-inner h3{font-size:2rem}form{padding:1.75rem}}
@media (max-width:480px){.hero{padding:4rem 1rem 3rem}.hero h1{font-size:2rem}.hero p{font-size:1rem}.email-button{padding:1rem 2rem;font-size:1.125rem}form{padding:1.5rem}}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use forsale_core::{generate_starfield, ContactFormData, SubmissionOutcome, STAR_COUNT};

    fn routing() -> InquiryRouting {
        InquiryRouting::new("owner@example.com", "forsale.test")
    }

    fn render(form: &ContactForm, fallback: Option<&MailtoLink>) -> String {
        let stars = generate_starfield();
        let routing = routing();
        render_page(&PageView {
            stars: &stars,
            routing: &routing,
            form,
            fallback,
        })
        .into_string()
    }

    #[test]
    fn idle_page_renders_every_star_and_copy() {
        let html = render(&ContactForm::new(), None);
        assert_eq!(html.matches("class=\"star\"").count(), STAR_COUNT);
        assert!(html.contains("This Domain is Available for Purchase"));
        assert!(html.contains("href=\"mailto:owner@example.com\""));
        assert!(html.contains("<button type=\"submit\">Send Message</button>"));
        assert!(!html.contains("http-equiv=\"refresh\""));
        assert!(!html.contains("role=\"status\""));
    }

    #[test]
    fn invalid_fields_show_inline_errors() {
        let mut form = ContactForm::with_data(ContactFormData::new("", "nope", ""));
        form.validate();
        let html = render(&form, None);
        assert!(html.contains("Name is required"));
        assert!(html.contains("Please enter a valid email address"));
        assert!(html.contains("Message is required"));
        assert!(html.contains("value=\"nope\""));
        assert_eq!(html.matches("class=\"invalid\"").count(), 3);
    }

    #[test]
    fn failure_page_redirects_to_compose_link() {
        let routing = routing();
        let mut form = ContactForm::with_data(ContactFormData::new("Al", "al@x.io", "<hi>"));
        form.begin_submit(&routing);
        let link = form
            .complete_submit(SubmissionOutcome::Failed, &routing)
            .expect("fallback link");

        let html = render(&form, Some(&link));
        assert!(html.contains("http-equiv=\"refresh\""));
        assert!(html.contains("mailto:owner@example.com?subject=Domain%20Purchase%20Inquiry"));
        assert!(html.contains("Your default email client should open."));
        assert!(html.contains("&lt;hi&gt;"));
    }

    #[test]
    fn in_flight_form_disables_button() {
        let mut form = ContactForm::with_data(ContactFormData::new("Al", "al@x.io", "hi"));
        form.begin_submit(&routing());
        let html = render(&form, None);
        assert!(html.contains("<button type=\"submit\" disabled>Sending...</button>"));
    }

    #[test]
    fn star_style_carries_animation_timing() {
        let style = star_style(&DecorativePoint {
            id: 3,
            left_pct: 12.5,
            top_pct: 50.0,
            size_px: 2.0,
            duration_secs: 4.0,
            delay_secs: 0.5,
        });
        assert!(style.starts_with("left:12.500%;top:50.000%;width:2.000px;height:2.000px;"));
        assert!(style.contains("box-shadow:0 0 4.000px 1.000px"));
        assert!(style.ends_with("animation:twinkle 4.000s infinite 0.500s"));
    }
}
