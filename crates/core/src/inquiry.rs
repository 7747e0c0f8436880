use serde::Serialize;

use crate::form::ContactFormData;

/// Fixed addressing used for every purchase inquiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquiryRouting {
    /// Mailbox that receives inquiries and the fallback compose link.
    pub support_email: String,
    /// Domain advertised for sale, e.g. `example.com`.
    pub site_domain: String,
}

impl InquiryRouting {
    pub fn new(support_email: impl Into<String>, site_domain: impl Into<String>) -> Self {
        Self {
            support_email: support_email.into(),
            site_domain: site_domain.into(),
        }
    }

    pub fn subject(&self) -> String {
        format!("Domain Purchase Inquiry from {}", self.site_domain)
    }

    pub fn origin_address(&self) -> String {
        format!("domain@{}", self.site_domain)
    }
}

/// JSON record posted to the form-relay endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inquiry {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(rename = "_replyto")]
    pub reply_to: String,
    #[serde(rename = "_subject")]
    pub subject: String,
    #[serde(rename = "_to")]
    pub to: String,
    #[serde(rename = "_from")]
    pub from: String,
}

impl Inquiry {
    pub fn new(data: &ContactFormData, routing: &InquiryRouting) -> Self {
        Self {
            name: data.name.clone(),
            email: data.email.clone(),
            message: data.message.clone(),
            reply_to: data.email.clone(),
            subject: routing.subject(),
            to: routing.support_email.clone(),
            from: routing.origin_address(),
        }
    }
}
