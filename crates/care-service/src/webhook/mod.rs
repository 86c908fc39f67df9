//! Stripe webhook deliveries: signature verification and event parsing

mod event;
mod signature;

pub use event::{CheckoutSession, EventData, WebhookEvent, CHECKOUT_SESSION_COMPLETED};
pub use signature::{
    sign_payload, verify_signature, SignatureError, SIGNATURE_HEADER, TOLERANCE_SECS,
};
