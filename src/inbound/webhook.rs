// Inbound webhook pipeline.
//
// `signature` and `recent_deliveries` run inside the request: the HMAC gate
// over the raw body, then the bounded log read by GET /deliveries.
// `worker` and `dispatcher` run after the response: a fire-and-forget queue
// feeds persistence and event-name routing to pluggable handlers.

pub mod dispatcher;
pub mod recent_deliveries;
pub mod signature;
pub mod worker;

pub use dispatcher::EventDispatcher;
pub use recent_deliveries::RecentDeliveries;
pub use signature::{SignatureVerifier, format_signature_header, sign, verify_signature};
pub use worker::DeliveryWorker;
