use serde::Serialize;

/// Acknowledgment returned for every accepted delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AckResponse {
    pub ok: bool,
    pub delivery: Option<String>,
    pub event: Option<String>,
}

impl AckResponse {
    pub fn new(delivery: Option<String>, event: Option<String>) -> Self {
        Self {
            ok: true,
            delivery,
            event,
        }
    }
}

/// Static answer for `GET /webhook`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HintResponse {
    pub ok: bool,
    pub hint: &'static str,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}
