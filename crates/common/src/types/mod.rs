use serde::Serialize;

/// Liveness probe payload.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Plain acknowledgement body, e.g. for deletes and logout.
#[derive(Serialize, Debug)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
