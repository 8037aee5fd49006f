use serde::Serialize;

/// Meaning of a record's `response` field once the configured markers are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Response {
    InPerson,
    Remote,
    /// Any token that matches neither marker (legacy ledgers, hand edits).
    Other(String),
}

impl Response {
    pub fn is_in_person(&self) -> bool {
        matches!(self, Response::InPerson)
    }
}

/// Literal tokens stored in the ledger for in-person / remote days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub yes: String,
    pub no: String,
}

impl Markers {
    pub fn new(yes: impl Into<String>, no: impl Into<String>) -> Self {
        Self {
            yes: yes.into(),
            no: no.into(),
        }
    }

    /// Convert stored string → enum
    pub fn classify(&self, raw: &str) -> Response {
        if raw == self.yes {
            Response::InPerson
        } else if raw == self.no {
            Response::Remote
        } else {
            Response::Other(raw.to_string())
        }
    }

    /// Convert enum → stored string
    pub fn marker_for(&self, response: &Response) -> String {
        match response {
            Response::InPerson => self.yes.clone(),
            Response::Remote => self.no.clone(),
            Response::Other(raw) => raw.clone(),
        }
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::new("S", "N")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_uses_configured_tokens() {
        let m = Markers::new("Sim", "Não");
        assert_eq!(m.classify("Sim"), Response::InPerson);
        assert_eq!(m.classify("Não"), Response::Remote);
        assert_eq!(m.classify("S"), Response::Other("S".into()));
    }

    #[test]
    fn marker_for_is_inverse_of_classify() {
        let m = Markers::default();
        for raw in ["S", "N", "Presencial"] {
            assert_eq!(m.marker_for(&m.classify(raw)), raw);
        }
    }
}
