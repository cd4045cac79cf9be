use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::FacturaError;

/// Reception API environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Production => "https://api.comprobanteselectronicos.go.cr/recepcion/v1",
            Self::Sandbox => "https://api-sandbox.comprobanteselectronicos.go.cr/recepcion/v1",
        }
    }

    /// Endpoint that accepts a [`super::SubmissionRequest`].
    pub fn reception_url(&self) -> String {
        format!("{}/recepcion", self.base_url())
    }

    /// Endpoint that reports the status of the document with `clave`.
    pub fn status_url(&self, clave: &str) -> String {
        format!("{}/recepcion/{clave}", self.base_url())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Production => "production",
            Self::Sandbox => "sandbox",
        })
    }
}

impl FromStr for Environment {
    type Err = FacturaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "sandbox" | "testing" | "test" => Ok(Self::Sandbox),
            other => Err(FacturaError::Payload(format!(
                "unknown Hacienda environment '{other}'"
            ))),
        }
    }
}
