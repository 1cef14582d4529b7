use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const ENVIRONMENT_VARIABLE: &str = "COURIER_ENVIRONMENT";

/// Decides how much of the store is exposed in an [`ExecutionReport`](crate::prelude::ExecutionReport).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
	Development,
	#[default]
	Production,
}

impl Environment {
	pub fn is_development(self) -> bool {
		matches!(self, Self::Development)
	}
}

impl FromStr for Environment {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"development" | "dev" => Ok(Self::Development),
			"production" | "prod" => Ok(Self::Production),
			other => Err(format!("unknown environment '{other}'")),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusConfig {
	#[serde(default)]
	pub environment: Environment,
}

impl BusConfig {
	pub fn new(environment: Environment) -> Self {
		Self { environment }
	}

	/// Reads `COURIER_ENVIRONMENT`. Missing or unreadable values fall back to production.
	pub fn from_env() -> Self {
		let environment = match std::env::var(ENVIRONMENT_VARIABLE) {
			Ok(value) => value.parse().unwrap_or_else(|err: String| {
				tracing::warn!(%err, "falling back to production");
				Environment::Production
			}),
			Err(_) => Environment::default(),
		};
		Self { environment }
	}
}
