use serde::{Deserialize, Serialize};

/// A single broken rule, as reported by [`TValidate::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
	pub code: Option<String>,
	pub property: Option<String>,
	pub message: String,
}

impl ValidationFailure {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			code: None,
			property: None,
			message: message.into(),
		}
	}

	pub fn with_code(mut self, code: impl Into<String>) -> Self {
		self.code = Some(code.into());
		self
	}

	pub fn with_property(mut self, property: impl Into<String>) -> Self {
		self.property = Some(property.into());
		self
	}
}

impl std::fmt::Display for ValidationFailure {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.message)
	}
}

/// Self-validation hook every work item carries.
///
/// Must be pure: no side effects, same answer for the same state.
pub trait TValidate {
	fn validate(&self) -> Vec<ValidationFailure> {
		Vec::new()
	}

	fn is_valid(&self) -> bool {
		self.validate().is_empty()
	}
}

/// External validator, for rule sets that live outside the validated type.
pub trait TValidator<T: ?Sized>: Send + Sync {
	fn validate(&self, target: &T) -> Vec<ValidationFailure>;
}

/// Collects failures while walking a set of rules.
#[derive(Debug, Default)]
pub struct ValidationFailures(Vec<ValidationFailure>);

impl ValidationFailures {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records `message` when `holds` is false.
	pub fn ensure(&mut self, holds: bool, property: &str, message: &str) -> &mut Self {
		if !holds {
			self.0.push(ValidationFailure::new(message).with_property(property));
		}
		self
	}

	pub fn push(&mut self, failure: ValidationFailure) -> &mut Self {
		self.0.push(failure);
		self
	}

	pub fn into_vec(self) -> Vec<ValidationFailure> {
		self.0
	}
}

impl From<ValidationFailures> for Vec<ValidationFailure> {
	fn from(value: ValidationFailures) -> Self {
		value.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Name(String);
	impl TValidate for Name {
		fn validate(&self) -> Vec<ValidationFailure> {
			let mut failures = ValidationFailures::new();
			failures.ensure(!self.0.is_empty(), "name", "name is required");
			failures.into_vec()
		}
	}

	#[test]
	fn test_is_valid_follows_validate() {
		assert!(Name("x".into()).is_valid());
		let failures = Name(String::new()).validate();
		assert_eq!(failures.len(), 1);
		assert_eq!(failures[0].property.as_deref(), Some("name"));
		assert!(!Name(String::new()).is_valid());
	}
}
