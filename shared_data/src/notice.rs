use crate::{
	client::ApiError,
	PillChoice,
	RegistrationAck
};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
	Success,
	Error
}

/// A short-lived message shown to the user after an action. Nothing that goes wrong in either view
/// is surfaced any other way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
	pub kind: NoticeKind,
	pub title: String,
	pub description: Option<String>
}

impl Notice {
	fn error(title: &str, description: Option<String>) -> Self {
		Self { kind: NoticeKind::Error, title: title.into(), description }
	}

	fn success(title: String, description: Option<String>) -> Self {
		Self { kind: NoticeKind::Success, title, description }
	}

	/// How long the notice stays up before it goes away on its own. Errors linger a bit longer so
	/// there's time to read what went wrong.
	#[must_use]
	pub fn display_for(&self) -> Duration {
		match self.kind {
			NoticeKind::Success => Duration::from_secs(4),
			NoticeKind::Error => Duration::from_secs(6)
		}
	}

	#[must_use]
	pub fn is_error(&self) -> bool {
		self.kind == NoticeKind::Error
	}

	pub(crate) fn choose_pill() -> Self {
		Self::error("Choose a pill", Some("Make your choice: red or blue".into()))
	}

	pub(crate) fn enter_email() -> Self {
		Self::error("Enter your email", Some("We'll send your confirmation there".into()))
	}

	pub(crate) fn enter_secret() -> Self {
		Self::error("Enter the admin secret", None)
	}

	pub(crate) fn registered(choice: PillChoice, email: &str, ack: &RegistrationAck) -> Self {
		let title = match choice {
			PillChoice::Red => "Red pill accepted",
			PillChoice::Blue => "Blue pill accepted"
		};

		let description = match ack.registration_id {
			Some(id) => format!("You're registered (#{id})! Check {email}"),
			None => format!("You're registered! Check {email}")
		};

		Self::success(title.into(), Some(description))
	}

	pub(crate) fn registration_failed(err: &ApiError) -> Self {
		match err {
			// If the service told us what was wrong, show exactly that
			ApiError::Rejected { message: Some(msg), .. } => Self::error("Registration failed", Some(msg.clone())),
			ApiError::Rejected { message: None, .. } => Self::error("Registration failed", Some("Something went wrong".into())),
			ApiError::Unauthorized { .. } | ApiError::Transport(_) | ApiError::Decode(_) =>
				Self::error("Error", Some("Couldn't send your registration".into()))
		}
	}

	pub(crate) fn logged_in(total: u64) -> Self {
		Self::success("Logged in".into(), Some(format!("Found {total} registrations")))
	}

	pub(crate) fn login_failed(err: &ApiError) -> Self {
		match err {
			ApiError::Unauthorized { .. } | ApiError::Rejected { .. } => Self::error("Invalid secret", None),
			ApiError::Transport(_) | ApiError::Decode(_) => Self::error("Connection error", Some(err.to_string()))
		}
	}

	/// The text shown as the body of the notice; the description when there is one, else the
	/// title.
	#[must_use]
	pub fn text(&self) -> &str {
		self.description.as_deref().unwrap_or(&self.title)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::client::TransportError;

	#[test]
	fn notices_go_away_on_their_own() {
		let ok = Notice::logged_in(3);
		let err = Notice::login_failed(&ApiError::Unauthorized { status: 403 });

		assert!(ok.display_for() > Duration::ZERO);
		assert!(err.display_for() >= ok.display_for());

		// long enough to read, short enough to not be in the way
		for notice in [ok, err, Notice::choose_pill()] {
			assert!((Duration::from_secs(2)..=Duration::from_secs(10)).contains(&notice.display_for()));
		}
	}

	#[test]
	fn connection_errors_carry_the_cause() {
		let err = ApiError::Transport(TransportError::Network("connection refused".into()));
		let notice = Notice::login_failed(&err);

		assert!(notice.is_error());
		assert_eq!(notice.text(), "couldn't reach the server: connection refused");
	}
}
