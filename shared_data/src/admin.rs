use crate::{
	client::ApiError,
	filter_registrations,
	notice::Notice,
	register::ValidationError,
	Category,
	CategoryCounts,
	Registration,
	RegistrationList,
	Ticket
};
use tracing::{debug, info, warn};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AdminState {
	#[default]
	Unauthenticated,
	Authenticating(Ticket),
	Authenticated {
		registrations: Vec<Registration>,
		total: u64
	}
}

#[derive(Debug)]
pub enum AdminEvent {
	Secret(String),
	Invalid(ValidationError),
	Begin(Ticket),
	Resolve(Ticket, Result<RegistrationList, ApiError>),
	Filter(Category),
	Logout,
	Dismiss
}

/// State of the admin screen for one session. The list is a snapshot taken at login; filtering
/// only ever looks at that snapshot.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AdminSession {
	pub secret: String,
	pub filter: Category,
	pub notice: Option<Notice>,
	state: AdminState,
	last_ticket: Ticket
}

// Written by hand so the secret can't end up in a log line
impl std::fmt::Debug for AdminSession {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AdminSession")
			.field("secret", &"<redacted>")
			.field("filter", &self.filter)
			.field("notice", &self.notice)
			.field("state", &self.state)
			.finish_non_exhaustive()
	}
}

impl AdminSession {
	#[must_use]
	pub fn state(&self) -> &AdminState {
		&self.state
	}

	#[must_use]
	pub fn is_authenticated(&self) -> bool {
		matches!(self.state, AdminState::Authenticated { .. })
	}

	#[must_use]
	pub fn is_authenticating(&self) -> bool {
		matches!(self.state, AdminState::Authenticating(_))
	}

	#[must_use]
	pub fn registrations(&self) -> &[Registration] {
		match &self.state {
			AdminState::Authenticated { registrations, .. } => registrations,
			AdminState::Unauthenticated | AdminState::Authenticating(_) => &[]
		}
	}

	#[must_use]
	pub fn total(&self) -> Option<u64> {
		match self.state {
			AdminState::Authenticated { total, .. } => Some(total),
			AdminState::Unauthenticated | AdminState::Authenticating(_) => None
		}
	}

	#[must_use]
	pub fn filtered(&self) -> Vec<&Registration> {
		filter_registrations(self.registrations(), self.filter)
	}

	#[must_use]
	pub fn counts(&self) -> CategoryCounts {
		CategoryCounts::of(self.registrations())
	}

	/// Same idea as [`crate::RegistrationForm::prepare`]: validate, and hand back the secret to
	/// send along with the ticket its response has to come back with.
	pub fn prepare_login(&self) -> Result<(Ticket, String), ValidationError> {
		if self.secret.is_empty() {
			return Err(ValidationError::NoSecret);
		}

		Ok((self.last_ticket.wrapping_add(1), self.secret.clone()))
	}

	pub fn apply(&mut self, event: AdminEvent) {
		match event {
			AdminEvent::Secret(secret) => self.secret = secret,
			AdminEvent::Invalid(err) => self.notice = Some(err.notice()),
			AdminEvent::Begin(ticket) => {
				if self.is_authenticated() {
					warn!("Tried to log in while already logged in; ignoring");
					return;
				}

				self.last_ticket = ticket;
				self.state = AdminState::Authenticating(ticket);
				self.notice = None;
			},
			AdminEvent::Resolve(ticket, result) => {
				if self.state != AdminState::Authenticating(ticket) {
					debug!(ticket, "Dropping a login response that's no longer wanted");
					return;
				}

				match result {
					Ok(RegistrationList { registrations, total }) => {
						info!(count = registrations.len(), total, "Admin logged in");
						self.notice = Some(Notice::logged_in(total));
						self.state = AdminState::Authenticated { registrations, total };
					},
					Err(err) => {
						// we keep the secret they typed so a typo can just be fixed up
						info!(%err, "Admin login failed");
						self.notice = Some(Notice::login_failed(&err));
						self.state = AdminState::Unauthenticated;
					}
				}
			},
			AdminEvent::Filter(filter) => self.filter = filter,
			AdminEvent::Logout => {
				info!("Admin logged out");
				// keep the ticket counter moving so anything still in flight gets ignored
				*self = Self { last_ticket: self.last_ticket.wrapping_add(1), ..Self::default() };
			},
			AdminEvent::Dismiss => self.notice = None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		client::{mock::{client, MockTransport}, RegistrationClient, Transport, TransportError},
		PillChoice
	};

	const THREE: &str = r#"{
		"registrations": [
			{"id": 3, "email": "neo@example.com", "pill_choice": "red", "registered_at": "2025-03-15T10:05:00", "is_confirmed": true},
			{"id": 2, "email": "cypher@example.com", "pill_choice": "blue", "registered_at": "2025-03-14T09:00:00", "is_confirmed": false},
			{"id": 1, "email": "trinity@example.com", "pill_choice": "red", "registered_at": null, "is_confirmed": false}
		],
		"total": 3
	}"#;

	// Mirrors the admin page's login button
	async fn login<T: Transport>(session: &mut AdminSession, client: &RegistrationClient<T>) {
		match session.prepare_login() {
			Err(err) => session.apply(AdminEvent::Invalid(err)),
			Ok((ticket, secret)) => {
				session.apply(AdminEvent::Begin(ticket));
				assert!(session.is_authenticating());
				let res = client.list(&secret).await;
				session.apply(AdminEvent::Resolve(ticket, res));
			}
		}
	}

	fn with_secret(secret: &str) -> AdminSession {
		let mut session = AdminSession::default();
		session.apply(AdminEvent::Secret(secret.into()));
		session
	}

	#[tokio::test]
	async fn empty_secret_never_hits_the_network() {
		let transport = MockTransport::default().respond(200, THREE);
		let mut session = AdminSession::default();

		login(&mut session, &client(&transport)).await;

		assert_eq!(transport.call_count(), 0);
		assert_eq!(session.state(), &AdminState::Unauthenticated);
		assert_eq!(session.notice, Some(Notice::enter_secret()));
	}

	#[tokio::test]
	async fn forbidden_stays_on_the_gate() {
		let transport = MockTransport::default().respond(403, r#"{"error": "Unauthorized"}"#);
		let mut session = with_secret("blue pill");

		login(&mut session, &client(&transport)).await;

		assert_eq!(transport.call_count(), 1);
		assert_eq!(session.state(), &AdminState::Unauthenticated);
		assert!(session.registrations().is_empty());
		assert_eq!(session.secret, "blue pill");

		let notice = session.notice.unwrap();
		assert!(notice.is_error());
		assert_eq!(notice.title, "Invalid secret");
	}

	#[tokio::test]
	async fn connection_errors_get_their_own_notice() {
		let transport = MockTransport::default()
			.fail(TransportError::Network("dns lookup failed".into()));
		let mut session = with_secret("matrix");

		login(&mut session, &client(&transport)).await;

		assert_eq!(session.state(), &AdminState::Unauthenticated);
		assert_eq!(session.notice.unwrap().title, "Connection error");
	}

	#[tokio::test]
	async fn success_caches_the_list_and_counts() {
		let transport = MockTransport::default().respond(200, THREE);
		let mut session = with_secret("matrix");

		login(&mut session, &client(&transport)).await;

		assert!(session.is_authenticated());
		assert_eq!(session.total(), Some(3));
		assert_eq!(session.notice.as_ref().unwrap().text(), "Found 3 registrations");

		let counts = session.counts();
		assert_eq!(counts.get(Category::All), 3);
		assert_eq!(counts.get(Category::Red), 2);
		assert_eq!(counts.get(Category::Blue), 1);

		assert_eq!(Category::All.button_label(&counts), "All (3)");
		assert_eq!(Category::Red.button_label(&counts), "Red (2)");
		assert_eq!(Category::Blue.button_label(&counts), "Blue (1)");

		// Filtering never goes back to the network
		session.apply(AdminEvent::Filter(Category::Red));
		let red = session.filtered().into_iter().map(|r| r.id).collect::<Vec<_>>();
		assert_eq!(red, [3, 1]);

		session.apply(AdminEvent::Filter(Category::Blue));
		let blue = session.filtered();
		assert_eq!(blue.len(), 1);
		assert_eq!(blue[0].pill_choice, PillChoice::Blue);

		session.apply(AdminEvent::Filter(Category::All));
		assert_eq!(session.filtered().len(), 3);

		assert_eq!(transport.call_count(), 1);
	}

	#[tokio::test]
	async fn logout_forgets_everything() {
		let transport = MockTransport::default().respond(200, THREE);
		let mut session = with_secret("matrix");

		login(&mut session, &client(&transport)).await;
		session.apply(AdminEvent::Filter(Category::Blue));
		session.apply(AdminEvent::Logout);

		assert_eq!(session.state(), &AdminState::Unauthenticated);
		assert!(session.secret.is_empty());
		assert!(session.registrations().is_empty());
		assert_eq!(session.filter, Category::All);
		assert_eq!(session.notice, None);
	}

	#[test]
	fn responses_after_logout_are_ignored() {
		let mut session = with_secret("matrix");
		let (ticket, _) = session.prepare_login().unwrap();
		session.apply(AdminEvent::Begin(ticket));
		session.apply(AdminEvent::Logout);

		session.apply(AdminEvent::Resolve(ticket, Ok(RegistrationList::default())));
		assert_eq!(session.state(), &AdminState::Unauthenticated);

		// and the next login gets a ticket that can't be confused with the abandoned one
		session.apply(AdminEvent::Secret("matrix".into()));
		let (next, _) = session.prepare_login().unwrap();
		assert_ne!(next, ticket);
	}

	#[test]
	fn debug_output_hides_the_secret() {
		let session = with_secret("matrix_admin");
		assert!(!format!("{session:?}").contains("matrix_admin"));
	}
}
