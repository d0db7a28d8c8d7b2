use crate::{
	client::ApiError,
	notice::Notice,
	PillChoice,
	RegistrationAck,
	RegistrationReq,
	Ticket
};
use tracing::{debug, info};

#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
	#[error("no pill was chosen")]
	NoChoice,
	#[error("no email was entered")]
	NoEmail,
	#[error("no admin secret was entered")]
	NoSecret
}

impl ValidationError {
	#[must_use]
	pub fn notice(self) -> Notice {
		match self {
			Self::NoChoice => Notice::choose_pill(),
			Self::NoEmail => Notice::enter_email(),
			Self::NoSecret => Notice::enter_secret()
		}
	}
}

#[derive(Debug)]
pub enum FormEvent {
	Choose(PillChoice),
	Email(String),
	Invalid(ValidationError),
	Begin(Ticket),
	Resolve(Ticket, Result<RegistrationAck, ApiError>),
	Dismiss
}

/// Everything the registration view keeps track of between renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationForm {
	pub email: String,
	pub choice: Option<PillChoice>,
	pub notice: Option<Notice>,
	pending: Option<(Ticket, PillChoice, String)>,
	last_ticket: Ticket
}

impl RegistrationForm {
	#[must_use]
	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	/// Checks that the form can be sent, and if so, builds the request along with the ticket that
	/// the eventual response must be resolved with. Nothing is changed here; the caller is expected
	/// to apply [`FormEvent::Begin`] before sending the request, or [`FormEvent::Invalid`] if this
	/// fails.
	pub fn prepare(&self) -> Result<(Ticket, RegistrationReq), ValidationError> {
		let pill_choice = self.choice.ok_or(ValidationError::NoChoice)?;

		if self.email.is_empty() {
			return Err(ValidationError::NoEmail);
		}

		Ok((self.last_ticket.wrapping_add(1), RegistrationReq { email: self.email.clone(), pill_choice }))
	}

	pub fn apply(&mut self, event: FormEvent) {
		match event {
			FormEvent::Choose(choice) => self.choice = Some(choice),
			FormEvent::Email(email) => self.email = email,
			FormEvent::Invalid(err) => {
				debug!(%err, "Registration not sent");
				self.notice = Some(err.notice());
			},
			FormEvent::Begin(ticket) => {
				// the choice and email are what the response is going to be about, so remember
				// them in case they get edited while we're waiting
				if let Some(choice) = self.choice {
					self.pending = Some((ticket, choice, self.email.clone()));
					self.last_ticket = ticket;
					self.notice = None;
				}
			},
			FormEvent::Resolve(ticket, result) => {
				let Some((_, choice, email)) = self.pending.take_if(|(t, ..)| *t == ticket) else {
					debug!(ticket, "Dropping response for a registration that's no longer pending");
					return;
				};

				match result {
					Ok(ack) => {
						info!(%choice, "Registration succeeded");
						self.notice = Some(Notice::registered(choice, &email, &ack));
						self.email.clear();
						self.choice = None;
					},
					Err(err) => {
						info!(%err, "Registration failed");
						self.notice = Some(Notice::registration_failed(&err));
					}
				}
			},
			FormEvent::Dismiss => self.notice = None
		}
	}
}
