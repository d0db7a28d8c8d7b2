use crate::{client::ApiError, Stats, Ticket};
use tracing::{debug, warn};

#[derive(Debug)]
pub enum StatsEvent {
	Begin(Ticket),
	Resolve(Ticket, Result<Stats, ApiError>)
}

/// The participant counter on the landing page. It's refreshed on mount and after every
/// successful registration, so more than one fetch can be in flight; only the newest one counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatsCounter {
	stats: Option<Stats>,
	latest: Ticket
}

impl StatsCounter {
	/// `None` until the first fetch comes back, and again whenever the newest fetch failed
	#[must_use]
	pub fn stats(&self) -> Option<Stats> {
		self.stats
	}

	pub fn apply(&mut self, event: StatsEvent) {
		match event {
			StatsEvent::Begin(ticket) => self.latest = ticket,
			StatsEvent::Resolve(ticket, result) => {
				if ticket != self.latest {
					debug!(ticket, latest = self.latest, "Dropping stats that have been superseded");
					return;
				}

				self.stats = match result {
					Ok(stats) => Some(stats),
					Err(err) => {
						// it's only decoration, so we hide it instead of showing an error
						warn!(%err, "Couldn't retrieve registration stats");
						None
					}
				};
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::client::{mock::{client, MockTransport}, TransportError};
	use std::time::Duration;

	fn stats(total: u64) -> Stats {
		Stats { total, red_pill: total, blue_pill: 0 }
	}

	fn timeout() -> ApiError {
		ApiError::Transport(TransportError::Timeout(Duration::from_secs(8)))
	}

	#[test]
	fn stale_stats_are_dropped() {
		let mut counter = StatsCounter::default();

		counter.apply(StatsEvent::Begin(1));
		counter.apply(StatsEvent::Begin(2));

		counter.apply(StatsEvent::Resolve(2, Ok(stats(43))));
		assert_eq!(counter.stats(), Some(stats(43)));

		// the fetch from mount finally shows up with an older number
		counter.apply(StatsEvent::Resolve(1, Ok(stats(42))));
		assert_eq!(counter.stats(), Some(stats(43)));
	}

	#[test]
	fn old_failures_do_not_hide_a_fresh_count() {
		let mut counter = StatsCounter::default();

		counter.apply(StatsEvent::Begin(1));
		counter.apply(StatsEvent::Begin(2));
		counter.apply(StatsEvent::Resolve(2, Ok(stats(7))));
		counter.apply(StatsEvent::Resolve(1, Err(timeout())));

		assert_eq!(counter.stats(), Some(stats(7)));
	}

	#[test]
	fn latest_failure_hides_the_counter() {
		let mut counter = StatsCounter::default();

		counter.apply(StatsEvent::Begin(1));
		counter.apply(StatsEvent::Resolve(1, Ok(stats(7))));
		assert!(counter.stats().is_some());

		counter.apply(StatsEvent::Begin(2));
		// still showing the last number while the refresh is out
		assert_eq!(counter.stats(), Some(stats(7)));

		counter.apply(StatsEvent::Resolve(2, Err(timeout())));
		assert_eq!(counter.stats(), None);
	}

	#[tokio::test]
	async fn counter_follows_the_stats_endpoint() {
		let transport = MockTransport::default()
			.respond(200, r#"{"total": 42, "red_pill": 30, "blue_pill": 12}"#);
		let mut counter = StatsCounter::default();

		counter.apply(StatsEvent::Begin(1));
		let res = client(&transport).stats().await;
		counter.apply(StatsEvent::Resolve(1, res));

		assert_eq!(counter.stats(), Some(Stats { total: 42, red_pill: 30, blue_pill: 12 }));
	}
}
