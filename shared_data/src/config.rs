use std::time::Duration;
use tracing::warn;

const DEFAULT_TIMEOUT_MS: u64 = 8_000;

/// Where the registration service lives. The frontend is a static bundle, so these are baked in
/// at build time (through the `AWAKENING_*` env vars) and fall back to same-origin paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
	pub register: String,
	pub listing: String,
	pub stats: String,
	pub timeout: Duration
}

impl Default for Endpoints {
	fn default() -> Self {
		Self {
			register: "/api/register".into(),
			listing: "/api/admin/registrations".into(),
			stats: "/api/stats".into(),
			timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS)
		}
	}
}

impl Endpoints {
	#[must_use]
	pub fn from_build_env() -> Self {
		Self::from_values(
			option_env!("AWAKENING_REGISTER_URL"),
			option_env!("AWAKENING_LISTING_URL"),
			option_env!("AWAKENING_STATS_URL"),
			option_env!("AWAKENING_TIMEOUT_MS")
		)
	}

	fn from_values(
		register: Option<&str>,
		listing: Option<&str>,
		stats: Option<&str>,
		timeout_ms: Option<&str>
	) -> Self {
		macro_rules! or_default{
			($val:expr, $field:ident) => {
				$val.filter(|v| !v.is_empty())
					.map_or_else(|| Self::default().$field, str::to_string)
			}
		}

		// a timeout of 0 would fail every single request, so treat it the same as garbage
		let timeout = match timeout_ms.map(str::parse::<u64>) {
			None => DEFAULT_TIMEOUT_MS,
			Some(Ok(ms)) if ms > 0 => ms,
			Some(res) => {
				warn!(?res, "AWAKENING_TIMEOUT_MS isn't a positive number of milliseconds; using the default");
				DEFAULT_TIMEOUT_MS
			}
		};

		Self {
			register: or_default!(register, register),
			listing: or_default!(listing, listing),
			stats: or_default!(stats, stats),
			timeout: Duration::from_millis(timeout)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unset_values_fall_back() {
		assert_eq!(Endpoints::from_values(None, None, None, None), Endpoints::default());
		assert_eq!(Endpoints::from_values(Some(""), Some(""), None, Some("soon")), Endpoints::default());
		assert_eq!(Endpoints::from_values(None, None, None, Some("0")), Endpoints::default());
	}

	#[test]
	fn set_values_override() {
		let endpoints = Endpoints::from_values(
			Some("https://example.com/register"),
			None,
			Some("https://example.com/stats"),
			Some("2500")
		);

		assert_eq!(endpoints.register, "https://example.com/register");
		assert_eq!(endpoints.listing, Endpoints::default().listing);
		assert_eq!(endpoints.stats, "https://example.com/stats");
		assert_eq!(endpoints.timeout, Duration::from_millis(2500));
	}
}
