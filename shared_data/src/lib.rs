use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod admin;
pub mod client;
pub mod config;
pub mod notice;
pub mod register;
pub mod stats;

pub use admin::{AdminEvent, AdminSession, AdminState};
pub use client::{
	ApiError,
	HttpMethod,
	HttpRequest,
	HttpResponse,
	RegistrationClient,
	Transport,
	TransportError,
	race_timeout,
	ADMIN_SECRET_HEADER
};
pub use config::Endpoints;
pub use notice::{Notice, NoticeKind};
pub use register::{FormEvent, RegistrationForm, ValidationError};
pub use stats::{StatsCounter, StatsEvent};

/// Identifies one outstanding request so that a response which arrives after a newer request was
/// issued (or after the view was reset) can be dropped instead of clobbering fresh state.
pub type Ticket = u32;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PillChoice {
	Red,
	Blue
}

impl PillChoice {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Red => "red",
			Self::Blue => "blue"
		}
	}
}

impl fmt::Display for PillChoice {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Registration {
	pub id: u32,
	pub email: String,
	pub pill_choice: PillChoice,
	// This comes back as an ISO timestamp that may or may not have an offset or fractional seconds
	// (or is null), so we keep the raw text around and only parse it for display
	#[serde(default)]
	pub registered_at: Option<String>,
	#[serde(default)]
	pub is_confirmed: bool
}

impl Registration {
	#[must_use]
	pub fn display_time(&self) -> String {
		display_time(self.registered_at.as_deref())
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RegistrationReq {
	pub email: String,
	#[serde(rename = "pillChoice")]
	pub pill_choice: PillChoice
}

// Every field is optional since we don't actually rely on anything in here; it's only used to
// make the success notice a bit nicer if the service decides to tell us more
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationAck {
	#[serde(default)]
	pub success: Option<bool>,
	#[serde(default)]
	pub message: Option<String>,
	#[serde(default)]
	pub registration_id: Option<u32>,
	#[serde(default)]
	pub pill_choice: Option<PillChoice>
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationList {
	pub registrations: Vec<Registration>,
	pub total: u64
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorBody {
	#[serde(default)]
	pub error: Option<String>
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
	pub total: u64,
	#[serde(default)]
	pub red_pill: u64,
	#[serde(default)]
	pub blue_pill: u64
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Category {
	#[default]
	All,
	Red,
	Blue
}

impl Category {
	pub const ALL: [Self; 3] = [Self::All, Self::Red, Self::Blue];

	#[must_use]
	pub fn matches(self, choice: PillChoice) -> bool {
		match self {
			Self::All => true,
			Self::Red => choice == PillChoice::Red,
			Self::Blue => choice == PillChoice::Blue
		}
	}

	#[must_use]
	pub fn label(self) -> &'static str {
		match self {
			Self::All => "All",
			Self::Red => "Red",
			Self::Blue => "Blue"
		}
	}

	/// What goes on this category's filter button, e.g. `Red (2)`
	#[must_use]
	pub fn button_label(self, counts: &CategoryCounts) -> String {
		format!("{} ({})", self.label(), counts.get(self))
	}
}

impl From<PillChoice> for Category {
	fn from(value: PillChoice) -> Self {
		match value {
			PillChoice::Red => Self::Red,
			PillChoice::Blue => Self::Blue
		}
	}
}

/// Returns the registrations matching `category`, in the order they were given.
#[must_use]
pub fn filter_registrations(list: &[Registration], category: Category) -> Vec<&Registration> {
	list.iter()
		.filter(|reg| category.matches(reg.pill_choice))
		.collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CategoryCounts {
	pub all: usize,
	pub red: usize,
	pub blue: usize
}

impl CategoryCounts {
	#[must_use]
	pub fn of(list: &[Registration]) -> Self {
		Self {
			all: filter_registrations(list, Category::All).len(),
			red: filter_registrations(list, Category::Red).len(),
			blue: filter_registrations(list, Category::Blue).len()
		}
	}

	#[must_use]
	pub fn get(&self, category: Category) -> usize {
		match category {
			Category::All => self.all,
			Category::Red => self.red,
			Category::Blue => self.blue
		}
	}
}

#[must_use]
pub fn display_time(raw: Option<&str>) -> String {
	raw.and_then(|raw| DateTime::parse_from_rfc3339(raw)
			.map(|dt| dt.naive_local())
			.or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
			.ok()
		)
		.map_or_else(
			|| "an unknown time".into(),
			|dt| dt.format("%H:%M on %b %-d, %Y").to_string()
		)
}

pub static BASE_STYLE: &str = r#"
* {
	--body-background: #020b05;
	--main-text: #b6f5c8;
	--secondary-text: #5f8f6c;
	--main-background: #07170c;
	--border-color: #00ff41;
	--red-pill: #ff0033;
	--blue-pill: #0099ff;
	font-family: "Courier New", monospace;
	color: var(--main-text);
}
body {
	background-color: var(--body-background);
	margin: 0px;
}
input {
	background-color: var(--main-background);
	border: 1px solid var(--border-color);
	border-radius: 4px;
	padding: 6px 8px;
}
button {
	background-color: var(--main-background);
	border: 1px solid var(--border-color);
	border-radius: 4px;
	padding: 6px 8px;
	cursor: pointer;
}
button:disabled {
	opacity: 0.5;
	cursor: wait;
}
.notice {
	position: fixed;
	bottom: 16px;
	right: 16px;
	max-width: 360px;
	padding: 10px 12px;
	border-radius: 8px;
	background-color: var(--main-background);
	border: 1px solid var(--border-color);
}
.notice.error {
	border-color: var(--red-pill);
}
.pill-red {
	border-color: var(--red-pill);
	color: var(--red-pill);
}
.pill-blue {
	border-color: var(--blue-pill);
	color: var(--blue-pill);
}
.selected {
	box-shadow: 0 0 24px currentColor;
}
"#;
