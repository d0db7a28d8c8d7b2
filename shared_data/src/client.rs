use crate::{
	config::Endpoints,
	ErrorBody,
	RegistrationAck,
	RegistrationList,
	RegistrationReq,
	Stats
};
use futures::future::{select, Either};
use std::{future::Future, pin::pin, time::Duration};
use tracing::{debug, warn};

/// The header that the listing endpoint checks the admin secret against
pub const ADMIN_SECRET_HEADER: &str = "X-Admin-Secret";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
	Get,
	Post
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
	pub method: HttpMethod,
	pub url: String,
	pub headers: Vec<(&'static str, String)>,
	pub body: Option<String>
}

impl HttpRequest {
	fn get(url: &str) -> Self {
		Self { method: HttpMethod::Get, url: url.into(), headers: vec![], body: None }
	}

	fn post_json(url: &str, body: String) -> Self {
		Self {
			method: HttpMethod::Post,
			url: url.into(),
			headers: vec![("Content-Type", "application/json".into())],
			body: Some(body)
		}
	}

	fn header(mut self, name: &'static str, value: &str) -> Self {
		self.headers.push((name, value.into()));
		self
	}

	#[must_use]
	pub fn header_value(&self, name: &str) -> Option<&str> {
		self.headers.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
	pub status: u16,
	pub body: String
}

impl HttpResponse {
	#[must_use]
	pub fn ok(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum TransportError {
	#[error("the request timed out after {}ms", .0.as_millis())]
	Timeout(Duration),
	#[error("couldn't reach the server: {0}")]
	Network(String)
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
	#[error("the server rejected the request ({status})")]
	Rejected { status: u16, message: Option<String> },
	#[error("the admin secret was not accepted ({status})")]
	Unauthorized { status: u16 },
	#[error(transparent)]
	Transport(#[from] TransportError),
	#[error("the server sent something we couldn't read: {0}")]
	Decode(#[from] serde_json::Error)
}

/// Whatever actually moves bytes over the network. The browser build uses `gloo-net`; tests use
/// an in-memory fake.
#[allow(async_fn_in_trait)]
pub trait Transport {
	async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport> Transport for &T {
	async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
		(**self).send(req).await
	}
}

/// Gives `request` until `sleep` finishes to come back. `limit` is only what the error reports, so
/// it should be the duration `sleep` was built with. If both are ready on the same poll, the
/// response wins.
pub async fn race_timeout<R, S>(request: R, sleep: S, limit: Duration) -> Result<HttpResponse, TransportError>
where
	R: Future<Output = Result<HttpResponse, TransportError>>,
	S: Future<Output = ()>
{
	match select(pin!(request), pin!(sleep)).await {
		Either::Left((res, _)) => res,
		Either::Right(((), _)) => {
			warn!(limit_ms = limit.as_millis(), "Request timed out");
			Err(TransportError::Timeout(limit))
		}
	}
}

/// Speaks the registration service's HTTP contract. Each method issues exactly one request and
/// never retries.
#[derive(Clone, Debug)]
pub struct RegistrationClient<T> {
	transport: T,
	endpoints: Endpoints
}

impl<T: Transport> RegistrationClient<T> {
	pub fn new(transport: T, endpoints: Endpoints) -> Self {
		Self { transport, endpoints }
	}

	#[must_use]
	pub fn endpoints(&self) -> &Endpoints {
		&self.endpoints
	}

	pub async fn submit(&self, req: &RegistrationReq) -> Result<RegistrationAck, ApiError> {
		let body = serde_json::to_string(req)?;
		let res = self.transport
			.send(HttpRequest::post_json(&self.endpoints.register, body))
			.await?;

		if !res.ok() {
			// The body may or may not be json, and may or may not have an `error` in it. If it
			// doesn't, we just fall back to a generic message at display time.
			let message = serde_json::from_str::<ErrorBody>(&res.body)
				.ok()
				.and_then(|b| b.error)
				.filter(|e| !e.is_empty());

			warn!(status = res.status, ?message, "Registration was rejected");
			return Err(ApiError::Rejected { status: res.status, message });
		}

		debug!(status = res.status, "Registration accepted");

		// we don't depend on anything in the ack, so a weird body shouldn't turn a success into a
		// failure
		Ok(serde_json::from_str(&res.body).unwrap_or_default())
	}

	pub async fn list(&self, secret: &str) -> Result<RegistrationList, ApiError> {
		let req = HttpRequest::get(&self.endpoints.listing)
			.header(ADMIN_SECRET_HEADER, secret);

		let res = self.transport.send(req).await?;

		if !res.ok() {
			warn!(status = res.status, "Listing request was refused");
			return Err(ApiError::Unauthorized { status: res.status });
		}

		let list = serde_json::from_str::<RegistrationList>(&res.body)?;
		debug!(count = list.registrations.len(), total = list.total, "Retrieved registrations");

		Ok(list)
	}

	pub async fn stats(&self) -> Result<Stats, ApiError> {
		let res = self.transport
			.send(HttpRequest::get(&self.endpoints.stats))
			.await?;

		if !res.ok() {
			return Err(ApiError::Rejected { status: res.status, message: None });
		}

		Ok(serde_json::from_str(&res.body)?)
	}
}

#[cfg(test)]
pub(crate) mod mock {
	use super::*;
	use std::{cell::RefCell, collections::VecDeque};

	/// Replays canned responses in order and remembers every request it was handed
	#[derive(Default)]
	pub struct MockTransport {
		responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
		pub calls: RefCell<Vec<HttpRequest>>
	}

	impl MockTransport {
		pub fn respond(self, status: u16, body: &str) -> Self {
			self.responses.borrow_mut().push_back(Ok(HttpResponse { status, body: body.into() }));
			self
		}

		pub fn fail(self, err: TransportError) -> Self {
			self.responses.borrow_mut().push_back(Err(err));
			self
		}

		pub fn call_count(&self) -> usize {
			self.calls.borrow().len()
		}
	}

	impl Transport for MockTransport {
		async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
			self.calls.borrow_mut().push(req);
			self.responses.borrow_mut()
				.pop_front()
				.unwrap_or_else(|| Err(TransportError::Network("no response queued".into())))
		}
	}

	pub fn client(transport: &MockTransport) -> RegistrationClient<&MockTransport> {
		RegistrationClient::new(transport, Endpoints::default())
	}
}
