use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use shared_data::{
	Endpoints,
	HttpMethod,
	HttpRequest,
	HttpResponse,
	race_timeout,
	RegistrationClient,
	Transport,
	TransportError
};
use std::time::Duration;

/// Sends requests through the browser's `fetch`, giving up after `timeout`. The request isn't
/// aborted when that happens; its response is just never looked at.
#[derive(Clone, Copy, Debug)]
pub struct FetchTransport {
	timeout: Duration
}

impl FetchTransport {
	async fn fetch(req: HttpRequest) -> Result<HttpResponse, TransportError> {
		let builder: RequestBuilder = match req.method {
			HttpMethod::Get => Request::get(&req.url),
			HttpMethod::Post => Request::post(&req.url)
		};

		let builder = req.headers.iter()
			.fold(builder, |builder, (name, value)| builder.header(name, value));

		let request = match req.body {
			Some(body) => builder.body(body),
			None => builder.build()
		}.map_err(|e| TransportError::Network(format!("Couldn't build request: {e}")))?;

		let res = request.send()
			.await
			.map_err(|e| TransportError::Network(e.to_string()))?;

		let status = res.status();
		let body = res.text()
			.await
			.map_err(|e| TransportError::Network(format!("Couldn't read the response: {e}")))?;

		Ok(HttpResponse { status, body })
	}
}

impl Transport for FetchTransport {
	async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
		let millis = u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX);

		race_timeout(Self::fetch(req), TimeoutFuture::new(millis), self.timeout).await
	}
}

/// A client pointed at wherever this bundle was built to talk to
pub fn client() -> RegistrationClient<FetchTransport> {
	let endpoints = Endpoints::from_build_env();
	RegistrationClient::new(FetchTransport { timeout: endpoints.timeout }, endpoints)
}
