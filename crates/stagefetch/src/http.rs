use std::io::Read;

use url::Url;

/// Blocking HTTP client abstraction.
///
/// The fetcher only ever issues a GET. Building the request and executing it
/// are separate calls so a malformed request and a failed exchange are
/// reported as different errors. Redirects, timeouts, TLS and proxies are
/// whatever the implementation is configured with.
///
/// # Implementations
///
/// - `reqwest::blocking::Client` (feature `reqwest`, on by default)
/// - `&C` for any `C: HttpClient`, so one pooled client can serve many calls
pub trait HttpClient {
    type Request;

    /// Response body. Dropping it releases the connection.
    type Body: Read;

    type Error: std::error::Error + Send + Sync + 'static;

    fn build_get(&self, url: &Url) -> Result<Self::Request, Self::Error>;

    /// Sends the request and returns the body, whatever the status code.
    fn execute(&self, request: Self::Request) -> Result<Self::Body, Self::Error>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    type Request = C::Request;
    type Body = C::Body;
    type Error = C::Error;

    fn build_get(&self, url: &Url) -> Result<Self::Request, Self::Error> { (**self).build_get(url) }

    fn execute(&self, request: Self::Request) -> Result<Self::Body, Self::Error> {
        (**self).execute(request)
    }
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use reqwest::blocking::{Client, Request, Response};

    impl HttpClient for Client {
        type Request = Request;
        type Body = Response;
        type Error = reqwest::Error;

        fn build_get(&self, url: &Url) -> Result<Request, reqwest::Error> {
            self.get(url.clone()).build()
        }

        fn execute(&self, request: Request) -> Result<Response, reqwest::Error> {
            let response = Client::execute(self, request)?;
            let status = response.status();

            if status.is_success() {
                tracing::debug!(%status, url = %response.url(), "response received");
            } else {
                tracing::warn!(
                    %status,
                    url = %response.url(),
                    "non-success status, body is written as-is"
                );
            }

            Ok(response)
        }
    }

}
