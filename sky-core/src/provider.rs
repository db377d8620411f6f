use crate::{Config, Location, Report, SkyError, Weather};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::{fmt::Debug, future::Future, time::Duration};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

pub mod forecast;
pub mod geocoding;

const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// A single point in time bounding a whole chain of requests.
///
/// Copies share the same instant, so handing one deadline to several calls
/// splits one budget between them.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        let now = Instant::now();
        let at = now
            .checked_add(budget)
            .or_else(|| now.checked_add(FAR_FUTURE))
            .unwrap_or(now);
        Self { at, budget }
    }

    /// The total budget this deadline was created with.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    /// Drive `fut` to completion, failing with [`SkyError::Timeout`] once the deadline passes.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, SkyError>
    where
        F: Future<Output = Result<T, SkyError>>,
    {
        match tokio::time::timeout_at(self.at, fut).await {
            Ok(result) => result,
            Err(_) => Err(SkyError::Timeout(self.budget)),
        }
    }
}

#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Resolve a free-text place name to the provider's best match.
    async fn resolve_location(&self, city: &str, deadline: Deadline) -> Result<Location, SkyError>;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current_weather(
        &self,
        latitude: f64,
        longitude: f64,
        deadline: Deadline,
    ) -> Result<Weather, SkyError>;
}

/// Client for the Open-Meteo geocoding and forecast APIs.
///
/// One HTTP transport is shared by both endpoints.
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
    language: String,
}

impl OpenMeteo {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
            language: config.language.clone(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, SkyError> {
        let http = Client::builder()
            .user_agent(concat!("sky/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| SkyError::Transport { action: "build HTTP client", source })?;

        Ok(Self::new(http, config))
    }

    /// Send `request` and decode a 200 response body as `T`, all within `deadline`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &'static str,
        deadline: Deadline,
    ) -> Result<T, SkyError> {
        let budget = deadline.budget();

        deadline
            .run(async {
                let res = request
                    .send()
                    .await
                    .map_err(|e| SkyError::transport(action, e, budget))?;

                let status = res.status();
                debug!(url = %res.url(), %status, "received response");

                if status != StatusCode::OK {
                    warn!("{action}: API returned status {status}");
                    return Err(SkyError::RemoteStatus(status.as_u16()));
                }

                let body = res
                    .text()
                    .await
                    .map_err(|e| SkyError::transport("read response", e, budget))?;

                Ok(serde_json::from_str(&body)?)
            })
            .await
    }
}

/// Run the full lookup: place name to location, then current weather at its coordinates.
///
/// Both requests share one deadline of `timeout`. Nothing is returned unless both succeed.
#[instrument(skip(geocoder, provider))]
pub async fn lookup(
    geocoder: &dyn Geocoder,
    provider: &dyn WeatherProvider,
    city: &str,
    timeout: Duration,
) -> Result<Report, SkyError> {
    let deadline = Deadline::after(timeout);

    let location = geocoder.resolve_location(city, deadline).await?;
    info!(
        "resolved '{}' to {}, {} ({:.4}, {:.4})",
        city, location.name, location.country, location.latitude, location.longitude
    );

    let weather = provider
        .fetch_current_weather(location.latitude, location.longitude, deadline)
        .await?;
    debug!(remaining = ?deadline.remaining(), "lookup finished");

    Ok(Report { location, weather })
}

#[cfg(test)]
pub(crate) mod test_server {
    use reqwest::Client;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::{TcpListener, TcpStream},
        task::JoinHandle,
    };

    use crate::{Config, provider::OpenMeteo};

    /// Serve a single canned response. The handle yields the raw request head.
    pub(crate) async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test server");
        let addr = listener.local_addr().expect("test server address");

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let head = read_head(&mut socket).await;

            let response = format!(
                "HTTP/1.1 {status} Test\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.expect("write response");
            socket.shutdown().await.ok();
            head
        });

        (format!("http://{addr}"), handle)
    }

    /// Accept a connection and never answer it.
    pub(crate) async fn serve_nothing() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test server");
        let addr = listener.local_addr().expect("test server address");

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            read_head(&mut socket).await;
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
            drop(socket);
        });

        format!("http://{addr}")
    }

    /// Base URL of a port that was bound and released, so connections are refused.
    pub(crate) async fn closed_port() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test server");
        let addr = listener.local_addr().expect("test server address");
        drop(listener);
        format!("http://{addr}")
    }

    pub(crate) fn client_for(base: &str) -> OpenMeteo {
        let config = Config {
            geocoding_url: format!("{base}/v1/search"),
            forecast_url: format!("{base}/v1/forecast"),
            ..Config::default()
        };
        let http = Client::builder().no_proxy().build().expect("test client");
        OpenMeteo::new(http, &config)
    }

    async fn read_head(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.expect("read request");
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}
