use std::time::Duration;

pub(crate) fn client(timeout: Duration) -> reqwest::Client {
    reqwest::ClientBuilder::new()
        .timeout(timeout)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .unwrap_or_else(|error| {
            log::warn!("Falling back to default HTTP client: {error}");

            reqwest::Client::new()
        })
}
