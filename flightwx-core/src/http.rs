use reqwest::Client;
use std::time::Duration;

/// Client shared by one component, with a per-request timeout.
pub(crate) fn client_with_timeout(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).build()
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
