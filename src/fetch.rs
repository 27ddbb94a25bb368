//! Fetch glue: download a generated client from a running service and write
//! it verbatim to disk. Excluded from the generation core.

use anyhow::Context;
use std::path::Path;
use url::Url;

/// Path of the download endpoint exposed by the serving glue.
pub const CLIENT_ENDPOINT: &str = "/client.rs";

/// Normalize a source URL so it points at the client download endpoint.
///
/// A URL already ending in the endpoint path is returned as-is; anything
/// else gets the endpoint appended to its (trailing-slash-trimmed) path.
pub fn normalize_source_url(source: &str) -> anyhow::Result<Url> {
    let url = Url::parse(source).with_context(|| format!("invalid source URL '{source}'"))?;
    if url.path().ends_with(CLIENT_ENDPOINT) {
        return Ok(url);
    }
    let trimmed = url.path().trim_end_matches('/').to_string();
    let mut normalized = url;
    normalized.set_path(&format!("{trimmed}{CLIENT_ENDPOINT}"));
    Ok(normalized)
}

/// Download generated client code and write it verbatim to `output`.
///
/// # Errors
///
/// Returns an error on an invalid URL, a network failure, a non-success
/// HTTP status, or a filesystem failure; callers map that to a non-zero
/// exit code.
pub fn fetch_client(source: &str, output: &Path) -> anyhow::Result<()> {
    let target = normalize_source_url(source)?;
    let response = reqwest::blocking::get(target.clone())
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("failed to fetch client code from {target}"))?;
    let payload = response
        .bytes()
        .with_context(|| format!("failed to read response body from {target}"))?;
    std::fs::write(output, &payload)
        .with_context(|| format!("failed to write client code to {output:?}"))?;
    println!("✅ Saved client to {}", output.display());
    Ok(())
}
