use anyhow::Context;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Decode base64 into text. Used for inbound `messageB64` payloads and for
/// the private key stored in the credentials secret.
pub fn decode_base64_text(encoded: &str) -> Result<String, anyhow::Error> {
    let bytes = STANDARD
        .decode(encoded)
        .context("invalid base64 content")?;
    String::from_utf8(bytes).context("decoded content is not valid UTF-8")
}
