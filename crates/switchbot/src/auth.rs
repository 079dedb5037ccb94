use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// The long-lived token and secret key pair assigned to a vendor
/// account.
///
/// The token identifies the account and travels with every request,
/// while the secret key never leaves the process: it is only used as
/// the `HMAC` key when signing. Both values are immutable after
/// construction and safe to share across concurrent calls.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    secret_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Creates the [`Credentials`] from the token and secret key of a
    /// vendor account.
    #[must_use]
    pub fn new(token: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Returns the account token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// A source of single-use random identifiers for request signing.
///
/// The default source is [`RandomNonce`]. A caller-provided
/// implementation allows tests to fix nonce values and observe the
/// exact signature a request will carry.
pub trait NonceProvider: fmt::Debug + Send + Sync {
    /// Returns a new nonce, rendered as a canonical `UUID` string.
    fn nonce(&self) -> String;
}

/// The default nonce source, backed by random version-4 `UUID`s.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RandomNonce;

impl NonceProvider for RandomNonce {
    fn nonce(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// The per-request credential header set attached to every API call.
///
/// A header set is created fresh for each call and discarded once the
/// call completes. It must never be cached or reused: the nonce and
/// timestamp are what make the signature non-replayable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// `Authorization` header value, the account token.
    pub authorization: String,
    /// `t` header value, the wall-clock time as nanoseconds since the
    /// Unix epoch in decimal form.
    pub timestamp: String,
    /// `nonce` header value, a single-use random identifier.
    pub nonce: String,
    /// `sign` header value, the base64 `HMAC-SHA256` signature over
    /// the token, timestamp, and nonce.
    pub sign: String,
}

/// Computes per-request `HMAC` credentials from a long-lived
/// [`Credentials`] pair.
#[derive(Debug)]
pub struct Signer {
    credentials: Credentials,
    nonce_provider: Box<dyn NonceProvider>,
}

impl Signer {
    /// Creates a [`Signer`] with the default [`RandomNonce`] source.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self::with_nonce_provider(credentials, RandomNonce)
    }

    /// Creates a [`Signer`] with a caller-provided [`NonceProvider`].
    #[must_use]
    pub fn with_nonce_provider(
        credentials: Credentials,
        nonce_provider: impl NonceProvider + 'static,
    ) -> Self {
        Self {
            credentials,
            nonce_provider: Box::new(nonce_provider),
        }
    }

    /// Produces a fresh credential header set for one request.
    ///
    /// Each invocation draws a new nonce from the configured source and
    /// reads the wall clock for the timestamp. Signing over an
    /// in-memory secret cannot fail.
    #[must_use]
    pub fn sign(&self) -> SignedHeaders {
        let nonce = self.nonce_provider.nonce();
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
            .to_string();
        let sign = self.signature(&timestamp, &nonce);

        SignedHeaders {
            authorization: self.credentials.token.clone(),
            timestamp,
            nonce,
            sign,
        }
    }

    // Base64 of HMAC-SHA256 over the concatenation of token, timestamp,
    // and nonce, in that exact order, with the standard padded alphabet.
    pub(crate) fn signature(&self, timestamp: &str, nonce: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.credentials.secret_key.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(self.credentials.token.as_bytes());
        mac.update(timestamp.as_bytes());
        mac.update(nonce.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashSet;

    use super::{Credentials, NonceProvider, RandomNonce, Signer};

    #[derive(Debug)]
    pub(crate) struct FixedNonce(pub(crate) &'static str);

    impl NonceProvider for FixedNonce {
        fn nonce(&self) -> String {
            self.0.to_string()
        }
    }

    fn signer() -> Signer {
        Signer::new(Credentials::new("tok", "secret"))
    }

    #[test]
    fn signature_regression_vector() {
        // base64(HMAC-SHA256("secret",
        // "tok100000000011111111-1111-1111-1111-111111111111")), checked
        // against a reference HMAC-SHA256 implementation.
        assert_eq!(
            signer().signature("1000000000", "11111111-1111-1111-1111-111111111111"),
            "pAB5fB4+SGC+EsbuMNCc4O6fbx3t8skom7Iq4eExonM="
        );
    }

    #[test]
    fn signature_second_vector() {
        let signer = Signer::new(Credentials::new("token", "key"));

        assert_eq!(
            signer.signature(
                "1700000000000000000",
                "00000000-0000-0000-0000-000000000000"
            ),
            "CqsCKTnIHoBqbqL8LyH6L3qi4db7/KC0N2Q1DL/HTsA="
        );
    }

    #[test]
    fn signature_is_deterministic() {
        let signer = signer();
        let nonce = "11111111-1111-1111-1111-111111111111";

        assert_eq!(
            signer.signature("1000000000", nonce),
            signer.signature("1000000000", nonce)
        );
    }

    #[test]
    fn nonces_are_unique() {
        let provider = RandomNonce;

        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let nonce = provider.nonce();

            // Canonical UUID rendering.
            assert_eq!(nonce.len(), 36);
            assert_eq!(nonce.matches('-').count(), 4);

            assert!(seen.insert(nonce), "Duplicate nonce generated");
        }
    }

    #[test]
    fn headers_carry_the_injected_nonce() {
        let signer = Signer::with_nonce_provider(
            Credentials::new("tok", "secret"),
            FixedNonce("11111111-1111-1111-1111-111111111111"),
        );

        let headers = signer.sign();

        assert_eq!(headers.authorization, "tok");
        assert_eq!(headers.nonce, "11111111-1111-1111-1111-111111111111");

        // The signature over the emitted timestamp and nonce is
        // reproducible.
        assert_eq!(
            headers.sign,
            signer.signature(&headers.timestamp, &headers.nonce)
        );

        // The timestamp is a plain decimal count of nanoseconds.
        assert!(headers.timestamp.parse::<u128>().unwrap() > 0);
    }

    #[test]
    fn fresh_headers_for_every_call() {
        let signer = signer();

        let first = signer.sign();
        let second = signer.sign();

        assert_ne!(first.nonce, second.nonce);
        assert_ne!(first.sign, second.sign);

        // Wall clock never runs backwards between two calls.
        assert!(
            second.timestamp.parse::<u128>().unwrap() >= first.timestamp.parse::<u128>().unwrap()
        );
    }
}
