//! The query the platform appends to the app's auth callback.

use serde::Deserialize;

use crate::auth::oauth::OAuthError;

/// Parameters of the OAuth callback: `?code=...&scope=...&context=stores/{hash}`.
///
/// Deserializable so web frameworks can extract it directly; use
/// [`AuthQuery::parse`] for a raw query string.
///
/// # Example
///
/// ```rust
/// use bigcommerce_api::auth::oauth::AuthQuery;
///
/// let query = AuthQuery::parse(
///     "code=qr6h3thvbvag2ffq&scope=store_v2_orders+store_v2_products&context=stores%2Fabc123",
/// ).unwrap();
///
/// assert_eq!(query.code, "qr6h3thvbvag2ffq");
/// assert_eq!(query.scope, "store_v2_orders store_v2_products");
/// assert_eq!(query.context, "stores/abc123");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthQuery {
    /// The temporary authorization code.
    pub code: String,
    /// Space-separated granted scopes.
    pub scope: String,
    /// The store context (`stores/{hash}`).
    pub context: String,
}

impl AuthQuery {
    /// Creates a query from its parts.
    #[must_use]
    pub fn new(code: impl Into<String>, scope: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            scope: scope.into(),
            context: context.into(),
        }
    }

    /// Parses a URL query string, with or without the leading `?`.
    ///
    /// `+` decodes to a space, as in form encoding. Unknown parameters are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::InvalidArgument`] if `code`, `scope` or `context`
    /// is missing or cannot be decoded.
    pub fn parse(query: &str) -> Result<Self, OAuthError> {
        let mut code = None;
        let mut scope = None;
        let mut context = None;

        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let slot = match key {
                "code" => &mut code,
                "scope" => &mut scope,
                "context" => &mut context,
                _ => continue,
            };
            let value = value.replace('+', " ");
            let decoded = urlencoding::decode(&value).map_err(|e| OAuthError::InvalidArgument {
                reason: format!("'{key}' is not valid URL encoding: {e}"),
            })?;
            *slot = Some(decoded.into_owned());
        }

        let require = |value: Option<String>, name: &str| {
            value
                .filter(|v| !v.is_empty())
                .ok_or_else(|| OAuthError::InvalidArgument {
                    reason: format!("The authorization query is missing '{name}'"),
                })
        };

        Ok(Self {
            code: require(code, "code")?,
            scope: require(scope, "scope")?,
            context: require(context, "context")?,
        })
    }

    /// Returns the store hash named by the context, if any.
    #[must_use]
    pub fn store_hash(&self) -> Option<&str> {
        self.context
            .strip_prefix("stores/")
            .filter(|hash| !hash.is_empty())
    }
}
