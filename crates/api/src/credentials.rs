//! Ordered resolution of the API token and base URL.
//!
//! Both resolvers take an environment accessor instead of reading the process
//! environment directly, so callers can substitute a fixed map.

use reqwest::Url;
use torque_types::{API_TOKEN_ENV_VAR, API_URL_ENV_VAR, ApiToken, DEFAULT_API_URL, InvocationError, ValidationError};
use tracing::debug;

use crate::validate_base_url;

/// Path under which the REST API is served on a Torque host.
const API_ROOT_PATH: &str = "/api";

/// Accessor backed by the real process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Resolve the bearer token.
///
/// Resolution order:
/// - explicit `api_token` parameter
/// - `TORQUE_API_TOKEN` from `env`
///
/// Blank values count as absent. When neither source yields a token the
/// result is [`InvocationError::Authentication`].
pub fn resolve_api_token<E>(explicit: Option<&str>, env: E) -> Result<ApiToken, InvocationError>
where
    E: Fn(&str) -> Option<String>,
{
    if let Some(token) = non_blank(explicit) {
        debug!(source = "parameter", "resolved api token");
        return Ok(ApiToken::new(token));
    }
    if let Some(token) = non_blank(env(API_TOKEN_ENV_VAR).as_deref()) {
        debug!(source = API_TOKEN_ENV_VAR, "resolved api token");
        return Ok(ApiToken::new(token));
    }
    Err(InvocationError::Authentication)
}

/// Resolve and validate the API base URL.
///
/// Resolution order:
/// - explicit `api_url` parameter
/// - `TORQUE_API_URL` from `env`
/// - [`DEFAULT_API_URL`]
///
/// A host-only URL such as `https://portal.qtorque.io` gets the `/api` root
/// appended, matching how playbooks have always passed `api_url`.
pub fn resolve_base_url<E>(explicit: Option<&str>, env: E) -> Result<Url, ValidationError>
where
    E: Fn(&str) -> Option<String>,
{
    let configured = non_blank(explicit).map(str::to_string).or_else(|| {
        env(API_URL_ENV_VAR)
            .as_deref()
            .and_then(|value| non_blank(Some(value)))
            .map(str::to_string)
    });
    let base_url = configured.unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let trimmed = base_url.trim_end_matches('/');
    let mut url = validate_base_url(trimmed)?;
    if matches!(url.path(), "" | "/") {
        url.set_path(API_ROOT_PATH);
    }
    debug!(base_url = %url, "resolved api base url");
    Ok(url)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn explicit_token_wins_over_environment() {
        let token = resolve_api_token(Some("param-token"), env_from(&[(API_TOKEN_ENV_VAR, "env-token")])).unwrap();
        assert_eq!(token.expose(), "param-token");
    }

    #[test]
    fn falls_back_to_environment_token() {
        let token = resolve_api_token(None, env_from(&[(API_TOKEN_ENV_VAR, "env-token")])).unwrap();
        assert_eq!(token.expose(), "env-token");

        let token = resolve_api_token(Some("  "), env_from(&[(API_TOKEN_ENV_VAR, "env-token")])).unwrap();
        assert_eq!(token.expose(), "env-token");
    }

    #[test]
    fn missing_token_is_authentication_error() {
        let error = resolve_api_token(None, env_from(&[(API_TOKEN_ENV_VAR, "")])).expect_err("no token");
        assert_eq!(error, InvocationError::Authentication);
    }

    #[test]
    fn process_env_accessor_reads_real_environment() {
        temp_env::with_var(API_TOKEN_ENV_VAR, Some("from-process"), || {
            let token = resolve_api_token(None, process_env).unwrap();
            assert_eq!(token.expose(), "from-process");
        });
        temp_env::with_var(API_TOKEN_ENV_VAR, None::<&str>, || {
            assert!(resolve_api_token(None, process_env).is_err());
        });
    }

    #[test]
    fn base_url_resolution_order() {
        let env = env_from(&[(API_URL_ENV_VAR, "https://torque.internal.example.com/api/")]);
        let explicit = resolve_base_url(Some("https://custom.example.com/api"), &env).unwrap();
        assert_eq!(explicit.as_str(), "https://custom.example.com/api");

        let from_env = resolve_base_url(None, &env).unwrap();
        assert_eq!(from_env.as_str(), "https://torque.internal.example.com/api");

        let default = resolve_base_url(None, env_from(&[])).unwrap();
        assert_eq!(default.as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn host_only_base_url_gets_api_root() {
        let url = resolve_base_url(Some("https://portal.qtorque.io"), env_from(&[])).unwrap();
        assert_eq!(url.as_str(), "https://portal.qtorque.io/api");

        let url = resolve_base_url(None, env_from(&[(API_URL_ENV_VAR, "https://torque.example.com/")])).unwrap();
        assert_eq!(url.as_str(), "https://torque.example.com/api");

        let url = resolve_base_url(Some("http://localhost:8080/custom/api"), env_from(&[])).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/custom/api");
    }

    #[test]
    fn invalid_base_url_is_validation_error() {
        let error = resolve_base_url(Some("http://example.com"), env_from(&[])).expect_err("plain http");
        assert!(matches!(error, ValidationError::InvalidParameter { ref name, .. } if name == "api_url"));
    }
}
