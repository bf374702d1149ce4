//! Security headers middleware for XSS, clickjacking, and isolation protection.
//!
//! Adds restrictive security headers to all responses. The policy is locked
//! down except for what the hosted payment element needs: its script origin,
//! its frames and its API origin.

use axum::{
    extract::Request,
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

use super::CspNonce;

/// Payment provider script origin.
const PAYMENT_SCRIPT_ORIGIN: &str = "https://js.stripe.com";

/// Build the `Content-Security-Policy` value for one response.
///
/// ```text
/// default-src 'none';
/// script-src 'self' 'nonce-{nonce}' https://js.stripe.com;
/// style-src 'self';
/// font-src 'self';
/// img-src 'self' https: data:;
/// connect-src 'self' https://api.stripe.com;
/// frame-src https://js.stripe.com https://hooks.stripe.com;
/// object-src 'none';
/// base-uri 'self';
/// form-action 'self';
/// frame-ancestors 'none';
/// upgrade-insecure-requests
/// ```
///
/// Creator images come from the API's image host, so `img-src` allows any
/// HTTPS origin.
#[must_use]
pub fn content_security_policy(nonce: Option<&str>) -> String {
    let script_src = nonce.filter(|n| !n.is_empty()).map_or_else(
        || format!("'self' {PAYMENT_SCRIPT_ORIGIN}"),
        |n| format!("'self' 'nonce-{n}' {PAYMENT_SCRIPT_ORIGIN}"),
    );

    format!(
        "default-src 'none'; \
         script-src {script_src}; \
         style-src 'self'; \
         font-src 'self'; \
         img-src 'self' https: data:; \
         connect-src 'self' https://api.stripe.com; \
         frame-src {PAYMENT_SCRIPT_ORIGIN} https://hooks.stripe.com; \
         object-src 'none'; \
         base-uri 'self'; \
         form-action 'self'; \
         frame-ancestors 'none'; \
         upgrade-insecure-requests"
    )
}

/// Add security headers to all responses.
///
/// Headers applied:
/// - `X-Frame-Options: DENY` - Prevent clickjacking
/// - `X-Content-Type-Options: nosniff` - Prevent MIME sniffing
/// - `Referrer-Policy: no-referrer` - Zero referrer leakage
/// - `Content-Security-Policy` - see [`content_security_policy`]
/// - `Permissions-Policy` - Deny sensitive features except `payment`
/// - `Cache-Control: no-store, max-age=0` - Pages carry order data (not on `/static`)
/// - `Cross-Origin-Opener-Policy: same-origin-allow-popups` - 3-D Secure popups
/// - `Cross-Origin-Resource-Policy: same-origin` - Resource isolation
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let is_static = request.uri().path().starts_with("/static/");
    let csp = content_security_policy(request.extensions().get::<CspNonce>().map(CspNonce::value));

    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("no-referrer"));

    if let Ok(value) = HeaderValue::from_str(&csp) {
        headers.insert(CONTENT_SECURITY_POLICY, value);
    }

    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(
            "accelerometer=(), \
             camera=(), \
             display-capture=(), \
             geolocation=(), \
             gyroscope=(), \
             magnetometer=(), \
             microphone=(), \
             midi=(), \
             payment=(self \"https://js.stripe.com\"), \
             usb=(), \
             xr-spatial-tracking=()",
        ),
    );

    if !is_static {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store, max-age=0"));
    }

    headers.insert(
        HeaderName::from_static("cross-origin-opener-policy"),
        HeaderValue::from_static("same-origin-allow-popups"),
    );

    headers.insert(
        HeaderName::from_static("cross-origin-resource-policy"),
        HeaderValue::from_static("same-origin"),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csp_includes_nonce_and_payment_origins() {
        let csp = content_security_policy(Some("abc123=="));
        assert!(csp.contains("script-src 'self' 'nonce-abc123==' https://js.stripe.com;"));
        assert!(csp.contains("frame-src https://js.stripe.com https://hooks.stripe.com;"));
        assert!(csp.contains("frame-ancestors 'none'"));
    }

    #[test]
    fn test_csp_without_nonce() {
        let csp = content_security_policy(None);
        assert!(csp.contains("script-src 'self' https://js.stripe.com;"));
        assert!(!csp.contains("nonce-"));
        assert_eq!(content_security_policy(Some("")), csp);
    }
}
