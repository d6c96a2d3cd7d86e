//! Legal / consent page markers
//!
//! Elements whose presence marks the page as a terms-of-service, privacy
//! policy or cookie-consent page.

/// Meta tags declaring a policy page.
pub static LEGAL_META: &str = r#"meta[name="tos"], meta[name="policy"], meta[name="privacy"]"#;

/// Class-based consent / ToS containers.
pub static CONSENT_CONTAINERS: &str = concat!(
    ".tos-container, .terms-of-service, .policy-page, .privacy-notice, ",
    ".consent-modal, .gdpr-consent, .cookie-consent"
);
