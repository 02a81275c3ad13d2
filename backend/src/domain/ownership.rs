//! Ownership guard comparing a claimed owner email with the verified caller.

use serde_json::json;
use tracing::debug;

use super::{Error, Identity};

/// Allow when no email is claimed; otherwise require an exact match.
///
/// Comparison is case-sensitive. A mismatch is `Forbidden` even though the
/// identity itself is valid.
///
/// # Examples
/// ```
/// use plateshare::domain::{check_ownership, ErrorCode, Identity};
///
/// let caller = Identity::new("a@x.com");
/// assert!(check_ownership(&caller, None).is_ok());
/// assert!(check_ownership(&caller, Some("a@x.com")).is_ok());
/// let denied = check_ownership(&caller, Some("b@x.com")).expect_err("mismatch");
/// assert_eq!(denied.code(), ErrorCode::Forbidden);
/// ```
pub fn check_ownership(identity: &Identity, claimed_email: Option<&str>) -> Result<(), Error> {
    match claimed_email {
        None => Ok(()),
        Some(claimed) if claimed == identity.email() => Ok(()),
        Some(_) => {
            debug!("ownership check denied: claimed email differs from verified identity");
            Err(Error::forbidden("forbidden access")
                .with_details(json!({ "code": "ownership_mismatch" })))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some("a@x.com"))]
    fn allows_absent_or_matching_claim(#[case] claimed: Option<&str>) {
        assert!(check_ownership(&Identity::new("a@x.com"), claimed).is_ok());
    }

    #[rstest]
    #[case("b@x.com")]
    #[case("A@x.com")]
    #[case(" a@x.com")]
    #[case("")]
    fn denies_any_other_claim(#[case] claimed: &str) {
        let error = check_ownership(&Identity::new("a@x.com"), Some(claimed))
            .expect_err("mismatch denied");
        assert_eq!(error.code(), ErrorCode::Forbidden);
    }
}
