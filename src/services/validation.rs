use http::Uri;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{ActivityRequest, ParticipantRequest};

pub const ACTIVITY_TYPES: &[&str] = &[
    "education",
    "recreational",
    "social",
    "diy",
    "charity",
    "cooking",
    "relaxation",
    "music",
    "busywork",
];

const MAX_ACTIVITY_LEN: usize = 255;
const MAX_NAME_LEN: usize = 100;

pub trait Validate {
    fn validate(&self) -> ServiceResult<()>;
}

/// Collects every constraint violation of one payload so they are reported
/// together.
#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn add(&mut self, field: &str, message: impl AsRef<str>) {
        self.0.push(format!("{}: {}", field, message.as_ref()));
    }

    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add(field, message);
        }
    }

    pub fn into_result(self) -> ServiceResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation(self.0.join(", ")))
        }
    }
}

fn check_text(violations: &mut Violations, field: &str, value: &str, max: usize) {
    let value = value.trim();
    if value.is_empty() {
        violations.add(field, "must not be blank");
    } else if value.chars().count() > max {
        violations.add(field, format!("size must be at most {}", max));
    }
}

fn in_unit_range(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

fn is_http_url(raw: &str) -> bool {
    let Ok(uri) = raw.parse::<Uri>() else {
        return false;
    };
    matches!(uri.scheme_str(), Some("http") | Some("https")) && uri.authority().is_some()
}

fn is_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !raw.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

impl Validate for ActivityRequest {
    fn validate(&self) -> ServiceResult<()> {
        let mut violations = Violations::default();
        check_text(&mut violations, "activity", &self.activity, MAX_ACTIVITY_LEN);

        let activity_type = self.activity_type.trim().to_lowercase();
        if activity_type.is_empty() {
            violations.add("type", "must not be blank");
        } else if !ACTIVITY_TYPES.contains(&activity_type.as_str()) {
            violations.add("type", format!("must be one of {}", ACTIVITY_TYPES.join(", ")));
        }

        violations.check(self.participants >= 1, "participants", "must be at least 1");
        violations.check(in_unit_range(self.price), "price", "must be between 0 and 1");
        violations.check(
            in_unit_range(self.accessibility),
            "accessibility",
            "must be between 0 and 1",
        );

        if let Some(link) = self.link.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            violations.check(is_http_url(link), "link", "must be an absolute http(s) URL");
        }
        violations.into_result()
    }
}

impl Validate for ParticipantRequest {
    fn validate(&self) -> ServiceResult<()> {
        let mut violations = Violations::default();
        check_text(&mut violations, "firstName", &self.first_name, MAX_NAME_LEN);
        check_text(&mut violations, "lastName", &self.last_name, MAX_NAME_LEN);

        let email = self.email.trim();
        if email.is_empty() {
            violations.add("email", "must not be blank");
        } else {
            violations.check(is_email(email), "email", "must be a well-formed email address");
        }
        violations.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_activity() -> ActivityRequest {
        ActivityRequest {
            activity: "Learn Express.js".to_string(),
            activity_type: "education".to_string(),
            participants: 1,
            price: 0.1,
            accessibility: 0.25,
            link: Some("https://expressjs.com/".to_string()),
        }
    }

    fn message(result: ServiceResult<()>) -> String {
        match result {
            Err(ServiceError::Validation(m)) => m,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn accepts_valid_activity() {
        assert!(valid_activity().validate().is_ok());
        let mut no_link = valid_activity();
        no_link.link = None;
        assert!(no_link.validate().is_ok());
    }

    #[test]
    fn type_is_case_insensitive() {
        let mut request = valid_activity();
        request.activity_type = "BusyWork".to_string();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn reports_all_activity_violations_together() {
        let request = ActivityRequest {
            activity: "   ".to_string(),
            activity_type: "sleeping".to_string(),
            participants: 0,
            price: 1.5,
            accessibility: -0.1,
            link: Some("ftp://example.org".to_string()),
        };
        let msg = message(request.validate());
        assert!(msg.contains("activity: must not be blank"));
        assert!(msg.contains("type: must be one of"));
        assert!(msg.contains("participants: must be at least 1"));
        assert!(msg.contains("price: must be between 0 and 1"));
        assert!(msg.contains("accessibility: must be between 0 and 1"));
        assert!(msg.contains("link: must be an absolute http(s) URL"));
    }

    #[test]
    fn rejects_overlong_activity() {
        let mut request = valid_activity();
        request.activity = "x".repeat(256);
        assert_eq!(message(request.validate()), "activity: size must be at most 255");
    }

    #[test]
    fn participant_requires_names_and_email() {
        let request = ParticipantRequest {
            first_name: String::new(),
            last_name: "Turing".to_string(),
            email: "alan.example.org".to_string(),
        };
        let msg = message(request.validate());
        assert_eq!(
            msg,
            "firstName: must not be blank, email: must be a well-formed email address"
        );
    }

    #[test]
    fn participant_names_are_bounded() {
        let request = ParticipantRequest {
            first_name: "x".repeat(MAX_NAME_LEN + 1),
            last_name: "y".repeat(MAX_NAME_LEN),
            email: "alan@example.org".to_string(),
        };
        assert_eq!(message(request.validate()), "firstName: size must be at most 100");

        let request = ParticipantRequest {
            first_name: "Alan".to_string(),
            last_name: "y".repeat(MAX_NAME_LEN + 1),
            email: "alan@example.org".to_string(),
        };
        assert_eq!(message(request.validate()), "lastName: size must be at most 100");
    }

    #[test]
    fn email_shapes() {
        assert!(is_email("alan@example.org"));
        assert!(!is_email("alan@example"));
        assert!(!is_email("@example.org"));
        assert!(!is_email("alan@@example.org"));
        assert!(!is_email("alan smith@example.org"));
    }
}
