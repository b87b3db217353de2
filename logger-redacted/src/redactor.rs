use base64::{engine::general_purpose, Engine as _};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use sha2::{Digest, Sha256};

lazy_static! {
    static ref SECRET_FIELD_REGEX: Regex = Regex::new(
        r#"(?i)(\\?"?\b(?:password|access_token)\\?"?\s*[:=]\s*)(\\?"(?:[^"\\]|\\[^"])*\\?"|[^\s,}]+)"#
    ).unwrap();
    static ref BEARER_REGEX: Regex = Regex::new(r"(?i)\bbearer\s+[A-Za-z0-9\-._~+/]+=*").unwrap();
    static ref JWT_REGEX: Regex = Regex::new(r"\beyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+").unwrap();
    static ref PHONE_REGEX: Regex = Regex::new(r"\+\d[\d\s-]{2,16}\d").unwrap();
    static ref PHONE_FIELD_REGEX: Regex = Regex::new(
        r#"(?i)(\bphone(?:_number)?\\?"?\s*[:=]\s*\\?"?)(\d[\d\s-]{2,16}\d)"#
    ).unwrap();
    static ref EMAIL_REGEX: Regex = Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
}

/// PII redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub redact_secrets: bool,
    pub redact_phones: bool,
    pub redact_emails: bool,
    pub hash_for_correlation: bool,
    pub custom_patterns: Vec<(Regex, String)>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_secrets: true,
            redact_phones: true,
            redact_emails: true,
            hash_for_correlation: false,
            custom_patterns: Vec::new(),
        }
    }
}

/// PII redactor for log lines
///
/// Secrets (passwords, access tokens, bearer credentials) are always fully
/// replaced. Phone numbers keep their last two digits unless correlation
/// hashing is on, in which case the same number always maps to the same tag.
#[derive(Debug, Clone, Default)]
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.config.redact_secrets {
            result = self.redact_secrets(&result);
        }

        if self.config.redact_phones {
            result = self.redact_phones(&result);
        }

        if self.config.redact_emails {
            result = self.redact_emails(&result);
        }

        for (pattern, replacement) in &self.config.custom_patterns {
            result = pattern.replace_all(&result, replacement.as_str()).to_string();
        }

        result
    }

    fn redact_secrets(&self, text: &str) -> String {
        let result = SECRET_FIELD_REGEX.replace_all(text, "${1}[REDACTED]");
        let result = BEARER_REGEX.replace_all(&result, "Bearer [REDACTED]");
        JWT_REGEX.replace_all(&result, "[REDACTED]").to_string()
    }

    fn redact_phones(&self, text: &str) -> String {
        let result = PHONE_FIELD_REGEX.replace_all(text, |caps: &Captures| {
            format!("{}{}", &caps[1], self.mask_phone(&caps[2]))
        });
        PHONE_REGEX
            .replace_all(&result, |caps: &Captures| self.mask_phone(&caps[0]))
            .to_string()
    }

    fn redact_emails(&self, text: &str) -> String {
        EMAIL_REGEX
            .replace_all(text, |caps: &Captures| {
                let email = &caps[0];
                if self.config.hash_for_correlation {
                    return format!("EMAIL[{}]", self.hash_value(email));
                }
                match email.split_once('@') {
                    Some((local, domain)) => format!(
                        "{}***@{}***",
                        local.chars().next().unwrap_or('*'),
                        domain.chars().next().unwrap_or('*')
                    ),
                    None => "***@***".to_string(),
                }
            })
            .to_string()
    }

    fn mask_phone(&self, phone: &str) -> String {
        if self.config.hash_for_correlation {
            return format!("PHONE[{}]", self.hash_value(phone));
        }
        let digits = phone.chars().filter(char::is_ascii_digit).count();
        let keep_from = digits.saturating_sub(2);
        let mut seen = 0;
        phone
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .map(|c| {
                if c.is_ascii_digit() {
                    seen += 1;
                    if seen > keep_from {
                        return c;
                    }
                    return '*';
                }
                c
            })
            .collect()
    }

    fn hash_value(&self, value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        let result = hasher.finalize();
        general_purpose::STANDARD.encode(&result[..8]) // Use first 8 bytes for shorter hash
    }
}
