use rand::Rng;

/// Random six-digit numeric code, never with a leading zero.
pub fn generate_otp() -> String {
    rand::rng().random_range(100_000..1_000_000).to_string()
}

/// Hides the middle of an address for display: `leader@x.com` -> `le***@x.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if local.chars().count() > 2 => {
            let visible: String = local.chars().take(2).collect();
            format!("{visible}***@{domain}")
        }
        _ => email.to_string(),
    }
}
