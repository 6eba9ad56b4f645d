// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image URLs and contact links.

/// Shown when a record has no image.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Resolve an image path returned by the API.
///
/// Absolute `http(s)` URLs pass through; relative paths are joined onto the
/// static asset host.
pub fn asset_url(base: &str, image: Option<&str>) -> String {
    match image.map(str::trim).filter(|p| !p.is_empty()) {
        None => PLACEHOLDER_IMAGE.to_owned(),
        Some(path) if path.starts_with("http") => path.to_owned(),
        Some(path) => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        ),
    }
}

/// `https://wa.me/<digits>` for a phone number in any format.
pub fn whatsapp_link(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    format!("https://wa.me/{digits}")
}

pub fn tel_link(phone: &str) -> String {
    format!("tel:{}", phone.trim())
}

pub fn mailto_link(email: &str) -> String {
    format!("mailto:{}", email.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://assets.example.test/";

    #[test]
    fn relative_paths_join_onto_base() {
        assert_eq!(
            asset_url(BASE, Some("/uploads/tap.jpg")),
            "https://assets.example.test/uploads/tap.jpg"
        );
    }

    #[test]
    fn absolute_urls_pass_through() {
        let url = "https://cdn.example.test/a.png";
        assert_eq!(asset_url(BASE, Some(url)), url);
    }

    #[test]
    fn missing_image_uses_placeholder() {
        assert_eq!(asset_url(BASE, None), PLACEHOLDER_IMAGE);
        assert_eq!(asset_url(BASE, Some("  ")), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn whatsapp_strips_formatting() {
        assert_eq!(whatsapp_link("+91 98765-43210"), "https://wa.me/919876543210");
    }
}
