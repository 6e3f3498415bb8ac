//! QR codes for authenticator apps
//!
//! Renders `otpauth://totp/<label>?secret=<SEED>` as unicode blocks so it can
//! be scanned straight off the terminal.

use qrcode::render::unicode::Dense1x2;
use qrcode::QrCode;

use crate::error::{TwofaError, TwofaResult};
use crate::models::{Label, Seed};

/// The provisioning URI for a label and seed
pub fn otpauth_uri(label: &Label, seed: &Seed) -> String {
    format!(
        "otpauth://totp/{}?secret={}",
        urlencoding::encode(label.as_str()),
        seed.as_str().to_ascii_uppercase()
    )
}

/// Render the QR code for a label and seed
///
/// The default suits light-on-dark terminals; `invert` draws dark modules on
/// a light background.
pub fn render(label: &Label, seed: &Seed, invert: bool) -> TwofaResult<String> {
    let code = QrCode::new(otpauth_uri(label, seed).as_bytes())
        .map_err(|e| TwofaError::Qr(format!("Failed to encode QR code: {}", e)))?;

    let (dark, light) = if invert {
        (Dense1x2::Dark, Dense1x2::Light)
    } else {
        (Dense1x2::Light, Dense1x2::Dark)
    };

    Ok(code
        .render::<Dense1x2>()
        .dark_color(dark)
        .light_color(light)
        .quiet_zone(true)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Label, Seed) {
        (
            Label::new("my github").unwrap(),
            Seed::parse("jbswy3dpehpk3pxp").unwrap(),
        )
    }

    #[test]
    fn test_otpauth_uri() {
        let (label, seed) = sample();
        assert_eq!(
            otpauth_uri(&label, &seed),
            "otpauth://totp/my%20github?secret=JBSWY3DPEHPK3PXP"
        );
    }

    #[test]
    fn test_render() {
        let (label, seed) = sample();
        let normal = render(&label, &seed, false).unwrap();
        let inverted = render(&label, &seed, true).unwrap();

        assert!(normal.lines().count() > 10);
        assert_eq!(normal.lines().count(), inverted.lines().count());
        assert_ne!(normal, inverted);
    }
}
