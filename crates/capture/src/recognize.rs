use std::path::PathBuf;
use std::process::Command;

use image::GrayImage;

use album_core::StickerId;

/// The external recognition capability: given a cropped visual region,
/// return an id only for a confident single numeric token inside the
/// domain. A miss is `None`, not an error — the caller's UI decides
/// what happens next.
pub trait Recognizer {
    fn recognize(&self, image: &GrayImage) -> Option<StickerId>;
}

/// Recognizer backed by the `tesseract` binary.
///
/// One synchronous invocation per call, no timeout, no retry: the
/// session is interactively triggered, so a hang is the user's cue to
/// restart. The image is handed over as a temp PNG because tesseract
/// reads files, not pipes.
pub struct TesseractRecognizer {
    command: PathBuf,
    domain: u32,
}

impl TesseractRecognizer {
    pub fn new(domain: u32) -> Self {
        Self {
            command: PathBuf::from("tesseract"),
            domain,
        }
    }

    /// Use an explicit tesseract executable path.
    pub fn with_command(command: PathBuf, domain: u32) -> Self {
        Self { command, domain }
    }
}

impl Recognizer for TesseractRecognizer {
    fn recognize(&self, image: &GrayImage) -> Option<StickerId> {
        let dir = tempfile::tempdir().ok()?;
        let png_path = dir.path().join("frame.png");
        image.save(&png_path).ok()?;

        // Single text block, digits only.
        let output = Command::new(&self.command)
            .arg(&png_path)
            .arg("stdout")
            .args(["--psm", "6"])
            .args(["-c", "tessedit_char_whitelist=0123456789"])
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }

        let text = String::from_utf8_lossy(&output.stdout);
        parse_sticker_number(&text, self.domain)
    }
}

/// Pull the first numeric token out of OCR text and validate it against
/// the domain. Anything else is a miss.
pub(crate) fn parse_sticker_number(text: &str, domain: u32) -> Option<StickerId> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let id: StickerId = digits.parse().ok()?;
    (1..=domain).contains(&id).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_number() {
        assert_eq!(parse_sticker_number("123\n", 720), Some(123));
    }

    #[test]
    fn parses_first_token_amid_noise() {
        assert_eq!(parse_sticker_number("  .42abc99", 720), Some(42));
    }

    #[test]
    fn no_digits_is_a_miss() {
        assert_eq!(parse_sticker_number("abc\n", 720), None);
    }

    #[test]
    fn out_of_domain_is_a_miss() {
        assert_eq!(parse_sticker_number("0", 720), None);
        assert_eq!(parse_sticker_number("721", 720), None);
        assert_eq!(parse_sticker_number("99999", 720), None);
    }

    #[test]
    fn domain_boundaries_accepted() {
        assert_eq!(parse_sticker_number("1", 720), Some(1));
        assert_eq!(parse_sticker_number("720", 720), Some(720));
    }

    #[test]
    fn overflowing_token_is_a_miss() {
        assert_eq!(parse_sticker_number("99999999999999999999", 720), None);
    }
}
