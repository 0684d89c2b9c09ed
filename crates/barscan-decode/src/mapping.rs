//! Translation between backend barcode formats and `Symbology`.

use std::collections::HashSet;

use barscan_core::{Symbology, SymbologySet};
use rxing::BarcodeFormat;

/// Backend formats that must be enabled to honour `allowed`.
///
/// `COMPOSITE` has no backend reader and contributes nothing. EAN-2/EAN-5
/// add-ons are only read alongside an EAN/UPC host symbol.
pub(crate) fn backend_formats(allowed: &SymbologySet) -> HashSet<BarcodeFormat> {
    allowed
        .iter()
        .flat_map(|s| backend_format(s).iter().cloned())
        .collect()
}

fn backend_format(symbology: Symbology) -> &'static [BarcodeFormat] {
    match symbology {
        Symbology::Codabar => &[BarcodeFormat::CODABAR],
        Symbology::Code128 => &[BarcodeFormat::CODE_128],
        Symbology::Code39 => &[BarcodeFormat::CODE_39],
        Symbology::Code93 => &[BarcodeFormat::CODE_93],
        Symbology::Composite => &[],
        Symbology::Databar => &[BarcodeFormat::RSS_14],
        Symbology::DatabarExp => &[BarcodeFormat::RSS_EXPANDED],
        Symbology::Ean13 | Symbology::Isbn10 | Symbology::Isbn13 => &[BarcodeFormat::EAN_13],
        Symbology::Ean2 | Symbology::Ean5 => &[
            BarcodeFormat::EAN_13,
            BarcodeFormat::EAN_8,
            BarcodeFormat::UPC_A,
            BarcodeFormat::UPC_E,
        ],
        Symbology::Ean8 => &[BarcodeFormat::EAN_8],
        Symbology::I25 => &[BarcodeFormat::ITF],
        Symbology::Qrcode => &[BarcodeFormat::QR_CODE],
        Symbology::Upca => &[BarcodeFormat::UPC_A],
        Symbology::Upce => &[BarcodeFormat::UPC_E],
    }
}

/// Map one backend result onto an allowed symbology and its reported payload.
///
/// Returns `None` when the result falls outside `allowed`.
pub(crate) fn classify(
    format: &BarcodeFormat,
    payload: &str,
    allowed: &SymbologySet,
) -> Option<(Symbology, String)> {
    let symbology = match format {
        BarcodeFormat::EAN_13 => return classify_ean13(payload, allowed),
        BarcodeFormat::CODABAR => Symbology::Codabar,
        BarcodeFormat::CODE_128 => Symbology::Code128,
        BarcodeFormat::CODE_39 => Symbology::Code39,
        BarcodeFormat::CODE_93 => Symbology::Code93,
        BarcodeFormat::RSS_14 => Symbology::Databar,
        BarcodeFormat::RSS_EXPANDED => Symbology::DatabarExp,
        BarcodeFormat::EAN_8 => Symbology::Ean8,
        BarcodeFormat::ITF => Symbology::I25,
        BarcodeFormat::QR_CODE => Symbology::Qrcode,
        BarcodeFormat::UPC_A => Symbology::Upca,
        BarcodeFormat::UPC_E => Symbology::Upce,
        _ => return None,
    };
    allowed
        .contains(symbology)
        .then(|| (symbology, payload.to_string()))
}

/// Map an EAN/UPC add-on onto `EAN2` or `EAN5` by its digit count.
pub(crate) fn classify_extension(
    payload: &str,
    allowed: &SymbologySet,
) -> Option<(Symbology, String)> {
    let symbology = match payload.len() {
        2 => Symbology::Ean2,
        5 => Symbology::Ean5,
        _ => return None,
    };
    allowed
        .contains(symbology)
        .then(|| (symbology, payload.to_string()))
}

// Bookland EAN-13 codes are reported as ISBNs when the caller asked for them.
fn classify_ean13(payload: &str, allowed: &SymbologySet) -> Option<(Symbology, String)> {
    let bookland_978 = payload.starts_with("978");
    let bookland = bookland_978 || payload.starts_with("979");

    if bookland_978 && allowed.contains(Symbology::Isbn10) {
        if let Some(isbn) = isbn10_from_ean13(payload) {
            return Some((Symbology::Isbn10, isbn));
        }
    }
    if bookland && allowed.contains(Symbology::Isbn13) {
        return Some((Symbology::Isbn13, payload.to_string()));
    }
    allowed
        .contains(Symbology::Ean13)
        .then(|| (Symbology::Ean13, payload.to_string()))
}

/// Convert a `978`-prefixed EAN-13 into its ISBN-10 form.
///
/// Returns `None` for anything that is not 13 ASCII digits starting with
/// `978`. The check digit is recomputed (mod 11, `X` for ten).
pub fn isbn10_from_ean13(ean: &str) -> Option<String> {
    let bytes = ean.as_bytes();
    if bytes.len() != 13 || !bytes.iter().all(u8::is_ascii_digit) || !ean.starts_with("978") {
        return None;
    }
    let body = &ean[3..12];
    let sum: u32 = body
        .bytes()
        .zip((2..=10u32).rev())
        .map(|(b, w)| (b - b'0') as u32 * w)
        .sum();
    let check = (11 - sum % 11) % 11;
    let check = if check == 10 {
        'X'
    } else {
        char::from(b'0' + check as u8)
    };
    let mut out = String::with_capacity(10);
    out.push_str(body);
    out.push(check);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isbn10_conversion_recomputes_check_digit() {
        assert_eq!(isbn10_from_ean13("9780306406157").as_deref(), Some("0306406152"));
        assert_eq!(isbn10_from_ean13("9781861972712").as_deref(), Some("1861972717"));
        assert_eq!(isbn10_from_ean13("9780804429573").as_deref(), Some("080442957X"));
        assert_eq!(isbn10_from_ean13("9790306406157"), None);
        assert_eq!(isbn10_from_ean13("97803064061"), None);
    }

    #[test]
    fn bookland_prefers_isbn10_then_isbn13_then_ean13() {
        let all = SymbologySet::default();
        assert_eq!(
            classify(&BarcodeFormat::EAN_13, "9780306406157", &all),
            Some((Symbology::Isbn10, "0306406152".to_string()))
        );

        let no_isbn10 = SymbologySet::new([Symbology::Ean13, Symbology::Isbn13]);
        assert_eq!(
            classify(&BarcodeFormat::EAN_13, "9790306406157", &no_isbn10).map(|r| r.0),
            Some(Symbology::Isbn13)
        );

        let ean_only = SymbologySet::new([Symbology::Ean13]);
        assert_eq!(
            classify(&BarcodeFormat::EAN_13, "9780306406157", &ean_only).map(|r| r.0),
            Some(Symbology::Ean13)
        );
        assert_eq!(
            classify(&BarcodeFormat::EAN_13, "4006381333931", &all).map(|r| r.0),
            Some(Symbology::Ean13)
        );
    }

    #[test]
    fn results_outside_the_allow_list_are_dropped() {
        let qr_only = SymbologySet::new([Symbology::Qrcode]);
        assert_eq!(classify(&BarcodeFormat::CODE_128, "ABC", &qr_only), None);
        assert_eq!(classify(&BarcodeFormat::EAN_13, "4006381333931", &qr_only), None);
        assert_eq!(classify(&BarcodeFormat::DATA_MATRIX, "ABC", &SymbologySet::default()), None);
        assert_eq!(
            classify(&BarcodeFormat::QR_CODE, "HELLO", &qr_only),
            Some((Symbology::Qrcode, "HELLO".to_string()))
        );
    }

    #[test]
    fn add_on_length_selects_ean2_or_ean5() {
        let all = SymbologySet::default();
        assert_eq!(
            classify_extension("12", &all).map(|r| r.0),
            Some(Symbology::Ean2)
        );
        assert_eq!(
            classify_extension("52495", &all),
            Some((Symbology::Ean5, "52495".to_string()))
        );
        assert_eq!(classify_extension("123", &all), None);
        let ean2_only = SymbologySet::new([Symbology::Ean2]);
        assert_eq!(classify_extension("52495", &ean2_only), None);
        // The backend never reports an add-on as a symbol of its own.
        assert_eq!(classify(&BarcodeFormat::UPC_EAN_EXTENSION, "12", &all), None);
    }

    #[test]
    fn add_ons_enable_their_host_readers() {
        let ean5 = SymbologySet::new([Symbology::Ean5]);
        let formats = backend_formats(&ean5);
        assert_eq!(formats.len(), 4);
        assert!(formats.contains(&BarcodeFormat::EAN_13));
        assert!(formats.contains(&BarcodeFormat::UPC_E));
        assert!(!formats.contains(&BarcodeFormat::UPC_EAN_EXTENSION));
    }

    #[test]
    fn composite_only_enables_nothing() {
        let composite = SymbologySet::new([Symbology::Composite]);
        assert!(backend_formats(&composite).is_empty());
        let isbn = SymbologySet::new([Symbology::Isbn10, Symbology::Ean13]);
        assert_eq!(backend_formats(&isbn).len(), 1);
    }
}
