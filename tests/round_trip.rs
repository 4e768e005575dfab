//! Decodes rendered symbols with an independent QR reader.

use image::GrayImage;
use vcardqr::helper::to_image_buffer;
use vcardqr::qrcode::{encode, Mask, SymbolOptions};
use vcardqr::vcard::{build, ContactForm};

fn decode_bytes(img: &GrayImage) -> Vec<u8> {
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        img.width() as usize,
        img.height() as usize,
        |x, y| img.get_pixel(x as u32, y as u32)[0],
    );
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "expected exactly one symbol");
    let mut bytes = Vec::new();
    grids[0].decode_to(&mut bytes).expect("symbol should decode");
    bytes
}

fn jane() -> ContactForm {
    ContactForm {
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        phone: "555-1234".into(),
        email: "jane@x.com".into(),
        ..ContactForm::default()
    }
}

#[test]
fn minimal_vcard_round_trips() {
    let options = SymbolOptions::default();
    let record = build(&jane()).unwrap();
    let symbol = encode(record.as_str(), &options).unwrap();
    assert_eq!(symbol.version().value(), 6);

    let decoded = decode_bytes(&to_image_buffer(&symbol, &options));
    assert_eq!(decoded, record.as_str().as_bytes());
}

#[test]
fn full_vcard_round_trips() {
    let form = ContactForm {
        organization: "Initech Corporation".into(),
        title: "Senior Vice President of Synergy".into(),
        website: "https://www.example.com/people/jane-doe".into(),
        address: "4120 Freidrich Lane, Suite 300, Austin TX 78744, United States".into(),
        ..jane()
    };
    let options = SymbolOptions { module_size: 4, ..SymbolOptions::default() };
    let record = build(&form).unwrap();
    let symbol = encode(record.as_str(), &options).unwrap();
    assert!(symbol.version().value() >= 7, "expected version information to be drawn");

    let decoded = decode_bytes(&to_image_buffer(&symbol, &options));
    assert_eq!(decoded, record.as_str().as_bytes());
}

#[test]
fn utf8_payload_round_trips() {
    let form = ContactForm {
        first_name: "Zoë".into(),
        last_name: "Ångström".into(),
        address: "Kungsgatan 1, Göteborg".into(),
        ..jane()
    };
    let options = SymbolOptions::default();
    let record = build(&form).unwrap();
    let symbol = encode(record.as_str(), &options).unwrap();

    let decoded = decode_bytes(&to_image_buffer(&symbol, &options));
    assert_eq!(String::from_utf8(decoded).unwrap(), record.as_str());
}

#[test]
fn every_mask_round_trips() {
    let text = "BEGIN:VCARD\nVERSION:3.0\nFN:Mask Check\nEND:VCARD";
    for m in 0u8..8 {
        let options = SymbolOptions { mask: Some(Mask::new(m)), ..SymbolOptions::default() };
        let symbol = encode(text, &options).unwrap();
        let decoded = decode_bytes(&to_image_buffer(&symbol, &options));
        assert_eq!(decoded, text.as_bytes(), "mask {m}");
    }
}

#[test]
fn multi_block_versions_round_trip() {
    // Versions with several error-correction blocks of unequal length
    for len in [300, 700, 1200] {
        let text: String = (0..len).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let options = SymbolOptions { module_size: 4, ..SymbolOptions::default() };
        let symbol = encode(&text, &options).unwrap();
        let decoded = decode_bytes(&to_image_buffer(&symbol, &options));
        assert_eq!(decoded, text.as_bytes(), "length {len}");
    }
}
