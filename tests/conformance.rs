//! Compares symbols against the qrcodegen reference encoder.

use qrcodegen::{QrCode, QrCodeEcc, QrSegment};
use vcardqr::qrcode::{encode, Symbol, SymbolOptions};
use vcardqr::vcard::{build, ContactForm};

fn reference(text: &str) -> QrCode {
    let segments = [QrSegment::make_bytes(text.as_bytes())];
    QrCode::encode_segments_advanced(
        &segments,
        QrCodeEcc::Low,
        qrcodegen::Version::MIN,
        qrcodegen::Version::MAX,
        None,
        false,
    )
    .unwrap()
}

fn assert_same_symbol(ours: &Symbol, theirs: &QrCode, label: &str) {
    assert_eq!(ours.version().value(), theirs.version().value(), "{label}: version");
    assert_eq!(ours.mask().value(), theirs.mask().value(), "{label}: mask");
    assert_eq!(ours.size(), theirs.size(), "{label}: size");
    for y in 0..ours.size() {
        for x in 0..ours.size() {
            assert_eq!(ours.module(x, y), theirs.get_module(x, y), "{label}: module ({x}, {y})");
        }
    }
}

fn contact(i: usize) -> ContactForm {
    let names = ["Jane", "Rafael", "Mei", "Oluwaseun", "Zoë", "Kai", "Anneliese"];
    let surnames = ["Doe", "Okafor", "Lindqvist", "Nakamura", "Ferreira-Smith", "Li"];
    let first = names[i % names.len()];
    let last = surnames[(i / names.len()) % surnames.len()];
    let company = if i % 3 == 0 { String::new() } else { format!("Company {}", i * 7) };
    ContactForm {
        first_name: first.into(),
        last_name: last.into(),
        phone: format!("+1-555-{:04}", i * 37 % 10_000),
        email: format!("{}.{}@example.com", first.to_lowercase(), i),
        organization: company,
        title: if i % 2 == 0 { "Engineer".into() } else { String::new() },
        website: if i % 4 == 1 { format!("https://example.com/u/{i}") } else { String::new() },
        address: if i % 5 == 2 { format!("{} Main Street, Springfield", i + 10) } else { String::new() },
    }
}

#[test]
fn vcards_match_reference_encoder() {
    let options = SymbolOptions::default();
    for i in 0..120 {
        let record = build(&contact(i)).unwrap();
        let ours = encode(record.as_str(), &options).unwrap();
        assert_same_symbol(&ours, &reference(record.as_str()), &format!("contact {i}"));
    }
}

#[test]
fn payload_lengths_match_reference_encoder() {
    let options = SymbolOptions::default();
    for len in [0, 1, 17, 18, 32, 100, 134, 135, 271, 500, 1000, 2000, 2953] {
        let text: String = (0..len).map(|i| char::from(b'!' + (i * 7 % 90) as u8)).collect();
        let ours = encode(&text, &options).unwrap();
        assert_same_symbol(&ours, &reference(&text), &format!("length {len}"));
    }
}
