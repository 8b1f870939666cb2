#![no_main]

use libfuzzer_sys::fuzz_target;
use qrstudio::qr::payload::{self, InputMode, WifiCredentials, WifiEncryption};

fuzz_target!(|data: &[u8]| {
    // Split arbitrary input into SSID and password halves and derive both
    // payload kinds; derivation must never panic and the Wi-Fi template must
    // keep its terminator for any field contents
    if let Ok(s) = std::str::from_utf8(data) {
        // Snap the split point to a char boundary
        let mut mid = s.len() / 2;
        while !s.is_char_boundary(mid) {
            mid += 1;
        }
        let (ssid, password) = s.split_at(mid);
        let wifi = WifiCredentials {
            ssid: ssid.to_string(),
            password: password.to_string(),
            encryption: WifiEncryption::Wpa,
        };

        let text = payload::derive(InputMode::Text, s, &wifi);
        assert_eq!(text, s);

        let wifi_payload = payload::derive(InputMode::Wifi, s, &wifi);
        assert!(wifi_payload.ends_with(";;"));
    }
});
