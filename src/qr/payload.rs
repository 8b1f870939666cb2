//! Payload derivation
//!
//! The payload is a pure function of the input mode and its fields. It is
//! recomputed on every relevant edit and never stored on its own.

/// Which input form is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Free text or URL, encoded verbatim
    #[default]
    Text,
    /// Wi-Fi credentials, encoded with the `WIFI:` template
    Wifi,
}

/// Wi-Fi encryption scheme as announced in the payload's `T:` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WifiEncryption {
    /// WPA/WPA2 personal
    #[default]
    Wpa,
    /// Legacy WEP
    Wep,
    /// Open network, no password required
    None,
}

impl WifiEncryption {
    /// The token emitted into the `T:` field of the Wi-Fi payload
    pub fn token(self) -> &'static str {
        match self {
            Self::Wpa => "WPA",
            Self::Wep => "WEP",
            Self::None => "nopass",
        }
    }

    /// Map a selector index (WPA/WPA2, WEP, None) to an encryption scheme.
    /// Out-of-range indices fall back to WPA.
    pub fn from_index(index: i32) -> Self {
        match index {
            1 => Self::Wep,
            2 => Self::None,
            _ => Self::Wpa,
        }
    }
}

/// Credentials for a Wi-Fi network
#[derive(Debug, Clone, Default)]
pub struct WifiCredentials {
    /// Network name
    pub ssid: String,
    /// Network password; may be empty for open networks
    pub password: String,
    /// Encryption scheme
    pub encryption: WifiEncryption,
}

/// Derive the payload string for the given mode and fields.
///
/// Text mode returns the text unmodified. Wi-Fi mode emits the
/// `WIFI:S:<ssid>;T:<encryption>;P:<password>;;` template.
///
/// Reserved characters (`;`, `:`, `,`, `\`) in the SSID or password are NOT
/// escaped. Scanners disagree on the escaping convention and the template is
/// kept verbatim; see `wifi_payload_does_not_escape_reserved_characters`.
pub fn derive(mode: InputMode, text: &str, wifi: &WifiCredentials) -> String {
    match mode {
        InputMode::Text => text.to_string(),
        InputMode::Wifi => wifi_payload(wifi),
    }
}

/// Format Wi-Fi credentials with the fixed `WIFI:` template
pub fn wifi_payload(wifi: &WifiCredentials) -> String {
    format!(
        "WIFI:S:{};T:{};P:{};;",
        wifi.ssid,
        wifi.encryption.token(),
        wifi.password
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_mode_is_identity() {
        let wifi = WifiCredentials::default();
        assert_eq!(derive(InputMode::Text, "https://a.com", &wifi), "https://a.com");
        assert_eq!(derive(InputMode::Text, "", &wifi), "");
        assert_eq!(derive(InputMode::Text, "  spaced  ", &wifi), "  spaced  ");
    }

    #[test]
    fn test_wifi_template_with_wpa() {
        let wifi = WifiCredentials {
            ssid: "Home".to_string(),
            password: "hunter2".to_string(),
            encryption: WifiEncryption::Wpa,
        };
        assert_eq!(
            derive(InputMode::Wifi, "ignored", &wifi),
            "WIFI:S:Home;T:WPA;P:hunter2;;"
        );
    }

    #[test]
    fn test_wifi_template_open_network_with_empty_password() {
        let wifi = WifiCredentials {
            ssid: "Home".to_string(),
            password: String::new(),
            encryption: WifiEncryption::None,
        };
        assert_eq!(wifi_payload(&wifi), "WIFI:S:Home;T:nopass;P:;;");
    }

    #[test]
    fn test_wifi_template_wep() {
        let wifi = WifiCredentials {
            ssid: "cafe".to_string(),
            password: "abc123".to_string(),
            encryption: WifiEncryption::Wep,
        };
        assert_eq!(wifi_payload(&wifi), "WIFI:S:cafe;T:WEP;P:abc123;;");
    }

    /// Pins the accepted limitation: reserved characters pass through verbatim.
    /// Changing this is a product decision, not a bug fix.
    #[test]
    fn test_wifi_payload_does_not_escape_reserved_characters() {
        let wifi = WifiCredentials {
            ssid: "a;b:c,d".to_string(),
            password: "p\\q;r".to_string(),
            encryption: WifiEncryption::Wpa,
        };
        assert_eq!(wifi_payload(&wifi), "WIFI:S:a;b:c,d;T:WPA;P:p\\q;r;;");
    }

    #[test]
    fn test_encryption_tokens() {
        assert_eq!(WifiEncryption::Wpa.token(), "WPA");
        assert_eq!(WifiEncryption::Wep.token(), "WEP");
        assert_eq!(WifiEncryption::None.token(), "nopass");
    }

    #[test]
    fn test_encryption_from_index() {
        assert_eq!(WifiEncryption::from_index(0), WifiEncryption::Wpa);
        assert_eq!(WifiEncryption::from_index(1), WifiEncryption::Wep);
        assert_eq!(WifiEncryption::from_index(2), WifiEncryption::None);
        assert_eq!(WifiEncryption::from_index(-1), WifiEncryption::Wpa);
        assert_eq!(WifiEncryption::from_index(99), WifiEncryption::Wpa);
    }

    // Property-based tests using proptest
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: text mode never alters its input
            #[test]
            fn text_payload_is_verbatim(s in ".*") {
                prop_assert_eq!(derive(InputMode::Text, &s, &WifiCredentials::default()), s);
            }

            /// Property: the Wi-Fi template always starts with the prefix and
            /// ends with the double terminator, for any field contents
            #[test]
            fn wifi_payload_matches_template(
                ssid in ".*",
                password in ".*",
                enc_index in 0i32..3,
            ) {
                let wifi = WifiCredentials {
                    ssid: ssid.clone(),
                    password: password.clone(),
                    encryption: WifiEncryption::from_index(enc_index),
                };
                let payload = wifi_payload(&wifi);
                let expected_prefix = format!("WIFI:S:{ssid};T:");
                let expected_suffix = format!(";P:{password};;");
                prop_assert!(payload.starts_with(&expected_prefix));
                prop_assert!(payload.ends_with(&expected_suffix));
            }
        }
    }
}
