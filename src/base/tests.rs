use crate::base::config::CookieSettings;
use crate::base::error::CodecError;
use crate::cookies::cipher::CipherMode;

#[test]
fn test_settings_errors_are_not_body_errors() {
    let err = CookieSettings::from_json("[]").unwrap_err();
    assert!(matches!(err, CodecError::InvalidSettings { .. }));
    assert!(!err.is_body_error());
}

#[test]
fn test_settings_drive_codec_cipher() {
    let settings = CookieSettings::from_json(r#"{"cipher_mode": "ctr"}"#).unwrap();
    assert_eq!(settings.codec().engine().mode(), CipherMode::Ctr);
}

#[test]
fn test_cipher_error_message() {
    let err = CodecError::cipher("bad decrypt");
    assert_eq!(err.to_string(), "Cipher operation failed: bad decrypt");
}
