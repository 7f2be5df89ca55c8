//! Format-specific request body decoders.

use crate::base::error::CodecError;
use crate::http::xmldocument::XmlElement;
use bytes::Bytes;

/// A decoded request body.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyValue {
    Json(serde_json::Value),
    Xml(XmlElement),
    /// Rows × fields; rows may differ in length.
    Csv(Vec<Vec<String>>),
    /// Undecoded body, byte for byte.
    Raw(Bytes),
}

impl BodyValue {
    pub fn raw(body: &[u8]) -> Self {
        BodyValue::Raw(Bytes::copy_from_slice(body))
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            BodyValue::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_xml(&self) -> Option<&XmlElement> {
        match self {
            BodyValue::Xml(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_csv(&self) -> Option<&[Vec<String>]> {
        match self {
            BodyValue::Csv(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&[u8]> {
        match self {
            BodyValue::Raw(raw) => Some(&raw[..]),
            _ => None,
        }
    }

    /// Raw body as text, when it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_raw().and_then(|raw| std::str::from_utf8(raw).ok())
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, BodyValue::Raw(_))
    }
}

/// Turns raw body bytes into a structured value.
///
/// Implementations report failure through `Err`; the dispatcher turns any
/// failure into [`BodyValue::Raw`].
pub trait BodyDecoder: Send + Sync {
    fn decode(&self, body: &[u8]) -> Result<BodyValue, CodecError>;
}

impl<F> BodyDecoder for F
where
    F: Fn(&[u8]) -> Result<BodyValue, CodecError> + Send + Sync,
{
    fn decode(&self, body: &[u8]) -> Result<BodyValue, CodecError> {
        self(body)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl BodyDecoder for JsonDecoder {
    fn decode(&self, body: &[u8]) -> Result<BodyValue, CodecError> {
        serde_json::from_slice(body)
            .map(BodyValue::Json)
            .map_err(|e| CodecError::body_parse("json", e))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDecoder;

impl BodyDecoder for XmlDecoder {
    fn decode(&self, body: &[u8]) -> Result<BodyValue, CodecError> {
        let text = std::str::from_utf8(body).map_err(|e| CodecError::body_parse("xml", e))?;
        XmlElement::parse(text).map(BodyValue::Xml)
    }
}

/// Comma-separated rows, no header row, uneven rows allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvDecoder;

impl BodyDecoder for CsvDecoder {
    fn decode(&self, body: &[u8]) -> Result<BodyValue, CodecError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(body);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| CodecError::body_parse("csv", e))?;
            rows.push(record.iter().map(String::from).collect());
        }

        Ok(BodyValue::Csv(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_object() {
        let value = JsonDecoder.decode(br#"{"foo":"bar"}"#).unwrap();
        assert_eq!(value.as_json().unwrap()["foo"], "bar");
    }

    #[test]
    fn test_json_truncated() {
        let err = JsonDecoder.decode(br#"{"foo":"bar""#).unwrap_err();
        assert!(err.is_body_error());
    }

    #[test]
    fn test_xml_invalid_utf8() {
        assert!(XmlDecoder.decode(&[0x3c, 0xff, 0x3e]).is_err());
    }

    #[test]
    fn test_csv_rows() {
        let value = CsvDecoder
            .decode(b"John,Doe,000-111-2222\nJane,Doe,111-222-3333")
            .unwrap();
        let rows = value.as_csv().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][2], "000-111-2222");
        assert_eq!(rows[1][1], "Doe");
    }

    #[test]
    fn test_csv_uneven_and_quoted() {
        let value = CsvDecoder.decode(b"a,\"b,c\"\nd").unwrap();
        let rows = value.as_csv().unwrap();
        assert_eq!(rows[0], vec!["a", "b,c"]);
        assert_eq!(rows[1], vec!["d"]);
    }

    #[test]
    fn test_closure_decoder() {
        let upper = |body: &[u8]| -> Result<BodyValue, CodecError> {
            Ok(BodyValue::raw(&body.to_ascii_uppercase()))
        };
        assert_eq!(upper.decode(b"abc").unwrap(), BodyValue::Raw(Bytes::from_static(b"ABC")));
    }

    #[test]
    fn test_raw_keeps_bytes() {
        assert_eq!(BodyValue::raw(b"plain").as_str(), Some("plain"));

        let binary = BodyValue::raw(&[0xff, 0x00, 0xfe]);
        assert_eq!(binary.as_raw(), Some(&[0xff, 0x00, 0xfe][..]));
        assert_eq!(binary.as_str(), None);
    }
}
