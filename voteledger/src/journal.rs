use crate::*;
use content_inspector::ContentType;
use std::convert::TryFrom;

/// Append-only record of every committed call, in commit order.
///
/// The position of a call in the journal is its sequence number. Rejected calls
/// are never journaled, so replaying a journal reproduces the ledger exactly.
/// The journal holds the administrator's audit trail, including the candidate
/// each voter chose.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Journal {
    calls: Vec<Call>,
}

impl Journal {
    pub fn new() -> Self {
        Journal::default()
    }

    /// Append a committed call, returning its sequence number
    pub(crate) fn append(&mut self, call: Call) -> u64 {
        self.calls.push(call);
        (self.calls.len() - 1) as u64
    }

    pub fn get(&self, sequence: u64) -> Option<&Call> {
        usize::try_from(sequence)
            .ok()
            .and_then(|i| self.calls.get(i))
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Call> {
        self.calls.iter()
    }

    pub fn as_slice(&self) -> &[Call] {
        &self.calls
    }

    /// Unpack from bytes, either a JSON array or a CBOR array of calls
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let text = strip_bom(bytes);
        let first = text.iter().copied().find(|b| !b.is_ascii_whitespace());

        match first {
            Some(b'[') => return Ok(serde_json::from_slice(text)?),
            None => return Ok(Journal::default()),
            _ => {}
        }

        // CBOR arrays start with major type 4
        let cbor_array = matches!(bytes.first().copied(), Some(0x80..=0x9f));
        match content_inspector::inspect(bytes) {
            ContentType::BINARY => Ok(serde_cbor::from_slice(bytes)?),
            ContentType::UTF_8 if cbor_array => Ok(serde_cbor::from_slice(bytes)?),
            _ => Err(Error::DeserializationUnknownFormat),
        }
    }

    /// Pack into pretty-printed JSON
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Pack into CBOR
    pub fn to_cbor(&self) -> Result<Vec<u8>, Error> {
        Ok(serde_cbor::to_vec(self)?)
    }
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}

impl From<Vec<Call>> for Journal {
    fn from(calls: Vec<Call>) -> Self {
        Journal { calls }
    }
}

impl<'a> IntoIterator for &'a Journal {
    type Item = &'a Call;
    type IntoIter = std::slice::Iter<'a, Call>;

    fn into_iter(self) -> Self::IntoIter {
        self.calls.iter()
    }
}
