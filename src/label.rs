//! Label names, as they appear in the model file.

use std::borrow::Cow;
use std::fmt;

/// The name of a language. The model file treats names as opaque bytes, so
/// they are not required to be valid UTF-8.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Label(Box<[u8]>);

impl Label {
    pub fn new(name: &[u8]) -> Self {
        Label(name.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the name as text, replacing invalid sequences.
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Label::new(name.as_bytes())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str_lossy())
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_str_lossy())
    }
}

impl PartialEq<str> for Label {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for Label {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == other.as_bytes()
    }
}

#[test]
fn test_label() {
    let l = Label::from("en");
    assert_eq!(l, "en");
    assert_eq!(l.len(), 2);
    assert_eq!(l.to_string(), "en");
    assert_eq!(format!("{:?}", l), "\"en\"");

    let raw = Label::new(&[b'x', 0xff]);
    assert_eq!(raw.as_bytes(), &[b'x', 0xff]);
    assert_eq!(raw.to_string(), "x\u{fffd}");
}
