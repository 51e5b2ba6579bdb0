//! Errors that can be reported while loading a model.

use std::io;

/// The failure modes of the model loader. Classification itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot open model")]
    Open(#[source] io::Error),
    #[error("not a model file")]
    BadMagic,
    #[error("invalid model file")]
    BadModel,
    #[error("I/O error")]
    Io(#[source] io::Error),
    #[error("out of memory")]
    OutOfMemory,
}

/// A flat, numbered view of the error variants. The numbering is stable and
/// is what 'strerror' accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Ok = 0,
    OpenError = 1,
    BadMagic = 2,
    BadModel = 3,
    IOError = 4,
    OutOfMemory = 5,
}

const MESSAGES: [&str; 6] = [
    "no error",
    "cannot open model",
    "not a model file",
    "invalid model file",
    "I/O error",
    "out of memory",
];

impl ErrorKind {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn as_str(self) -> &'static str {
        MESSAGES[self as usize]
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Open(_) => ErrorKind::OpenError,
            Error::BadMagic => ErrorKind::BadMagic,
            Error::BadModel => ErrorKind::BadModel,
            Error::Io(_) => ErrorKind::IOError,
            Error::OutOfMemory => ErrorKind::OutOfMemory,
        }
    }
}

/// Return the message that describes the error code 'code', or
/// "unknown error" if the code is out of range.
pub fn strerror(code: i32) -> &'static str {
    usize::try_from(code)
        .ok()
        .and_then(|idx| MESSAGES.get(idx).copied())
        .unwrap_or("unknown error")
}

#[test]
fn test_strerror() {
    assert_eq!(strerror(0), "no error");
    assert_eq!(strerror(ErrorKind::BadMagic.code()), "not a model file");
    assert_eq!(strerror(ErrorKind::OutOfMemory.code()), "out of memory");
    assert_eq!(strerror(6), "unknown error");
    assert_eq!(strerror(-1), "unknown error");

    // The display string of each error matches its kind.
    let err = Error::Io(io::Error::new(io::ErrorKind::Other, "boom"));
    assert_eq!(err.to_string(), err.kind().as_str());
    assert_eq!(Error::BadModel.to_string(), "invalid model file");
}
