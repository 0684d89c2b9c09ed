/// Errors returned by a decode backend.
///
/// "No code in the frame" is not represented here: it is an empty result.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("cannot decode an empty {width}x{height} image")]
    EmptyImage { width: u32, height: u32 },
    #[error("decode backend failure: {0}")]
    Backend(String),
}
