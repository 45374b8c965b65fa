//! Submission validation layer

pub mod submission;

pub use submission::{
    validate_submission, BeatSubmission, UploadedBlob, ValidatedSubmission, ValidationError,
    MAX_AUDIO_BYTES, MAX_COVER_BYTES,
};
