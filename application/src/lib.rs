//! Application layer for formsmith
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    blob_uploader::{BlobUploader, UploadError},
    form_repository::{FormRepository, RepositoryError},
};
pub use use_cases::create_form::{CreateFormInput, CreateFormOutput, CreateFormUseCase};
pub use use_cases::edit_form::{EditFormInput, EditFormOutput, EditFormUseCase};
pub use use_cases::list_submissions::{ListSubmissionsUseCase, SubmissionReport};
pub use use_cases::load_form::{ListFormsUseCase, LoadFormUseCase};
pub use use_cases::question_access::QuestionAccessUseCase;
pub use use_cases::shared::FormServiceError;
pub use use_cases::submit_form::{AnswerPayload, SubmitFormInput, SubmitFormOutput, SubmitFormUseCase};
pub use use_cases::upload_image::{ImageTarget, UploadImageInput, UploadImageUseCase};
