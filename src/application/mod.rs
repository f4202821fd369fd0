pub mod use_cases;

pub use use_cases::import_session::{ImportSession, SessionState};
pub use use_cases::quiz_import::{ImportReport, InvalidRow, QuizImportUseCase};
pub use use_cases::quiz_upload::{QuizUploadUseCase, UploadReceipt};
