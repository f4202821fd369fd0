pub mod import_session;
pub mod quiz_import;
pub mod quiz_upload;
