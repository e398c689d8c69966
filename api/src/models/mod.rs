mod response;

pub use response::ValidationErrorResponse;
