//! Data models for `Relevate`

pub mod certificate;
pub mod company;
pub mod completion;
pub mod course;
pub mod employee;
pub mod timestamp;
pub mod user;

pub use certificate::Certificate;
pub use company::{CompanyInfo, Plan};
pub use completion::CompletionRecord;
pub use course::{Course, CourseCategory, CoursePage, QuestionKind, QuizQuestion};
pub use employee::{Employee, EmployeeStatus};
pub use user::{User, UserRole};
