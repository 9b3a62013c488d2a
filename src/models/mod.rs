//! Entity types: row structs, create/update payloads, and sort-field
//! enumerations. Payload fields are all optional so that required-field
//! checks happen in `validate` (with the original wording) instead of as
//! opaque deserialization failures.

mod book;
mod course;
mod product;
mod student;
mod teacher;

pub use book::{Book, BookDraft, BookPatch, BookSort, NewBook};
pub use course::{Course, CourseDraft, CoursePatch, CourseSort, NewCourse};
pub use product::{NewProduct, Product, ProductDraft, ProductPatch, ProductSort};
pub use student::{NewStudent, Student, StudentDraft, StudentPatch, StudentSort};
pub use teacher::{NewTeacher, Teacher, TeacherDraft, TeacherPatch, TeacherSort};

/// A required text field: present and non-empty.
pub(crate) fn required(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}
