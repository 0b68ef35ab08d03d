//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-step writes that
//! must land together (lifecycle cascades, role reassignment, batch
//! mark entry) open their own transaction internally.

pub mod absence_repo;
pub mod account_repo;
pub mod department_repo;
pub mod mark_repo;
pub mod period_repo;
pub mod school_class_repo;
pub mod sequence_repo;
pub mod session_repo;
pub mod student_repo;
pub mod subject_repo;
pub mod teacher_repo;
pub mod term_repo;
pub mod year_repo;

pub use absence_repo::AbsenceRepo;
pub use account_repo::AccountRepo;
pub use department_repo::DepartmentRepo;
pub use mark_repo::MarkRepo;
pub use period_repo::PeriodRepo;
pub use school_class_repo::SchoolClassRepo;
pub use sequence_repo::SequenceRepo;
pub use session_repo::SessionRepo;
pub use student_repo::StudentRepo;
pub use subject_repo::SubjectRepo;
pub use teacher_repo::TeacherRepo;
pub use term_repo::TermRepo;
pub use year_repo::YearRepo;
