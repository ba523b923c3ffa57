//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod admin_repo;
pub mod course_repo;
pub mod lesson_repo;
pub mod module_repo;
pub mod purchase_repo;
pub mod refund_repo;
pub mod user_repo;

pub use admin_repo::AdminRepo;
pub use course_repo::CourseRepo;
pub use lesson_repo::LessonRepo;
pub use module_repo::ModuleRepo;
pub use purchase_repo::PurchaseRepo;
pub use refund_repo::RefundRepo;
pub use user_repo::UserRepo;
