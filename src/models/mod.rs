pub mod course;
pub mod enrollment;
pub mod progress;
pub mod recommendation;
pub mod user;

pub use course::{
    Course, CourseCategory, CourseDetail, CourseLevel, CourseListResponse, CreateCourseRequest,
    ListCoursesQuery, ModuleContentType, SyllabusModule, SyllabusModuleInput,
    DEFAULT_THUMBNAIL_URL,
};
pub use enrollment::{
    EnrollRequest, Enrollment, EnrollmentDetail, EnrollmentListResponse, EnrollmentStatus,
    EnrollmentWithCourse,
};
pub use progress::{
    CompleteModuleRequest, CourseProgressSummary, Progress, ProgressSummaryResponse, QuizAttempt,
    QuizResult, SubmitQuizRequest,
};
pub use recommendation::{RecommendationItem, RecommendationResponse};
pub use user::{
    AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest, User, UserResponse,
    UserRole,
};
