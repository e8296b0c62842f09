use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_THUMBNAIL_URL: &str = "https://via.placeholder.com/300x200?text=Course";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "course_category")]
pub enum CourseCategory {
    #[sqlx(rename = "DSA")]
    #[serde(rename = "DSA")]
    Dsa,
    #[sqlx(rename = "DBMS")]
    #[serde(rename = "DBMS")]
    Dbms,
    #[sqlx(rename = "OS")]
    #[serde(rename = "OS")]
    Os,
    #[sqlx(rename = "CN")]
    #[serde(rename = "CN")]
    Cn,
    #[sqlx(rename = "OOP")]
    #[serde(rename = "OOP")]
    Oop,
    #[sqlx(rename = "System Design")]
    #[serde(rename = "System Design")]
    SystemDesign,
    #[sqlx(rename = "AI/ML Basics")]
    #[serde(rename = "AI/ML Basics")]
    AiMlBasics,
    #[sqlx(rename = "Cyber Security")]
    #[serde(rename = "Cyber Security")]
    CyberSecurity,
}

impl CourseCategory {
    /// Parses the wire name of a category. Unknown names yield None.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DSA" => Some(Self::Dsa),
            "DBMS" => Some(Self::Dbms),
            "OS" => Some(Self::Os),
            "CN" => Some(Self::Cn),
            "OOP" => Some(Self::Oop),
            "System Design" => Some(Self::SystemDesign),
            "AI/ML Basics" => Some(Self::AiMlBasics),
            "Cyber Security" => Some(Self::CyberSecurity),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "course_level")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Beginner" => Some(Self::Beginner),
            "Intermediate" => Some(Self::Intermediate),
            "Advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleContentType {
    Video,
    Text,
}

/// One syllabus entry. Ids are assigned by the server at course creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusModule {
    pub id: Uuid,
    pub title: String,
    pub content_type: ModuleContentType,
    pub duration_min: i32,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category: CourseCategory,
    pub level: CourseLevel,
    pub duration_hours: i32,
    pub rating: f64,
    pub thumbnail_url: String,
    pub description: String,
    pub tags: Vec<String>,
    pub syllabus_modules: Json<Vec<SyllabusModule>>,
    pub prerequisites: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusModuleInput {
    pub title: String,
    pub content_type: ModuleContentType,
    pub duration_min: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub duration_hours: Option<i32>,
    pub rating: Option<f64>,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub syllabus_modules: Option<Vec<SyllabusModuleInput>>,
    pub prerequisites: Option<Vec<String>>,
}

/// Query parameters for the course listing. All optional; malformed values
/// are ignored rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct ListCoursesQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub sort: Option<String>,
    pub featured: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CourseListResponse {
    pub count: usize,
    pub courses: Vec<Course>,
}

/// Course detail with prerequisite courses resolved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category: CourseCategory,
    pub level: CourseLevel,
    pub duration_hours: i32,
    pub rating: f64,
    pub thumbnail_url: String,
    pub description: String,
    pub tags: Vec<String>,
    pub syllabus_modules: Json<Vec<SyllabusModule>>,
    pub prerequisites: Vec<Course>,
    pub created_at: DateTime<Utc>,
}

impl CourseDetail {
    pub fn from_parts(course: Course, prerequisites: Vec<Course>) -> Self {
        Self {
            id: course.id,
            title: course.title,
            slug: course.slug,
            category: course.category,
            level: course.level,
            duration_hours: course.duration_hours,
            rating: course.rating,
            thumbnail_url: course.thumbnail_url,
            description: course.description,
            tags: course.tags,
            syllabus_modules: course.syllabus_modules,
            prerequisites,
            created_at: course.created_at,
        }
    }
}
