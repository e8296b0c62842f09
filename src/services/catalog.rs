use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::{conflict_on_unique, AppError, Result};
use crate::models::{
    Course, CourseCategory, CourseDetail, CourseLevel, CreateCourseRequest, ListCoursesQuery,
    SyllabusModule, DEFAULT_THUMBNAIL_URL,
};

pub(crate) const COURSE_COLUMNS: &str = "id, title, slug, category, level, duration_hours, \
     rating, thumbnail_url, description, tags, syllabus_modules, prerequisites, created_at";

/// Featured listings are capped to a small carousel.
const FEATURED_LIMIT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CourseSort {
    #[default]
    Newest,
    Rating,
    Popularity,
}

/// Normalized listing filter. Built leniently from raw query params:
/// unrecognized values mean "no filter" (or the default sort), never an error.
#[derive(Debug, Default)]
pub struct CourseFilter {
    pub search: Option<String>,
    pub category: Option<CourseCategory>,
    pub level: Option<CourseLevel>,
    pub sort: CourseSort,
    pub featured: bool,
}

impl From<ListCoursesQuery> for CourseFilter {
    fn from(query: ListCoursesQuery) -> Self {
        let search = query
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let category = query.category.as_deref().and_then(CourseCategory::parse);
        let level = query.level.as_deref().and_then(CourseLevel::parse);
        let sort = match query.sort.as_deref() {
            Some("rating") => CourseSort::Rating,
            Some("popularity") => CourseSort::Popularity,
            _ => CourseSort::Newest,
        };
        let featured = query.featured.as_deref() == Some("true");

        Self {
            search,
            category,
            level,
            sort,
            featured,
        }
    }
}

/// Lists courses matching the filter.
///
/// Free-text search is a case-insensitive substring match on title,
/// description, or any tag. Popularity breaks rating ties with the
/// shorter duration.
pub async fn list_courses(pool: &PgPool, filter: CourseFilter) -> Result<Vec<Course>> {
    let order_by = order_clause(filter.sort);

    let mut sql = format!(
        "SELECT {COURSE_COLUMNS} FROM courses \
         WHERE ($1::text IS NULL \
                OR title ILIKE '%' || $1 || '%' \
                OR description ILIKE '%' || $1 || '%' \
                OR EXISTS (SELECT 1 FROM unnest(tags) AS tag WHERE tag ILIKE '%' || $1 || '%')) \
           AND ($2::course_category IS NULL OR category = $2) \
           AND ($3::course_level IS NULL OR level = $3) \
         ORDER BY {order_by}"
    );
    if filter.featured {
        sql.push_str(&format!(" LIMIT {FEATURED_LIMIT}"));
    }

    let courses = sqlx::query_as::<_, Course>(&sql)
        .bind(filter.search)
        .bind(filter.category)
        .bind(filter.level)
        .fetch_all(pool)
        .await?;

    Ok(courses)
}

/// Fetches one course with its prerequisite courses resolved, preserving
/// the declared prerequisite order.
pub async fn get_course(pool: &PgPool, course_id: Uuid) -> Result<CourseDetail> {
    let course =
        sqlx::query_as::<_, Course>(&format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"))
            .bind(course_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

    let prerequisites = if course.prerequisites.is_empty() {
        Vec::new()
    } else {
        let fetched = courses_by_ids(pool, &course.prerequisites).await?;
        let mut by_id: HashMap<Uuid, Course> = fetched.into_iter().map(|c| (c.id, c)).collect();
        course
            .prerequisites
            .iter()
            .filter_map(|id| by_id.remove(id))
            .collect()
    };

    Ok(CourseDetail::from_parts(course, prerequisites))
}

/// Fetches courses by id, in no particular order.
pub(crate) async fn courses_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<Course>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let courses = sqlx::query_as::<_, Course>(&format!(
        "SELECT {COURSE_COLUMNS} FROM courses WHERE id = ANY($1)"
    ))
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(courses)
}

/// Creates a course. Missing fields are reported together; the slug is
/// derived from the title when not supplied. Title and slug collisions
/// surface as conflicts from the unique indexes.
pub async fn create_course(pool: &PgPool, payload: CreateCourseRequest) -> Result<Course> {
    let title = payload.title.as_deref().map(str::trim).unwrap_or_default();
    let description = payload
        .description
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();

    let mut missing = Vec::new();
    if title.is_empty() {
        missing.push("title");
    }
    if payload.category.is_none() {
        missing.push("category");
    }
    if description.is_empty() {
        missing.push("description");
    }
    if payload.duration_hours.is_none() {
        missing.push("durationHours");
    }
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let raw_category = payload.category.unwrap_or_default();
    let category = CourseCategory::parse(&raw_category)
        .ok_or_else(|| AppError::Validation(format!("Invalid category: {}", raw_category)))?;

    let level = match payload.level.as_deref() {
        Some(raw) => CourseLevel::parse(raw)
            .ok_or_else(|| AppError::Validation(format!("Invalid level: {}", raw)))?,
        None => CourseLevel::Beginner,
    };

    let duration_hours = payload.duration_hours.unwrap_or_default();
    if duration_hours < 1 {
        return Err(AppError::Validation(
            "durationHours must be at least 1".to_string(),
        ));
    }

    let rating = payload.rating.unwrap_or(0.0);
    if !(0.0..=5.0).contains(&rating) {
        return Err(AppError::Validation(
            "rating must be between 0 and 5".to_string(),
        ));
    }

    let slug = match payload.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.to_string(),
        None => derive_slug(title),
    };

    let thumbnail_url = payload
        .thumbnail_url
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_THUMBNAIL_URL.to_string());

    let tags: Vec<String> = payload
        .tags
        .unwrap_or_default()
        .into_iter()
        .map(|t| t.trim().to_string())
        .collect();

    let modules: Vec<SyllabusModule> = payload
        .syllabus_modules
        .unwrap_or_default()
        .into_iter()
        .map(|m| SyllabusModule {
            id: Uuid::new_v4(),
            title: m.title,
            content_type: m.content_type,
            duration_min: m.duration_min.unwrap_or(0),
        })
        .collect();

    let mut prerequisites = Vec::new();
    for raw in payload.prerequisites.unwrap_or_default() {
        prerequisites.push(Uuid::parse_str(&raw)?);
    }

    let course = sqlx::query_as::<_, Course>(&format!(
        "INSERT INTO courses (id, title, slug, category, level, duration_hours, rating, \
         thumbnail_url, description, tags, syllabus_modules, prerequisites) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
         RETURNING {COURSE_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(title)
    .bind(&slug)
    .bind(category)
    .bind(level)
    .bind(duration_hours)
    .bind(rating)
    .bind(&thumbnail_url)
    .bind(description)
    .bind(&tags)
    .bind(sqlx::types::Json(modules))
    .bind(&prerequisites)
    .fetch_one(pool)
    .await
    .map_err(|e| conflict_on_unique(e, "A course with this title or slug already exists"))?;

    Ok(course)
}

fn order_clause(sort: CourseSort) -> &'static str {
    match sort {
        CourseSort::Newest => "created_at DESC",
        CourseSort::Rating => "rating DESC",
        CourseSort::Popularity => "rating DESC, duration_hours ASC",
    }
}

/// Derives a URL slug from a title: lowercase, every run of
/// non-alphanumeric characters collapsed to a single hyphen, no leading
/// or trailing hyphen.
pub fn derive_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}
