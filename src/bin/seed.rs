use anyhow::{Context, Result};
use sqlx::types::Json;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use uuid::Uuid;

use learnhub_api::auth::hash_password;
use learnhub_api::config::Config;
use learnhub_api::db;
use learnhub_api::fixtures::{ENROLLMENTS_PER_STUDENT, SAMPLE_COURSES, SAMPLE_STUDENTS};
use learnhub_api::models::{SyllabusModule, UserRole};
use learnhub_api::services::catalog::derive_slug;

/// Resets the database and loads the sample catalog, users, and enrollments.
/// Destructive: wipes every table before inserting.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed=info,learnhub_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let database_url = config
        .database
        .url
        .clone()
        .context("DATABASE_URL must be set to seed the database")?;

    let pool = db::create_pool(&database_url, config.database.max_connections)?;
    db::run_migrations(&pool)
        .await
        .context("Failed to apply migrations")?;

    tracing::info!("Clearing existing data");
    sqlx::query("TRUNCATE TABLE quiz_attempts, progress, enrollments, courses, users")
        .execute(&pool)
        .await
        .context("Failed to clear tables")?;

    let admin_hash = hash_password(&config.seed.admin_password)?;
    sqlx::query("INSERT INTO users (id, name, email, password_hash, role) VALUES ($1, $2, $3, $4, $5)")
        .bind(Uuid::new_v4())
        .bind("Admin User")
        .bind(config.seed.admin_email.to_lowercase())
        .bind(&admin_hash)
        .bind(UserRole::Admin)
        .execute(&pool)
        .await
        .context("Failed to insert admin user")?;
    tracing::info!(email = %config.seed.admin_email, "Admin user created");

    let mut student_ids = Vec::with_capacity(SAMPLE_STUDENTS.len());
    for student in SAMPLE_STUDENTS {
        let id = Uuid::new_v4();
        let hash = hash_password(student.password)?;
        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, role) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(student.name)
        .bind(student.email)
        .bind(&hash)
        .bind(UserRole::Student)
        .execute(&pool)
        .await
        .with_context(|| format!("Failed to insert student {}", student.email))?;
        student_ids.push(id);
    }
    tracing::info!(count = student_ids.len(), "Sample students created");

    let mut course_ids = Vec::with_capacity(SAMPLE_COURSES.len());
    for course in SAMPLE_COURSES {
        let id = Uuid::new_v4();
        let modules: Vec<SyllabusModule> = course
            .modules
            .iter()
            .map(|m| SyllabusModule {
                id: Uuid::new_v4(),
                title: m.title.to_string(),
                content_type: m.content_type,
                duration_min: m.duration_min,
            })
            .collect();
        let tags: Vec<String> = course.tags.iter().map(|t| t.to_string()).collect();
        sqlx::query(
            "INSERT INTO courses \
             (id, title, slug, category, level, duration_hours, rating, thumbnail_url, description, tags, syllabus_modules) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(id)
        .bind(course.title)
        .bind(derive_slug(course.title))
        .bind(course.category)
        .bind(course.level)
        .bind(course.duration_hours)
        .bind(course.rating)
        .bind(course.thumbnail_url)
        .bind(course.description)
        .bind(&tags)
        .bind(Json(modules))
        .execute(&pool)
        .await
        .with_context(|| format!("Failed to insert course {}", course.title))?;
        course_ids.push(id);
    }
    tracing::info!(count = course_ids.len(), "Courses created");

    // Each student gets a staggered window of consecutive courses so the
    // sample data shows overlapping but distinct enrollments.
    let mut enrollment_count = 0;
    for (i, student_id) in student_ids.iter().enumerate() {
        for course_id in course_ids.iter().skip(i).take(ENROLLMENTS_PER_STUDENT) {
            sqlx::query("INSERT INTO enrollments (id, user_id, course_id) VALUES ($1, $2, $3)")
                .bind(Uuid::new_v4())
                .bind(student_id)
                .bind(course_id)
                .execute(&pool)
                .await
                .context("Failed to insert enrollment")?;
            enrollment_count += 1;
        }
    }
    tracing::info!(count = enrollment_count, "Sample enrollments created");

    tracing::info!("Database seed completed");
    Ok(())
}
