//! Canonical sample data, shared by the seed binary and the tests so the
//! two can never drift apart.

use crate::models::{CourseCategory, CourseLevel, ModuleContentType};

#[derive(Debug, Clone, Copy)]
pub struct StudentFixture {
    pub name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct ModuleFixture {
    pub title: &'static str,
    pub content_type: ModuleContentType,
    pub duration_min: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct CourseFixture {
    pub title: &'static str,
    pub category: CourseCategory,
    pub level: CourseLevel,
    pub duration_hours: i32,
    pub rating: f64,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub thumbnail_url: &'static str,
    pub modules: &'static [ModuleFixture],
}

/// Each sample student enrolls in a staggered window of this many courses.
pub const ENROLLMENTS_PER_STUDENT: usize = 3;

pub const SAMPLE_STUDENTS: [StudentFixture; 3] = [
    StudentFixture {
        name: "John Doe",
        email: "john@learnhub.dev",
        password: "password123",
    },
    StudentFixture {
        name: "Jane Smith",
        email: "jane@learnhub.dev",
        password: "password123",
    },
    StudentFixture {
        name: "Alex Kumar",
        email: "alex@learnhub.dev",
        password: "password123",
    },
];

pub const SAMPLE_COURSES: [CourseFixture; 10] = [
    CourseFixture {
        title: "DBMS Mastery",
        category: CourseCategory::Dbms,
        level: CourseLevel::Intermediate,
        duration_hours: 40,
        rating: 4.8,
        description: "Master database management systems from basics to advanced normalization.",
        tags: &["SQL", "Normalization", "Indexing"],
        thumbnail_url:
            "https://media.geeksforgeeks.org/wp-content/cdn-uploads/20240307113700/DBMS-Tutorial.webp",
        modules: &[
            ModuleFixture {
                title: "Introduction to DBMS",
                content_type: ModuleContentType::Video,
                duration_min: 30,
            },
            ModuleFixture {
                title: "Relational Model",
                content_type: ModuleContentType::Video,
                duration_min: 45,
            },
            ModuleFixture {
                title: "Normalization Concepts",
                content_type: ModuleContentType::Text,
                duration_min: 60,
            },
            ModuleFixture {
                title: "SQL Advanced",
                content_type: ModuleContentType::Video,
                duration_min: 50,
            },
        ],
    },
    CourseFixture {
        title: "OS Fundamentals",
        category: CourseCategory::Os,
        level: CourseLevel::Beginner,
        duration_hours: 35,
        rating: 4.7,
        description:
            "Learn operating system concepts including processes, threads, and memory management.",
        tags: &["Processes", "Memory", "Scheduling"],
        thumbnail_url:
            "https://media.geeksforgeeks.org/wp-content/cdn-uploads/20240213151929/Operating-System.webp",
        modules: &[
            ModuleFixture {
                title: "OS Intro",
                content_type: ModuleContentType::Video,
                duration_min: 25,
            },
            ModuleFixture {
                title: "Process Management",
                content_type: ModuleContentType::Video,
                duration_min: 50,
            },
            ModuleFixture {
                title: "Memory Management",
                content_type: ModuleContentType::Text,
                duration_min: 60,
            },
        ],
    },
    CourseFixture {
        title: "Computer Networks",
        category: CourseCategory::Cn,
        level: CourseLevel::Intermediate,
        duration_hours: 42,
        rating: 4.6,
        description:
            "Understand networking layers, protocols, and real-world communication systems.",
        tags: &["TCP/IP", "Protocols", "OSI Model"],
        thumbnail_url:
            "https://media.geeksforgeeks.org/wp-content/cdn-uploads/20240213151619/Computer-Networks-Tutorial.webp",
        modules: &[
            ModuleFixture {
                title: "OSI Model",
                content_type: ModuleContentType::Video,
                duration_min: 40,
            },
            ModuleFixture {
                title: "TCP/IP Stack",
                content_type: ModuleContentType::Video,
                duration_min: 55,
            },
            ModuleFixture {
                title: "HTTP & HTTPS",
                content_type: ModuleContentType::Text,
                duration_min: 45,
            },
        ],
    },
    CourseFixture {
        title: "DSA in Java",
        category: CourseCategory::Dsa,
        level: CourseLevel::Intermediate,
        duration_hours: 50,
        rating: 4.9,
        description:
            "Complete data structures and algorithms course covering arrays, trees, graphs, and more.",
        tags: &["Arrays", "Trees", "Graphs", "Sorting"],
        thumbnail_url:
            "https://media.geeksforgeeks.org/wp-content/cdn-uploads/20231129210251/DSA-Roadmap.webp",
        modules: &[
            ModuleFixture {
                title: "Arrays & Strings",
                content_type: ModuleContentType::Video,
                duration_min: 45,
            },
            ModuleFixture {
                title: "Linked Lists",
                content_type: ModuleContentType::Video,
                duration_min: 50,
            },
            ModuleFixture {
                title: "Trees & BST",
                content_type: ModuleContentType::Text,
                duration_min: 70,
            },
            ModuleFixture {
                title: "Graphs & DFS/BFS",
                content_type: ModuleContentType::Video,
                duration_min: 65,
            },
        ],
    },
    CourseFixture {
        title: "OOP with Java",
        category: CourseCategory::Oop,
        level: CourseLevel::Beginner,
        duration_hours: 30,
        rating: 4.5,
        description: "Master object-oriented programming principles with Java.",
        tags: &["Classes", "Inheritance", "Polymorphism"],
        thumbnail_url:
            "https://media.geeksforgeeks.org/wp-content/cdn-uploads/20240213152324/OOP-Concepts-In-Java.webp",
        modules: &[
            ModuleFixture {
                title: "Classes & Objects",
                content_type: ModuleContentType::Video,
                duration_min: 35,
            },
            ModuleFixture {
                title: "Inheritance",
                content_type: ModuleContentType::Video,
                duration_min: 40,
            },
            ModuleFixture {
                title: "Polymorphism",
                content_type: ModuleContentType::Text,
                duration_min: 45,
            },
        ],
    },
    CourseFixture {
        title: "System Design Basics",
        category: CourseCategory::SystemDesign,
        level: CourseLevel::Advanced,
        duration_hours: 45,
        rating: 4.8,
        description: "Learn system design patterns for building scalable applications.",
        tags: &["Scalability", "Databases", "Caching"],
        thumbnail_url:
            "https://media.geeksforgeeks.org/wp-content/uploads/20221227171052/system-design-tutorials.jpg",
        modules: &[
            ModuleFixture {
                title: "Basics of Scalability",
                content_type: ModuleContentType::Video,
                duration_min: 50,
            },
            ModuleFixture {
                title: "Database Design",
                content_type: ModuleContentType::Video,
                duration_min: 60,
            },
            ModuleFixture {
                title: "Caching Strategies",
                content_type: ModuleContentType::Text,
                duration_min: 55,
            },
        ],
    },
    CourseFixture {
        title: "AI/ML Basics",
        category: CourseCategory::AiMlBasics,
        level: CourseLevel::Intermediate,
        duration_hours: 40,
        rating: 4.7,
        description: "Introduction to machine learning and artificial intelligence concepts.",
        tags: &["ML", "Neural Networks", "Classification"],
        thumbnail_url:
            "https://media.geeksforgeeks.org/wp-content/cdn-uploads/20231129210518/Machine-Learning-Tutorial.webp",
        modules: &[
            ModuleFixture {
                title: "ML Intro",
                content_type: ModuleContentType::Video,
                duration_min: 40,
            },
            ModuleFixture {
                title: "Supervised Learning",
                content_type: ModuleContentType::Video,
                duration_min: 55,
            },
            ModuleFixture {
                title: "Neural Networks Intro",
                content_type: ModuleContentType::Text,
                duration_min: 65,
            },
        ],
    },
    CourseFixture {
        title: "Cyber Security Essentials",
        category: CourseCategory::CyberSecurity,
        level: CourseLevel::Beginner,
        duration_hours: 35,
        rating: 4.6,
        description: "Learn the fundamentals of cybersecurity and protect systems from threats.",
        tags: &["Encryption", "Authentication", "Networks"],
        thumbnail_url:
            "https://media.geeksforgeeks.org/wp-content/uploads/20230616105028/CyberSecurity-1.webp",
        modules: &[
            ModuleFixture {
                title: "Security Basics",
                content_type: ModuleContentType::Video,
                duration_min: 35,
            },
            ModuleFixture {
                title: "Encryption",
                content_type: ModuleContentType::Video,
                duration_min: 45,
            },
            ModuleFixture {
                title: "Network Security",
                content_type: ModuleContentType::Text,
                duration_min: 50,
            },
        ],
    },
    CourseFixture {
        title: "Advanced DSA",
        category: CourseCategory::Dsa,
        level: CourseLevel::Advanced,
        duration_hours: 55,
        rating: 4.8,
        description: "Deep dive into advanced data structures and algorithmic techniques.",
        tags: &["DP", "Graphs", "Advanced Sorting"],
        thumbnail_url:
            "https://media.geeksforgeeks.org/wp-content/cdn-uploads/20240213151514-1.webp",
        modules: &[
            ModuleFixture {
                title: "Dynamic Programming",
                content_type: ModuleContentType::Video,
                duration_min: 70,
            },
            ModuleFixture {
                title: "Advanced Graphs",
                content_type: ModuleContentType::Video,
                duration_min: 75,
            },
        ],
    },
    CourseFixture {
        title: "Database Design",
        category: CourseCategory::Dbms,
        level: CourseLevel::Advanced,
        duration_hours: 45,
        rating: 4.7,
        description: "Design scalable and efficient databases for production systems.",
        tags: &["Database", "NoSQL", "Design Patterns"],
        thumbnail_url: "https://media.geeksforgeeks.org/wp-content/uploads/20230509143159/NoSQL-.webp",
        modules: &[
            ModuleFixture {
                title: "Relational Design",
                content_type: ModuleContentType::Video,
                duration_min: 50,
            },
            ModuleFixture {
                title: "NoSQL Design",
                content_type: ModuleContentType::Video,
                duration_min: 55,
            },
        ],
    },
];
