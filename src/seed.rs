// src/seed.rs

//! Deterministic demo dataset, used when no dataset file is configured.

use chrono::{NaiveDate, Utc};

use crate::models::{
    course::{Course, CourseModule, DifficultyTier},
    dataset::Dataset,
    profile::{Badge, LearnerProfile},
    question::{Difficulty, Question, QuestionKind, Quiz},
};

const QUESTIONS_PER_QUIZ: usize = 10;

struct BaseCourse {
    id: &'static str,
    title: &'static str,
    difficulty: &'static str,
    tags: &'static [&'static str],
    description: &'static str,
}

const BASE_COURSES: &[BaseCourse] = &[
    BaseCourse { id: "c_java", title: "Java Foundations", difficulty: "Beginner", tags: &["Java", "Beginner"], description: "Core Java and OOP." },
    BaseCourse { id: "c_java_adv", title: "Advanced Java", difficulty: "Intermediate", tags: &["Java", "Intermediate"], description: "Streams, concurrency, JVM." },
    BaseCourse { id: "c_dsa", title: "Data Structures & Algorithms", difficulty: "Intermediate", tags: &["DSA", "Java", "Intermediate"], description: "Big-O, arrays to graphs." },
    BaseCourse { id: "c_react", title: "Frontend with React", difficulty: "Intermediate", tags: &["Web Dev", "React", "Intermediate"], description: "Hooks, state, components." },
    BaseCourse { id: "c_dbms", title: "DBMS Essentials", difficulty: "Beginner", tags: &["DBMS", "SQL", "Beginner"], description: "Relational model & SQL." },
    BaseCourse { id: "c_os", title: "Operating Systems Basics", difficulty: "Beginner", tags: &["OS", "Beginner"], description: "Processes, memory, scheduling." },
    BaseCourse { id: "c_networks", title: "Networks & Security", difficulty: "Intermediate", tags: &["Networks", "Security", "Intermediate"], description: "TCP/IP, HTTP, TLS basics." },
    BaseCourse { id: "c_cloud", title: "Cloud Fundamentals", difficulty: "Beginner", tags: &["Cloud", "Beginner"], description: "IaaS, PaaS, SaaS, AWS/GCP." },
    BaseCourse { id: "c_apt", title: "Aptitude Mastery", difficulty: "Beginner", tags: &["Aptitude", "Beginner"], description: "Arithmetic and logic." },
    BaseCourse { id: "c_sysd", title: "System Design Basics", difficulty: "Intermediate", tags: &["Web Dev", "Intermediate"], description: "Scalability and tradeoffs." },
    BaseCourse { id: "c_sql", title: "SQL for Developers", difficulty: "Beginner", tags: &["DBMS", "SQL", "Beginner"], description: "Joins, subqueries, practice." },
    BaseCourse { id: "c_htmlcss", title: "HTML & CSS", difficulty: "Beginner", tags: &["Web Dev", "Beginner"], description: "Layouts, Flexbox, Grid." },
    BaseCourse { id: "c_js", title: "Modern JavaScript", difficulty: "Intermediate", tags: &["Web Dev", "Intermediate"], description: "ES6+, async, modules." },
    BaseCourse { id: "c_git", title: "Git & GitHub", difficulty: "Beginner", tags: &["Web Dev", "Beginner"], description: "Version control workflows." },
];

fn build_course(index: usize, base: &BaseCourse) -> Course {
    let module_count = 4 + index % 3;
    let modules = (0..module_count)
        .map(|i| CourseModule {
            id: format!("m_{}_{}", base.id, i + 1),
            title: format!("{} - Module {}", base.title, i + 1),
            estimated_min: 8 + ((index + i) * 5 % 14) as u32,
        })
        .collect();

    Course {
        id: base.id.to_string(),
        title: base.title.to_string(),
        description: base.description.to_string(),
        difficulty: DifficultyTier::from(base.difficulty.to_string()),
        tags: base.tags.iter().map(|t| t.to_string()).collect(),
        enroll_count: 100 + (index as u64 * 37) % 500,
        quiz_id: format!("quiz_{}", base.id),
        modules,
        outcomes: vec![
            "Understand basics".to_string(),
            "Apply concepts".to_string(),
            "Practice with questions".to_string(),
        ],
    }
}

/// Ten questions alternating multiple choice and true/false, cycling difficulty.
fn build_quiz(course: &Course) -> Quiz {
    let tag = course.tags.first().map(String::as_str).unwrap_or("General");
    let difficulties = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    let questions = (0..QUESTIONS_PER_QUIZ)
        .map(|i| {
            let (kind, prompt, explanation) = if i % 2 == 0 {
                (
                    QuestionKind::MultipleChoice {
                        options: ["A", "B", "C", "D"].iter().map(|o| o.to_string()).collect(),
                        answer: i % 4,
                    },
                    format!("{} Q{}?", tag, i + 1),
                    "Review notes.",
                )
            } else {
                (
                    QuestionKind::TrueFalse { answer: i % 3 != 0 },
                    format!("{} True/False #{}", tag, i + 1),
                    "Recall basics.",
                )
            };

            Question {
                id: format!("{}_q{}", course.quiz_id, i + 1),
                kind,
                prompt,
                difficulty: difficulties[i % difficulties.len()],
                explanation: explanation.to_string(),
            }
        })
        .collect();

    Quiz {
        id: course.quiz_id.clone(),
        course_id: course.id.clone(),
        questions,
    }
}

fn demo_learner(
    id: &str,
    name: &str,
    username: &str,
    interests: &[&str],
    daily_goal_min: u32,
    points: u64,
    badges: &[Badge],
    active_on: NaiveDate,
) -> LearnerProfile {
    let mut learner = LearnerProfile::new(id, name, username);
    learner.interests = interests.iter().map(|t| t.to_string()).collect();
    learner.daily_goal_min = daily_goal_min;
    learner.points = points;
    learner.badges = badges.iter().copied().collect();
    learner.activity.insert(active_on);
    learner
}

/// Demo dataset whose learners were last active today.
pub fn demo_dataset() -> Dataset {
    demo_dataset_on(Utc::now().date_naive())
}

pub fn demo_dataset_on(today: NaiveDate) -> Dataset {
    let courses: Vec<Course> = BASE_COURSES
        .iter()
        .enumerate()
        .map(|(i, base)| build_course(i, base))
        .collect();
    let quizzes = courses.iter().map(build_quiz).collect();

    let learners = vec![
        demo_learner("u_admin", "Admin", "admin@demo.com", &["Java", "Web Dev"], 30, 520, &[Badge::FirstQuiz, Badge::HighScorer], today),
        demo_learner("u_aman", "Aman", "aman@demo.com", &["DSA", "Java", "Aptitude"], 20, 240, &[Badge::CourseStarter], today),
        demo_learner("u_riya", "Riya", "riya@demo.com", &["Web Dev", "DBMS"], 25, 390, &[Badge::FirstQuiz, Badge::HighScorer], today),
    ];

    Dataset {
        learners,
        courses,
        quizzes,
    }
}
