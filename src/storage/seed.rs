// src/storage/seed.rs
//
// Demo catalog for the in-memory adapter, so a deployment without a
// database still serves a browsable platform and a gradable mock test.

use chrono::Utc;
use sqlx::types::Json;

use crate::models::{
    category::ExamCategory, course::Course, material::StudyMaterial, mock_test::MockTest,
    question::Question, test_series::TestSeries,
};

use super::memory::Inner;

pub(super) fn populate_demo_data(inner: &mut Inner) {
    let now = Some(Utc::now());

    let categories = vec![
        ExamCategory {
            id: 1,
            name: "Banking & Insurance".to_string(),
            description: "SBI, IBPS, RBI, LIC & more".to_string(),
            icon: "fa-university".to_string(),
            slug: "banking-insurance".to_string(),
        },
        ExamCategory {
            id: 2,
            name: "SSC & Railways".to_string(),
            description: "SSC CGL, CHSL, RRB & more".to_string(),
            icon: "fa-train".to_string(),
            slug: "ssc-railways".to_string(),
        },
    ];
    for category in categories {
        inner.categories.insert(category.id, category);
    }

    let courses = vec![
        Course {
            id: 1,
            title: "Complete Banking & Finance Course".to_string(),
            description: "Comprehensive preparation for all banking exams including SBI PO, \
                          IBPS PO and RBI Grade B."
                .to_string(),
            category_id: 1,
            instructor: "Dr. Rajesh Kumar".to_string(),
            duration: "80 Hours".to_string(),
            level: "All Levels".to_string(),
            lessons_count: 120,
            price: 9999,
            discount_price: Some(3999),
            image_url: "/images/courses/banking-finance.jpg".to_string(),
            rating: Some(48),
            rating_count: 2450,
            enrolled_count: 18200,
            is_bestseller: true,
            is_new: false,
            created_at: now,
        },
        Course {
            id: 2,
            title: "SSC CGL Complete Package".to_string(),
            description: "Master all subjects required for the SSC CGL examination with expert \
                          guidance and practice tests."
                .to_string(),
            category_id: 2,
            instructor: "Prof. Meera Singh".to_string(),
            duration: "90 Hours".to_string(),
            level: "Beginner to Advanced".to_string(),
            lessons_count: 150,
            price: 11999,
            discount_price: Some(4499),
            image_url: "/images/courses/ssc-cgl.jpg".to_string(),
            rating: Some(47),
            rating_count: 1890,
            enrolled_count: 12450,
            is_bestseller: false,
            is_new: true,
            created_at: now,
        },
    ];
    for course in courses {
        inner.courses.insert(course.id, course);
    }

    inner.series.insert(
        1,
        TestSeries {
            id: 1,
            title: "SBI PO Prelims".to_string(),
            description: "Mock tests for SBI PO Prelims exam preparation".to_string(),
            category_id: 1,
            tests_count: 2,
            price: 1499,
            discount_price: Some(599),
            features: Json(vec![
                "Exam pattern based questions".to_string(),
                "Detailed performance analysis".to_string(),
            ]),
            tag: Some("Popular".to_string()),
            created_at: now,
        },
    );

    let tests = vec![
        MockTest {
            id: 1,
            title: "SBI PO Prelims Mock Test 1".to_string(),
            description: "Quantitative aptitude sampler with negative marking".to_string(),
            series_id: Some(1),
            duration: 30,
            total_questions: 3,
            passing_score: Some(40),
            is_active: true,
            created_at: now,
        },
        MockTest {
            id: 2,
            title: "SBI PO Prelims Mock Test 2".to_string(),
            description: "Reasoning sampler, no negative marking".to_string(),
            series_id: Some(1),
            duration: 15,
            total_questions: 2,
            passing_score: Some(50),
            is_active: true,
            created_at: now,
        },
    ];
    for test in tests {
        inner.tests.insert(test.id, test);
    }

    inner.questions.insert(
        1,
        vec![
            Question {
                id: 1,
                test_id: 1,
                position: 0,
                question_text: "What is 15% of 200?".to_string(),
                options: Json(vec![
                    "20".to_string(),
                    "30".to_string(),
                    "35".to_string(),
                    "40".to_string(),
                ]),
                correct_option_index: 1,
                explanation: Some("15/100 * 200 = 30.".to_string()),
                marks: 2.0,
                negative_marks: 0.5,
                created_at: now,
            },
            Question {
                id: 2,
                test_id: 1,
                position: 1,
                question_text: "A train covers 120 km in 2 hours. What is its average speed?"
                    .to_string(),
                options: Json(vec![
                    "40 km/h".to_string(),
                    "60 km/h".to_string(),
                    "80 km/h".to_string(),
                    "120 km/h".to_string(),
                ]),
                correct_option_index: 1,
                explanation: Some("120 km / 2 h = 60 km/h.".to_string()),
                marks: 2.0,
                negative_marks: 0.5,
                created_at: now,
            },
            Question {
                id: 3,
                test_id: 1,
                position: 2,
                question_text: "Simple interest on 1000 at 10% p.a. for 2 years is:".to_string(),
                options: Json(vec![
                    "100".to_string(),
                    "150".to_string(),
                    "200".to_string(),
                    "210".to_string(),
                ]),
                correct_option_index: 2,
                explanation: Some("1000 * 10% * 2 = 200.".to_string()),
                marks: 2.0,
                negative_marks: 0.5,
                created_at: now,
            },
        ],
    );

    inner.questions.insert(
        2,
        vec![
            Question {
                id: 4,
                test_id: 2,
                position: 0,
                question_text: "Find the next term: 2, 6, 12, 20, ...".to_string(),
                options: Json(vec![
                    "28".to_string(),
                    "30".to_string(),
                    "32".to_string(),
                    "36".to_string(),
                ]),
                correct_option_index: 1,
                explanation: Some("Differences grow by 2: 4, 6, 8, 10.".to_string()),
                marks: 1.0,
                negative_marks: 0.0,
                created_at: now,
            },
            Question {
                id: 5,
                test_id: 2,
                position: 1,
                question_text: "If CAT is coded as DBU, how is DOG coded?".to_string(),
                options: Json(vec![
                    "EPH".to_string(),
                    "EPG".to_string(),
                    "DPH".to_string(),
                    "FQI".to_string(),
                ]),
                correct_option_index: 0,
                explanation: Some("Each letter shifts forward by one.".to_string()),
                marks: 1.0,
                negative_marks: 0.0,
                created_at: now,
            },
        ],
    );

    let materials = vec![
        StudyMaterial {
            id: 1,
            title: "Banking Awareness PDF".to_string(),
            description: "Complete banking awareness notes for all banking exams".to_string(),
            material_type: "PDF".to_string(),
            category_id: 1,
            file_url: "/materials/banking-awareness.pdf".to_string(),
            thumbnail_url: None,
            is_free: true,
            created_at: now,
        },
        StudyMaterial {
            id: 2,
            title: "Fundamentals of Reasoning".to_string(),
            description: "Video lectures on reasoning for all competitive exams".to_string(),
            material_type: "Video".to_string(),
            category_id: 2,
            file_url: "/materials/reasoning-fundamentals.mp4".to_string(),
            thumbnail_url: None,
            is_free: true,
            created_at: now,
        },
    ];
    for material in materials {
        inner.materials.insert(material.id, material);
    }
}
